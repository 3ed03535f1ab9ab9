use crate::commands::{load_collection, CmdResult};
use crate::error::Result;
use crate::store::EntryStore;
use crate::summary::summarize;

pub fn run<S: EntryStore>(store: &S) -> Result<CmdResult> {
    let (entries, failure) = load_collection(store);
    let mut result = CmdResult::default().with_summary(summarize(&entries));
    if let Some(message) = failure {
        result.add_message(message);
    }
    Ok(result)
}
