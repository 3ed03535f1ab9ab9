use crate::commands::{load_collection, CmdMessage, CmdResult};
use crate::draft::{CoverSource, CoverUpload, EntryDraft};
use crate::error::Result;
use crate::store::{BlobStore, EntryStore};
use crate::summary::summarize;
use tracing::{info, warn};

/// Creates an entry from a draft.
///
/// Order of operations: validate, upload the cover file (if any), insert the
/// row, then reload the collection from the store. Nothing is inserted when
/// validation or the upload fails.
pub fn run<S: EntryStore + BlobStore>(
    store: &mut S,
    draft: EntryDraft,
    default_cover: &str,
) -> Result<CmdResult> {
    draft.validate()?;

    let uploaded = match &draft.cover {
        CoverSource::File(path) => {
            let cover = CoverUpload::from_path(path)?;
            let url = store.upload(&cover).map_err(|e| {
                warn!(file = %path.display(), error = %e, "cover upload failed");
                e
            })?;
            Some(url)
        }
        CoverSource::None | CoverSource::Url(_) => None,
    };

    let new_entry = draft.into_new_entry(uploaded, default_cover)?;
    let created = store.create(&new_entry)?;
    info!(id = %created.id, title = %created.title, "entry created");

    let (entries, failure) = load_collection(&*store);

    let mut result = CmdResult::default()
        .with_summary(summarize(&entries))
        .with_listed_entries(entries)
        .with_affected_entries(vec![created.clone()]);
    result.add_message(CmdMessage::success(format!(
        "Entry created: {}",
        created.title
    )));
    if let Some(message) = failure {
        result.add_message(message);
    }
    Ok(result)
}
