//! Diagnostics go to stderr through `tracing`, so stdout stays clean for
//! rendered output and `--output json`.
//!
//! `LILY_LOG` takes an `EnvFilter` directive (`LILY_LOG=lilyapp=debug`). Without
//! it the level follows `-v`: warnings by default, `-v` info, `-vv` debug.

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "LILY_LOG";

pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    // A second init (unit tests) is harmless, so the error is ignored.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}
