//! Logger setup for the `fruit-slice` binary
//!
//! Game and tracker output is filtered by `--verbose`; other crates stay at
//! `warn` unless `RUST_LOG` says otherwise.

use env_logger::{Builder, Env};

/// Filter used when `RUST_LOG` is unset
pub fn default_filter(verbose: bool) -> String {
    let level = if verbose { "debug" } else { "info" };
    format!("warn,{}={}", env!("CARGO_CRATE_NAME"), level)
}

/// Install the global logger. A second call is a no-op.
pub fn init(verbose: bool) {
    let env = Env::default().default_filter_or(default_filter(verbose));
    let mut builder = Builder::from_env(env);
    builder.format_timestamp_millis().format_target(verbose);

    if builder.try_init().is_err() {
        log::debug!("Logger already installed");
    }
}
