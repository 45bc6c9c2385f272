//! Tracing bootstrap for hosts and demos.
//!
//! Libraries in this workspace only emit `tracing` events; installing a
//! subscriber is left to the binary. [`init_tracing`] is the default choice.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "error,slidekit_ui=info,slidekit_components=info";

/// Installs a `tracing-subscriber` formatter honouring `RUST_LOG`.
///
/// Calling it more than once is harmless; later calls are ignored.
pub fn init_tracing() {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match EnvFilter::try_new(DEFAULT_FILTER) {
            Ok(filter) => filter,
            Err(_) => EnvFilter::new("error"),
        },
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
