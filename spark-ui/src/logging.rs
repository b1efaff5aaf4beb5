//! Tracing bootstrap for hosts and demos.

/// Default filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "error,spark_ui=info,spark_components=info";

/// Installs a global `tracing` subscriber.
///
/// The filter comes from `RUST_LOG`, falling back to [`DEFAULT_FILTER`].
/// Calling this more than once is harmless; later calls are ignored.
pub fn init_tracing() {
    let filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match tracing_subscriber::EnvFilter::try_new(DEFAULT_FILTER) {
            Ok(filter) => filter,
            Err(_) => tracing_subscriber::EnvFilter::new("error"),
        },
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
