//! Logger setup

/// Initializes `env_logger`
///
/// `RUST_LOG` wins over `default_filter`. Calling this more than once (or after
/// the host installed its own logger) is harmless.
pub fn init(default_filter: &str) {
    let result = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(default_filter),
    )
    .format_timestamp_millis()
    .try_init();

    if result.is_err() {
        log::debug!("Logger already initialized");
    }
}
