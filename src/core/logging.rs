//! Logging initialization and utilities

/// Initialize the logging system
///
/// Safe to call more than once; later calls are ignored.
///
/// Uses env_logger with default filter level of `info`.
/// Override with RUST_LOG environment variable, e.g.
/// `RUST_LOG=terrace::quadtree=debug` to see per-leaf build output.
///
/// # Example
/// ```
/// terrace::core::logging::init();
/// log::info!("Engine started");
/// ```
pub fn init() {
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    )
    .format_timestamp_millis()
    .try_init();
}
