//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system
pub fn init() {
    env_logger::init();
}

/// Initialize logging with a default filter, still overridable through `RUST_LOG`
///
/// Safe to call more than once (later calls are ignored), which keeps tests
/// that each want logging from fighting over the global logger.
pub fn init_with_level(level: &str) {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .is_test(cfg!(test))
        .try_init();
}
