//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace, LevelFilter};

/// Initialize the logging system from `RUST_LOG` only
pub fn init() {
    env_logger::init();
}

/// Initialize the logging system with a fallback level
///
/// `RUST_LOG` still wins when it is set; `level` applies otherwise. Calling
/// this twice is harmless, the second initialization is ignored.
pub fn init_with_default(level: LevelFilter) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level);
    builder.parse_default_env();
    if builder.try_init().is_err() {
        log::debug!("Logger already initialized");
    }
}
