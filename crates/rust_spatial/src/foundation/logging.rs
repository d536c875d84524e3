//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system
///
/// Safe to call more than once; later calls are ignored so tests and
/// binaries can both invoke it.
pub fn init() {
    let _ = env_logger::builder().is_test(cfg!(test)).try_init();
}
