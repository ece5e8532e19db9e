//! Console logging macros
//!
//! On wasm32 the messages go to the browser console through `web_sys`.
//! Native builds (tests, headless runs) never call JS imports: debug builds
//! print to stderr and release builds drop the message.
//!
//! Usage:
//! ```rust
//! use drape_engine::{console_log, console_warn};
//!
//! let bodies = 100;
//! console_log!("cloth bound: {} bodies", bodies);
//! console_warn!("resolution_x={} pins the whole top row", 3);
//! ```

#[derive(Clone, Copy)]
enum Level {
    Info,
    Warn,
}

#[cfg_attr(
    all(not(target_arch = "wasm32"), not(debug_assertions)),
    allow(unused_variables)
)]
fn emit(level: Level, message: &str) {
    #[cfg(target_arch = "wasm32")]
    match level {
        Level::Info => web_sys::console::log_1(&message.into()),
        Level::Warn => web_sys::console::warn_1(&message.into()),
    }

    #[cfg(all(not(target_arch = "wasm32"), debug_assertions))]
    match level {
        Level::Info => eprintln!("[drape] {}", message),
        Level::Warn => eprintln!("[drape] warning: {}", message),
    }
}

#[doc(hidden)]
pub fn write_log(message: &str) {
    emit(Level::Info, message);
}

#[doc(hidden)]
pub fn write_warn(message: &str) {
    emit(Level::Warn, message);
}

/// Informational message (engine lifecycle, scene construction)
#[macro_export]
macro_rules! console_log {
    ($($arg:tt)*) => {
        $crate::core::logging::write_log(&format!($($arg)*))
    };
}

/// Warning (suspicious but accepted configuration)
#[macro_export]
macro_rules! console_warn {
    ($($arg:tt)*) => {
        $crate::core::logging::write_warn(&format!($($arg)*))
    };
}
