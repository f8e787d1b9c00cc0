//! Logging and debug utilities.
//!
//! Diagnostics go to stderr so they never mix with `--dry-run` frames on stdout.
//! The [`debug!`](crate::debug) and [`warn!`](crate::warn) macros are thin
//! `format!` wrappers around [`debug`] and [`warn`].

use std::env;

/// Trace a message on stderr when `DEBUG` is set.
///
/// The animation reports the resolved settings and every frame it draws
/// (position, `t`, both colors) through here. That is several lines per
/// second, so nothing is printed unless `DEBUG` is present in the environment.
///
/// # Arguments
///
/// * `message` - The debug message to print
pub fn debug(message: &str) {
    if enabled() {
        eprintln!("{message}");
    }
}

/// Print a warning to stderr, regardless of the DEBUG environment variable.
///
/// Used for failures the program recovers from, such as a frame the border
/// command could not render.
///
/// # Arguments
///
/// * `message` - The warning to print
pub fn warn(message: &str) {
    eprintln!("warning: {message}");
}

/// Whether debug output is enabled for this process.
#[must_use]
pub fn enabled() -> bool {
    env::var_os("DEBUG").is_some()
}

/// Format and print a debug message, see [`logs::debug`](crate::logs::debug).
///
/// # Examples
///
/// ```
/// border_shimmer::debug!("t={}", 0.5);
/// ```
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {
        $crate::logs::debug(&format!($($arg)*))
    };
}

/// Format and print a warning, see [`logs::warn`](crate::logs::warn).
///
/// # Examples
///
/// ```
/// border_shimmer::warn!("frame {} dropped", 3);
/// ```
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::logs::warn(&format!($($arg)*))
    };
}
