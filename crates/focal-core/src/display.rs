//! Clock rendering for front-ends.
//!
//! Numeric display formatting floors to whole seconds and zero-pads minutes
//! and seconds to two digits. Minutes grow past two digits for long
//! sessions rather than wrapping.

use crate::coerce;

/// Format a second count as `MM:SS`.
pub fn format_clock(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Format a raw floating-point second count as `MM:SS`.
///
/// Anything that is not a valid non-negative number renders as `00:00`.
pub fn format_clock_raw(raw: f64) -> String {
    format_clock(coerce::sanitize_secs(raw))
}
