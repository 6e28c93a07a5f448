//! Number formatting for display and output.

use serde::Deserialize;

/// Decimal places used when nothing else is configured (`123.45`).
pub const DEFAULT_PRECISION: usize = 2;

/// How a cell is turned into output text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadPolicy {
    /// Every evaluation failure propagates, blank cells included.
    Strict,
    /// A bare blank cell prints as an empty string.
    #[default]
    Formatted,
}

/// Format a number with a fixed number of decimal places.
pub fn format_number(n: f64, precision: usize) -> String {
    format!("{:.*}", precision, n)
}
