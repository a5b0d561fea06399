//! Value normalization helpers shared by the tool parsers.

use crate::error::{Error, Result};

/// Unit suffixes, smallest first. Index `i` scales by `1024^(i + 1)`.
const SIZE_SUFFIXES: [&str; 4] = ["kb", "mb", "gb", "tb"];

/// Map a controller status word to a gauge value.
///
/// Only the exact trimmed string `OK` is healthy.
pub fn status_value(status: &str) -> u8 {
    match status.trim() {
        "OK" => 1,
        _ => 0,
    }
}

/// Result of [`to_bytes`]
#[derive(Debug, Clone, PartialEq)]
pub enum ByteSize {
    /// Size converted to bytes
    Bytes(f64),
    /// No unit suffix; the trimmed lowercase input
    Unchanged(String),
}

/// Convert a size such as `300 GB` or `1.5tb` to bytes.
///
/// Input without a known suffix passes through trimmed and lowercased.
pub fn to_bytes(input: &str) -> Result<ByteSize> {
    let normalized = input.trim().to_lowercase();

    for (i, suffix) in SIZE_SUFFIXES.iter().enumerate() {
        if let Some(number) = normalized.strip_suffix(suffix) {
            let value: f64 = number
                .trim()
                .parse()
                .map_err(|_| Error::InvalidByteSize(input.to_string()))?;
            return Ok(ByteSize::Bytes(value * 1024f64.powi(i as i32 + 1)));
        }
    }

    Ok(ByteSize::Unchanged(normalized))
}
