// src/common/measurement/diagnostic.rs

/// Substrings that mark a reply as a device message rather than a reading.
///
/// Matched case-insensitively anywhere in the data segment. Covers overload
/// (`High`), underload (`Low`), calibration prompts (`Cal`), error codes
/// (`Err`) and the dashed "no value" display (`--`).
pub const DIAGNOSTIC_MARKERS: [&str; 5] = ["high", "low", "cal", "err", "--"];

/// Returns the trimmed segment if it contains any diagnostic marker.
pub fn detect_diagnostic(segment: &str) -> Option<&str> {
    DIAGNOSTIC_MARKERS
        .iter()
        .any(|marker| contains_ignore_ascii_case(segment, marker))
        .then(|| segment.trim())
}

#[inline]
fn contains_ignore_ascii_case(haystack: &str, needle: &str) -> bool {
    haystack
        .as_bytes()
        .windows(needle.len())
        .any(|window| window.eq_ignore_ascii_case(needle.as_bytes()))
}
