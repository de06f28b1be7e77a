// src/common/measurement/parse.rs

use super::calibration::normalize_calibration_note;
use super::diagnostic::detect_diagnostic;
use super::Measurement;

use alloc::string::String;

/// Longest reply handled as the short (mode-less) format.
pub const SHORT_FORMAT_MAX_LEN: usize = 16;
/// Width of the mode prefix of an extended reply.
pub const MODE_FIELD_LEN: usize = 6;

/// The two fixed-width reply layouts of the balance.
///
/// The extended layout is the short layout preceded by a 6-character mode
/// field, so the line length alone tells them apart.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ReplyFormat {
    /// `<sign><value>[ <unit>]`, at most [`SHORT_FORMAT_MAX_LEN`] characters.
    Short,
    /// `<mode:6><sign><value>[ <unit>]`.
    Extended,
}

impl ReplyFormat {
    /// Picks the layout of a raw reply line (terminator stripped, padding kept).
    pub fn detect(line: &str) -> Self {
        if line.chars().count() <= SHORT_FORMAT_MAX_LEN {
            ReplyFormat::Short
        } else {
            ReplyFormat::Extended
        }
    }

    /// Decodes `line` according to this layout.
    pub fn decode(self, line: &str) -> Measurement {
        match self {
            ReplyFormat::Short => decode_body(line, None),
            ReplyFormat::Extended => {
                let (mode, body) = split_at_char(line, MODE_FIELD_LEN);
                decode_body(body, Some(mode.trim()))
            }
        }
    }
}

// --- Public Parsing Functions ---

/// Decodes one reply line of the balance into a [`Measurement`].
///
/// Total over its input: diagnostics become message results, readings without
/// a unit become unstable readings, and anything else is still decoded column
/// by column.
///
/// ```
/// use sbi_balance::parse_measurement;
///
/// let m = parse_measurement("-  3.456 mg  ");
/// assert_eq!(m.value.as_deref(), Some("-3.456"));
/// assert_eq!(m.unit.as_deref(), Some("mg"));
/// assert_eq!(m.stable, Some(true));
/// ```
pub fn parse_measurement(line: &str) -> Measurement {
    ReplyFormat::detect(line).decode(line)
}

// --- Internal Helpers ---

/// Decodes a short-format body, tagging a reading with `mode`.
fn decode_body(segment: &str, mode: Option<&str>) -> Measurement {
    if let Some(message) = detect_diagnostic(segment) {
        return Measurement::diagnostic(message);
    }

    let normalized = normalize_calibration_note(segment);
    let (value, unit) = decode_fields(&normalized.data);

    Measurement::reading(mode.map(String::from), value, unit, normalized.annotated)
}

/// Splits a normalized body into the value string and an optional unit.
///
/// Column 0 holds the sign (blank for positive values on most devices), the
/// rest holds digits optionally followed by the unit after the last blank.
fn decode_fields(data: &str) -> (String, Option<String>) {
    let (sign_column, rest) = split_at_char(data, 1);
    let sign = sign_column.trim();

    let (raw_value, unit) = split_last_whitespace(rest.trim());

    let mut value = String::with_capacity(sign.len() + raw_value.len());
    value.push_str(sign);
    value.extend(raw_value.chars().filter(|c| !c.is_whitespace()));

    (value, unit.map(String::from))
}

/// Splits a trimmed region at its last whitespace character.
///
/// The right-hand part is non-empty because the region has no trailing
/// whitespace; the left-hand part may still contain blanks between digits.
fn split_last_whitespace(region: &str) -> (&str, Option<&str>) {
    match region.char_indices().rev().find(|(_, c)| c.is_whitespace()) {
        Some((idx, c)) => (&region[..idx], Some(&region[idx + c.len_utf8()..])),
        None => (region, None),
    }
}

/// Splits after the first `n` characters (or at the end if shorter).
#[inline]
fn split_at_char(s: &str, n: usize) -> (&str, &str) {
    match s.char_indices().nth(n) {
        Some((idx, _)) => s.split_at(idx),
        None => (s, ""),
    }
}
