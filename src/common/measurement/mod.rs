// src/common/measurement/mod.rs

mod calibration;
mod diagnostic;
pub mod parse; // Make parse functions public

// Re-export items for external use
pub use calibration::{normalize_calibration_note, Normalized};
pub use diagnostic::{detect_diagnostic, DIAGNOSTIC_MARKERS};
pub use parse::{parse_measurement, ReplyFormat, MODE_FIELD_LEN, SHORT_FORMAT_MAX_LEN};

use alloc::string::String;

/// Message of the [`Measurement`] synthesized when the balance did not answer.
pub const CONNECTION_TIMEOUT_MESSAGE: &str = "Connection Timeout";

/// A decoded reply to a print command.
///
/// A measurement is one of three shapes:
///
/// * a **reading**: `value` is set, `stable` is `Some(_)`, `unit` is set exactly
///   when the reading is stable, `message` is `None`;
/// * a **diagnostic**: the device answered with a message (e.g. `"High"`,
///   `"Err 02"`). Only `message` is set;
/// * a **timeout**: nothing arrived. Only `message` is set, to
///   [`CONNECTION_TIMEOUT_MESSAGE`].
///
/// `mode` is only ever set for readings decoded from the extended reply format.
/// The value is kept as the string the device sent (sign and digits, spaces
/// removed); see [`value_as_f64`](Self::value_as_f64) for a numeric view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Measurement {
    /// Mode identifier from the 6-character prefix of an extended reply.
    pub mode: Option<String>,
    /// Sign followed by the digits of the reading, e.g. `"-3.456"`.
    pub value: Option<String>,
    /// Unit of a stable reading, e.g. `"g"` or `"mg"`.
    pub unit: Option<String>,
    /// Whether the device reported a settled reading. `None` for diagnostics
    /// and timeouts.
    pub stable: Option<bool>,
    /// Diagnostic text from the device, or the timeout marker.
    pub message: Option<String>,
    /// `true` when the reply carried a bracketed calibration digit
    /// (e.g. `123.4567[8]`). The brackets are never part of `value`.
    pub calibration_note: bool,
}

impl Measurement {
    /// Builds a reading. `stable` follows from the presence of a unit.
    pub(crate) fn reading(
        mode: Option<String>,
        value: String,
        unit: Option<String>,
        calibration_note: bool,
    ) -> Self {
        Measurement {
            mode,
            value: Some(value),
            stable: Some(unit.is_some()),
            unit,
            message: None,
            calibration_note,
        }
    }

    /// Builds a diagnostic result carrying only the device's message.
    pub(crate) fn diagnostic(message: &str) -> Self {
        Measurement {
            message: Some(String::from(message)),
            ..Default::default()
        }
    }

    /// The result reported when no reply line arrived at all.
    pub fn timeout() -> Self {
        Measurement {
            message: Some(String::from(CONNECTION_TIMEOUT_MESSAGE)),
            ..Default::default()
        }
    }

    /// `true` for the synthesized no-reply result.
    pub fn is_timeout(&self) -> bool {
        self.value.is_none() && self.message.as_deref() == Some(CONNECTION_TIMEOUT_MESSAGE)
    }

    /// `true` when the device answered with a message instead of a reading.
    pub fn is_diagnostic(&self) -> bool {
        self.message.is_some() && !self.is_timeout()
    }

    /// `true` for a settled reading with a unit.
    pub fn is_stable(&self) -> bool {
        self.stable == Some(true)
    }

    /// Parses the value string as a float.
    ///
    /// Returns `None` for diagnostics, timeouts and values that are not
    /// numbers (the device protocol does not guarantee they are).
    pub fn value_as_f64(&self) -> Option<f64> {
        self.value.as_deref()?.parse::<f64>().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_measurement() {
        let m = Measurement::timeout();
        assert_eq!(m.message.as_deref(), Some("Connection Timeout"));
        assert_eq!(m.mode, None);
        assert_eq!(m.value, None);
        assert_eq!(m.unit, None);
        assert_eq!(m.stable, None);
        assert!(!m.calibration_note);
        assert!(m.is_timeout());
        assert!(!m.is_diagnostic());
        assert!(!m.is_stable());
    }

    #[test]
    fn test_diagnostic_measurement() {
        let m = Measurement::diagnostic("Err 54");
        assert!(m.is_diagnostic());
        assert!(!m.is_timeout());
        assert_eq!(m.stable, None);
        assert_eq!(m.value_as_f64(), None);
    }

    #[test]
    fn test_reading_stability_follows_unit() {
        let stable = Measurement::reading(None, "1.5".into(), Some("g".into()), false);
        assert_eq!(stable.stable, Some(true));
        assert!(stable.is_stable());

        let unstable = Measurement::reading(None, "1.5".into(), None, false);
        assert_eq!(unstable.stable, Some(false));
        assert!(!unstable.is_stable());
    }

    #[test]
    fn test_value_as_f64() {
        let m = Measurement::reading(None, "-3.456".into(), Some("mg".into()), false);
        assert_eq!(m.value_as_f64(), Some(-3.456));

        let m = Measurement::reading(None, "+123.45678".into(), Some("g".into()), false);
        assert_eq!(m.value_as_f64(), Some(123.45678));

        let m = Measurement::reading(None, "abc".into(), None, false);
        assert_eq!(m.value_as_f64(), None);
    }
}
