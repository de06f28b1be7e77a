// src/common/measurement/calibration.rs

use alloc::borrow::Cow;

/// Data segment with the calibration brackets removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized<'a> {
    /// Segment ready for fixed-column decoding.
    pub data: Cow<'a, str>,
    /// `true` if an opening bracket was found.
    pub annotated: bool,
}

/// Strips the bracket notation the balance uses to mark a digit that was
/// added by an internal adjustment, e.g. `123.4567[8]g`.
///
/// Every `[` is deleted and every `]` becomes two spaces, so the segment keeps
/// the column layout of a plain reply (`123.45678  g`). Closing brackets are
/// only rewritten when an opening bracket is present. Segments without `[`
/// are returned borrowed and unchanged.
pub fn normalize_calibration_note(segment: &str) -> Normalized<'_> {
    if segment.contains('[') {
        let data = segment.replace('[', "").replace(']', "  ");
        Normalized { data: Cow::Owned(data), annotated: true }
    } else {
        Normalized { data: Cow::Borrowed(segment), annotated: false }
    }
}
