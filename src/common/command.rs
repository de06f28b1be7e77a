//! Balance command definitions.
//!
//! Every command is a short ASCII code that the device expects wrapped in an
//! escape envelope: `ESC <code> CR LF`. The codes are opaque to this crate and
//! are passed through unchanged.

use core::fmt;

use arrayvec::ArrayVec;

/// Escape byte that opens every command envelope.
pub const ESC: u8 = 0x1B;
/// Carriage return.
pub const CR: u8 = b'\r';
/// Line feed.
pub const LF: u8 = b'\n';

/// Capacity of a framed command (envelope included).
pub const COMMAND_BUFFER_CAPACITY: usize = 16;
/// Bytes added around the code by the envelope.
const ENVELOPE_LEN: usize = 3;
/// Longest code that still fits into a [`CommandBuffer`].
pub const MAX_CODE_LEN: usize = COMMAND_BUFFER_CAPACITY - ENVELOPE_LEN;

/// A framed command ready to be written to the serial interface.
pub type CommandBuffer = ArrayVec<u8, COMMAND_BUFFER_CAPACITY>;

/// Represents a balance command.
///
/// The `Display` implementation renders the bare code (e.g. `P`, `x1_`), without
/// the envelope.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Command {
    /// Print the current reading (`P`). The reply is a measurement line.
    Print,
    /// Tare or zero, whichever the device decides (`T`).
    Tare,
    /// Explicit tare (`U`).
    ExplicitTare,
    /// Explicit zero (`V`).
    ExplicitZero,
    /// Identification query (`x1_`..`x5_`). The reply is a free-text line.
    Info(InfoKind),
    /// Adapt the measurement filter to the environment (`K`..`N`).
    Filter(Environment),
    /// Lock the keyboard (`O`).
    KeyboardLock,
    /// Unlock the keyboard (`R`).
    KeyboardUnlock,
    /// Simulate a press of the print key (`kP_`).
    KeypressPrint,
    /// Simulate a press of the cancel key (`s3_`).
    KeypressCancel,
    /// Acoustic signal (`Q`).
    Beep,
    /// Restart / self-test (`S`).
    Restart,
    /// Internal calibration and adjustment (`Z`).
    AdjustInternal,
    /// External calibration and adjustment (`W`).
    AdjustExternal,
}

/// Which identification string an [`Command::Info`] command asks for.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum InfoKind {
    /// Model designation (`x1_`).
    Type,
    /// Serial number (`x2_`).
    SerialNumber,
    /// Weighing cell software version (`x3_`).
    ScaleVersion,
    /// Control unit software version (`x4_`).
    ControlUnitVersion,
    /// User-defined identification (`x5_`).
    User,
}

/// Ambient conditions the balance filter is tuned for.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Environment {
    /// `K`
    VeryStable,
    /// `L`
    Stable,
    /// `M`
    Unstable,
    /// `N`
    VeryUnstable,
}

/// Error while framing a command into a [`CommandBuffer`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CommandFormatError {
    /// An empty code was given.
    Empty,
    /// The code does not fit into the command buffer.
    TooLong { len: usize, max: usize },
}

impl fmt::Display for CommandFormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandFormatError::Empty => f.write_str("empty command code"),
            CommandFormatError::TooLong { len, max } => {
                write!(f, "command code of {} bytes exceeds maximum of {}", len, max)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CommandFormatError {}

impl Command {
    /// Returns the raw code bytes sent inside the envelope.
    pub fn code(&self) -> &'static [u8] {
        match self {
            Command::Print => b"P",
            Command::Tare => b"T",
            Command::ExplicitTare => b"U",
            Command::ExplicitZero => b"V",
            Command::Info(kind) => kind.code(),
            Command::Filter(env) => env.code(),
            Command::KeyboardLock => b"O",
            Command::KeyboardUnlock => b"R",
            Command::KeypressPrint => b"kP_",
            Command::KeypressCancel => b"s3_",
            Command::Beep => b"Q",
            Command::Restart => b"S",
            Command::AdjustInternal => b"Z",
            Command::AdjustExternal => b"W",
        }
    }

    /// Frames the command as `ESC <code> CR LF`.
    pub fn format_into(&self) -> Result<CommandBuffer, CommandFormatError> {
        frame_raw(self.code())
    }
}

impl InfoKind {
    fn code(&self) -> &'static [u8] {
        match self {
            InfoKind::Type => b"x1_",
            InfoKind::SerialNumber => b"x2_",
            InfoKind::ScaleVersion => b"x3_",
            InfoKind::ControlUnitVersion => b"x4_",
            InfoKind::User => b"x5_",
        }
    }
}

impl Environment {
    fn code(&self) -> &'static [u8] {
        match self {
            Environment::VeryStable => b"K",
            Environment::Stable => b"L",
            Environment::Unstable => b"M",
            Environment::VeryUnstable => b"N",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Codes are static ASCII literals
        for &byte in self.code() {
            write!(f, "{}", byte as char)?;
        }
        Ok(())
    }
}

/// Frames an arbitrary command code as `ESC <code> CR LF`.
///
/// Used for codes that have no [`Command`] variant. The code is copied verbatim.
pub fn frame_raw(code: &[u8]) -> Result<CommandBuffer, CommandFormatError> {
    if code.is_empty() {
        return Err(CommandFormatError::Empty);
    }
    if code.len() > MAX_CODE_LEN {
        return Err(CommandFormatError::TooLong { len: code.len(), max: MAX_CODE_LEN });
    }

    let mut buffer = CommandBuffer::new();
    buffer.push(ESC);
    buffer.extend(code.iter().copied());
    buffer.push(CR);
    buffer.push(LF);
    Ok(buffer)
}
