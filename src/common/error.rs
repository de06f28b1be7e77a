// src/common/error.rs

use super::command::CommandFormatError;

/// Errors raised while talking to the balance.
///
/// Reply *content* never produces an error: every received line decodes into a
/// [`Measurement`](super::Measurement). These variants cover the transport only.
#[derive(Debug, thiserror::Error)]
pub enum BalanceError<E = ()>
where
    E: core::fmt::Debug,
{
    /// Underlying I/O error from the HAL implementation.
    #[error("I/O error: {0:?}")]
    Io(E),

    /// Operation timed out.
    #[error("Operation timed out")]
    Timeout,

    /// A received byte is outside the ASCII range used by the device.
    #[error("Invalid character received: {0:#04x}")]
    InvalidCharacter(u8),

    /// Received line did not fit into the line buffer.
    #[error("Buffer overflow: needed {needed}, got {got}")]
    BufferOverflow { needed: usize, got: usize },

    /// Command could not be framed into the command buffer.
    #[error("Command formatting failed: {0}")]
    CommandFormatFailed(CommandFormatError),
}

// Allow mapping from underlying HAL error
impl<E: core::fmt::Debug> From<E> for BalanceError<E> {
    fn from(e: E) -> Self {
        BalanceError::Io(e)
    }
}
