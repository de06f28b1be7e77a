// src/balance/sync_balance/mod.rs

use crate::common::{
    command::{frame_raw, Command, Environment, InfoKind},
    config::BalanceConfig,
    error::BalanceError,
    hal_traits::{BalanceSerial, BalanceTimer},
    measurement::{parse_measurement, Measurement},
};
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt::Debug;
use log::{debug, warn};

mod io_helpers;
#[cfg(test)]
mod mock;

/// A balance connected over a serial interface, driven with blocking calls.
///
/// The client owns the interface for its whole lifetime; [`release`](Self::release)
/// hands it back. Only one command is in flight at a time.
#[derive(Debug)]
pub struct SyncBalance<IF> {
    interface: IF,
    config: BalanceConfig,
}

impl<IF> SyncBalance<IF>
where
    IF: BalanceSerial + BalanceTimer,
    IF::Error: Debug,
{
    pub fn new(interface: IF, config: BalanceConfig) -> Self {
        SyncBalance { interface, config }
    }

    /// Creates a client with [`BalanceConfig::default`].
    pub fn with_defaults(interface: IF) -> Self {
        Self::new(interface, BalanceConfig::default())
    }

    /// Gives back the underlying interface.
    pub fn release(self) -> IF {
        self.interface
    }

    pub fn interface(&self) -> &IF {
        &self.interface
    }

    pub fn interface_mut(&mut self) -> &mut IF {
        &mut self.interface
    }

    pub fn config(&self) -> &BalanceConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: BalanceConfig) {
        self.config = config;
    }

    // --- Sending ---

    /// Sends a command wrapped in the `ESC ... CR LF` envelope.
    pub fn send(&mut self, command: &Command) -> Result<(), BalanceError<IF::Error>> {
        let frame = command.format_into().map_err(BalanceError::CommandFormatFailed)?;
        debug!("sending command {}", command);
        self.send_command_bytes(&frame)
    }

    /// Sends a code that has no [`Command`] variant, e.g. a vendor extension.
    pub fn send_raw(&mut self, code: &[u8]) -> Result<(), BalanceError<IF::Error>> {
        let frame = frame_raw(code).map_err(BalanceError::CommandFormatFailed)?;
        debug!("sending raw command {:?}", code);
        self.send_command_bytes(&frame)
    }

    // --- Receiving ---

    /// Reads one line from the balance.
    ///
    /// Returns `Ok(None)` if nothing arrived within the read timeout. A line
    /// that was started but not terminated in time is returned as received.
    /// The line terminator is removed; all other characters, including
    /// padding spaces, are kept.
    pub fn read_line(&mut self) -> Result<Option<String>, BalanceError<IF::Error>> {
        let mut buffer = io_helpers::LineBuffer::new();
        if !self.read_line_bytes(&mut buffer)? {
            return Ok(None);
        }
        decode_line(&buffer).map(Some)
    }

    /// Reads the lines of one reply.
    ///
    /// The device ends a reply with a blank line; collection also stops at a
    /// read timeout or after `max_lines` lines. An empty result means the
    /// balance did not answer.
    ///
    /// Lines past `max_lines`, and the rest of a reply containing a line that
    /// is too long or not ASCII, are read and dropped so the next command
    /// starts on a clean line.
    pub fn read_lines(&mut self) -> Result<Vec<String>, BalanceError<IF::Error>> {
        let mut lines = Vec::new();
        while lines.len() < self.config.max_lines {
            match self.read_line() {
                Ok(Some(line)) if !line.trim().is_empty() => lines.push(line),
                Ok(_) => {
                    debug!("received {} line(s)", lines.len());
                    return Ok(lines);
                }
                Err(
                    e @ (BalanceError::BufferOverflow { .. } | BalanceError::InvalidCharacter(_)),
                ) => {
                    warn!("dropping reply after unreadable line: {:?}", e);
                    self.discard_reply()?;
                    return Err(e);
                }
                Err(e) => return Err(e),
            }
        }

        let dropped = self.discard_reply()?;
        if dropped > 0 {
            warn!("dropped {} line(s) past the limit of {}", dropped, self.config.max_lines);
        }
        debug!("received {} line(s)", lines.len());
        Ok(lines)
    }

    /// Reads up to `count` bytes as they arrive, without line handling.
    ///
    /// Waits the read timeout for the first byte and the inter-byte timeout
    /// after that; a short (or empty) result means the data stopped.
    pub fn read_bytes(&mut self, count: usize) -> Result<Vec<u8>, BalanceError<IF::Error>> {
        self.read_raw_bytes(count)
    }

    /// Sends a command and returns the lines of the reply.
    pub fn get(&mut self, command: &Command) -> Result<Vec<String>, BalanceError<IF::Error>> {
        self.send(command)?;
        self.read_lines()
    }

    /// Like [`get`](Self::get) for a raw code.
    pub fn get_raw(&mut self, code: &[u8]) -> Result<Vec<String>, BalanceError<IF::Error>> {
        self.send_raw(code)?;
        self.read_lines()
    }

    // --- Measuring ---

    /// Requests a reading and decodes the first reply line.
    ///
    /// If the balance does not answer at all, the result is
    /// [`Measurement::timeout`]; this is not an error.
    pub fn measure(&mut self) -> Result<Measurement, BalanceError<IF::Error>> {
        let lines = self.get(&Command::Print)?;
        match lines.first() {
            Some(line) => {
                let measurement = parse_measurement(line);
                debug!("measurement {:?} from {:?}", measurement, line);
                Ok(measurement)
            }
            None => {
                warn!("no reply to print command within {:?}", self.config.read_timeout);
                Ok(Measurement::timeout())
            }
        }
    }

    /// Queries an identification string, trimmed. `None` if the balance did
    /// not answer.
    pub fn info(&mut self, kind: InfoKind) -> Result<Option<String>, BalanceError<IF::Error>> {
        let lines = self.get(&Command::Info(kind))?;
        Ok(lines.first().map(|line| line.trim().to_string()))
    }

    // --- Fire-and-forget commands ---

    pub fn tare(&mut self) -> Result<(), BalanceError<IF::Error>> {
        self.send(&Command::Tare)
    }

    pub fn explicit_tare(&mut self) -> Result<(), BalanceError<IF::Error>> {
        self.send(&Command::ExplicitTare)
    }

    pub fn zero(&mut self) -> Result<(), BalanceError<IF::Error>> {
        self.send(&Command::ExplicitZero)
    }

    pub fn set_filter(&mut self, environment: Environment) -> Result<(), BalanceError<IF::Error>> {
        self.send(&Command::Filter(environment))
    }

    pub fn lock_keyboard(&mut self) -> Result<(), BalanceError<IF::Error>> {
        self.send(&Command::KeyboardLock)
    }

    pub fn unlock_keyboard(&mut self) -> Result<(), BalanceError<IF::Error>> {
        self.send(&Command::KeyboardUnlock)
    }

    pub fn beep(&mut self) -> Result<(), BalanceError<IF::Error>> {
        self.send(&Command::Beep)
    }

    pub fn restart(&mut self) -> Result<(), BalanceError<IF::Error>> {
        self.send(&Command::Restart)
    }

    pub fn adjust_internal(&mut self) -> Result<(), BalanceError<IF::Error>> {
        self.send(&Command::AdjustInternal)
    }

    pub fn adjust_external(&mut self) -> Result<(), BalanceError<IF::Error>> {
        self.send(&Command::AdjustExternal)
    }
}

/// Turns a received line into text, dropping the terminator.
///
/// The device talks plain ASCII; any other byte is rejected.
fn decode_line<E: Debug>(bytes: &[u8]) -> Result<String, BalanceError<E>> {
    let bytes = bytes.strip_suffix(b"\n").unwrap_or(bytes);
    let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);

    if let Some(&invalid) = bytes.iter().find(|b| !b.is_ascii()) {
        return Err(BalanceError::InvalidCharacter(invalid));
    }
    Ok(bytes.iter().map(|&b| b as char).collect())
}
