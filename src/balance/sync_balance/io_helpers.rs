// src/balance/sync_balance/io_helpers.rs

use super::SyncBalance;
use alloc::vec::Vec;
use crate::common::{
    error::BalanceError,
    hal_traits::{BalanceSerial, BalanceTimer},
    timing,
};
use core::fmt::Debug;
use core::time::Duration;
use log::trace;
use nb::Result as NbResult;

/// Raw bytes of one received line, terminator included.
pub(super) type LineBuffer = heapless::Vec<u8, { timing::LINE_BUFFER_CAPACITY }>;

// Implementation block for I/O related helpers
impl<IF> SyncBalance<IF>
where
    IF: BalanceSerial + BalanceTimer,
    IF::Error: Debug,
{
    /// Executes a non-blocking I/O operation (`f`) repeatedly until it
    /// stops returning `WouldBlock`, returning the final result or a timeout error.
    pub(super) fn execute_blocking_io_with_timeout<FN, T>(
        &mut self,
        timeout: Duration,
        mut f: FN,
    ) -> Result<T, BalanceError<IF::Error>>
    where
        FN: FnMut(&mut IF) -> NbResult<T, IF::Error>,
    {
        let deadline = self.interface.now() + timeout;

        loop {
            match f(&mut self.interface) {
                Ok(result) => return Ok(result),
                Err(nb::Error::WouldBlock) => {
                    if self.interface.now() >= deadline {
                        return Err(BalanceError::Timeout);
                    }
                    self.interface.delay_us(self.config.poll_interval_us);
                }
                Err(nb::Error::Other(e)) => return Err(BalanceError::Io(e)),
            }
        }
    }

    /// Writes an already framed command and waits for the transmitter to drain.
    pub(super) fn send_command_bytes(
        &mut self,
        cmd_bytes: &[u8],
    ) -> Result<(), BalanceError<IF::Error>> {
        let write_timeout = self.config.write_timeout;
        for byte in cmd_bytes {
            self.execute_blocking_io_with_timeout(write_timeout, |iface| {
                iface.write_byte(*byte)
            })?;
        }

        let flush_timeout = self.config.flush_timeout;
        self.execute_blocking_io_with_timeout(flush_timeout, |iface| iface.flush())?;
        Ok(())
    }

    /// Reads bytes into `buffer` up to and including `LF`.
    ///
    /// Returns `Ok(false)` if no byte arrived within the read timeout. If the
    /// line stalls after its first byte, the bytes received so far count as
    /// the line (`Ok(true)`). A line longer than the buffer is read to its
    /// end and dropped before `BufferOverflow` is returned.
    pub(super) fn read_line_bytes(
        &mut self,
        buffer: &mut LineBuffer,
    ) -> Result<bool, BalanceError<IF::Error>> {
        loop {
            // Shorter timeout once the line has started
            let timeout = if buffer.is_empty() {
                self.config.read_timeout
            } else {
                self.config.inter_byte_timeout
            };

            match self.execute_blocking_io_with_timeout(timeout, |iface| iface.read_byte()) {
                Ok(byte) => {
                    if buffer.push(byte).is_err() {
                        let needed = buffer.len() + 1;
                        if byte != b'\n' {
                            self.discard_rest_of_line()?;
                        }
                        return Err(BalanceError::BufferOverflow {
                            needed,
                            got: buffer.capacity(),
                        });
                    }
                    if byte == b'\n' {
                        trace!("line complete after {} bytes", buffer.len());
                        return Ok(true);
                    }
                }
                Err(BalanceError::Timeout) => {
                    if buffer.is_empty() {
                        trace!("no data within {:?}", timeout);
                        return Ok(false);
                    }
                    trace!("line stalled after {} bytes", buffer.len());
                    return Ok(true);
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Drops bytes up to and including the next `LF`, or until the line stalls.
    fn discard_rest_of_line(&mut self) -> Result<(), BalanceError<IF::Error>> {
        let timeout = self.config.inter_byte_timeout;
        loop {
            match self.execute_blocking_io_with_timeout(timeout, |iface| iface.read_byte()) {
                Ok(b'\n') | Err(BalanceError::Timeout) => return Ok(()),
                Ok(_) => {}
                Err(e) => return Err(e),
            }
        }
    }

    /// Drops the remaining lines of a reply, up to its blank end line or a
    /// read timeout. Returns how many non-blank lines were dropped.
    pub(super) fn discard_reply(&mut self) -> Result<usize, BalanceError<IF::Error>> {
        let mut discarded = 0;
        loop {
            let mut buffer = LineBuffer::new();
            match self.read_line_bytes(&mut buffer) {
                Ok(false) => break,
                Ok(true) if buffer.iter().all(|b| b.is_ascii_whitespace()) => break,
                Ok(true) | Err(BalanceError::BufferOverflow { .. }) => discarded += 1,
                Err(e) => return Err(e),
            }
        }
        trace!("discarded {} line(s)", discarded);
        Ok(discarded)
    }

    /// Reads up to `count` raw bytes.
    ///
    /// Waits the read timeout for the first byte and the inter-byte timeout
    /// for each following one; fewer bytes are returned if the data stops.
    pub(super) fn read_raw_bytes(
        &mut self,
        count: usize,
    ) -> Result<Vec<u8>, BalanceError<IF::Error>> {
        let mut bytes = Vec::with_capacity(count);
        while bytes.len() < count {
            let timeout = if bytes.is_empty() {
                self.config.read_timeout
            } else {
                self.config.inter_byte_timeout
            };
            match self.execute_blocking_io_with_timeout(timeout, |iface| iface.read_byte()) {
                Ok(byte) => bytes.push(byte),
                Err(BalanceError::Timeout) => break,
                Err(e) => return Err(e),
            }
        }
        Ok(bytes)
    }
}
