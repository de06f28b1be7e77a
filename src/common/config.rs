// src/common/config.rs

use core::time::Duration;

use super::timing;

/// Runtime settings of a [`SyncBalance`](crate::balance::SyncBalance).
///
/// `Default` gives the values from [`timing`]; override single fields with
/// struct update syntax:
///
/// ```
/// use core::time::Duration;
/// use sbi_balance::BalanceConfig;
///
/// let config = BalanceConfig { read_timeout: Duration::from_secs(3), ..Default::default() };
/// assert_eq!(config.max_lines, 8);
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct BalanceConfig {
    /// Time to wait for the first byte of a line before reporting "no line".
    pub read_timeout: Duration,
    /// Time to wait for each following byte of a line that has started.
    pub inter_byte_timeout: Duration,
    /// Time to wait for the transmitter to accept a byte.
    pub write_timeout: Duration,
    /// Time to wait for the transmit buffer to drain.
    pub flush_timeout: Duration,
    /// Delay between polls of the non-blocking interface, in microseconds.
    pub poll_interval_us: u32,
    /// Maximum number of lines collected by a single `read_lines` call.
    pub max_lines: usize,
}

impl Default for BalanceConfig {
    fn default() -> Self {
        BalanceConfig {
            read_timeout: timing::READ_TIMEOUT,
            inter_byte_timeout: timing::INTER_BYTE_TIMEOUT,
            write_timeout: timing::WRITE_TIMEOUT,
            flush_timeout: timing::FLUSH_TIMEOUT,
            poll_interval_us: timing::POLL_INTERVAL_US,
            max_lines: timing::MAX_REPLY_LINES,
        }
    }
}

impl BalanceConfig {
    /// Returns a copy with a different read timeout.
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }
}
