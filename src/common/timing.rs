// src/common/timing.rs

use core::time::Duration;

// Nominal values for a balance on a USB/RS-232 link. The device answers a
// print command well within a second; anything slower is treated as no reply.

// === Reply Timing ===

/// Time allowed for the first byte of a reply line to arrive.
pub const READ_TIMEOUT: Duration = Duration::from_secs(1);
/// Maximum gap between two bytes of the same line.
pub const INTER_BYTE_TIMEOUT: Duration = Duration::from_millis(100);

// === Command Timing ===

/// Time allowed to hand a single byte to the transmitter.
pub const WRITE_TIMEOUT: Duration = Duration::from_millis(100);
/// Time allowed for the transmit buffer to drain after a command.
pub const FLUSH_TIMEOUT: Duration = Duration::from_millis(100);

// === Polling ===

/// Delay between two polls of a non-blocking operation, in microseconds.
pub const POLL_INTERVAL_US: u32 = 100;

// === Buffers ===

/// Longest reply line accepted (terminator included). Extended-format replies
/// are 22 bytes; info replies are somewhat longer.
pub const LINE_BUFFER_CAPACITY: usize = 64;
/// Maximum number of lines collected for a single reply.
pub const MAX_REPLY_LINES: usize = 8;
