// src/balance/sync_balance/mock.rs

use crate::common::hal_traits::{BalanceSerial, BalanceTimer};
use core::time::Duration;
use nb::Result as NbResult;
use std::collections::VecDeque;

// --- Mock Instant ---
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct MockInstant(u64);

impl core::ops::Add<Duration> for MockInstant {
    type Output = Self;
    fn add(self, rhs: Duration) -> Self {
        MockInstant(self.0.saturating_add(rhs.as_micros() as u64))
    }
}

impl core::ops::Sub<MockInstant> for MockInstant {
    type Output = Duration;
    fn sub(self, rhs: MockInstant) -> Duration {
        Duration::from_micros(self.0.saturating_sub(rhs.0))
    }
}

// --- Mock Comm Error ---
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct MockCommError;

// --- Mock Interface ---
/// Serial port with a simulated clock. Staged bytes are available
/// immediately; once they run out every read blocks until the caller's
/// timeout expires.
#[derive(Debug, Default)]
pub(crate) struct MockInterface {
    current_time_us: u64,
    read_queue: VecDeque<u8>,
    write_log: Vec<u8>,
    pub flush_count: u32,
    pub fail_reads: bool,
    pub fail_writes: bool,
}

impl MockInterface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage_read_data(&mut self, data: &[u8]) {
        self.read_queue.extend(data.iter().copied());
    }

    pub fn advance_time(&mut self, us: u64) {
        self.current_time_us = self.current_time_us.saturating_add(us);
    }

    pub fn written(&self) -> &[u8] {
        &self.write_log
    }

    /// Simulated time since the mock was created.
    pub fn elapsed(&self) -> Duration {
        Duration::from_micros(self.current_time_us)
    }
}

impl BalanceTimer for MockInterface {
    type Instant = MockInstant;
    fn now(&self) -> Self::Instant {
        MockInstant(self.current_time_us)
    }
    fn delay_us(&mut self, us: u32) {
        self.advance_time(us as u64);
    }
}

impl BalanceSerial for MockInterface {
    type Error = MockCommError;

    fn read_byte(&mut self) -> NbResult<u8, Self::Error> {
        if self.fail_reads {
            return Err(nb::Error::Other(MockCommError));
        }
        self.read_queue.pop_front().ok_or(nb::Error::WouldBlock)
    }

    fn write_byte(&mut self, byte: u8) -> NbResult<(), Self::Error> {
        if self.fail_writes {
            return Err(nb::Error::Other(MockCommError));
        }
        self.write_log.push(byte);
        Ok(())
    }

    fn flush(&mut self) -> NbResult<(), Self::Error> {
        self.flush_count += 1;
        Ok(())
    }
}
