// src/balance/std_interface.rs

//! Adapter for byte streams from the standard library.
//!
//! Serial port crates on hosted platforms expose their ports as
//! `std::io::Read + std::io::Write`, usually with a short read timeout.
//! [`StdInterface`] turns such a port into a [`BalanceSerial`] + [`BalanceTimer`]
//! pair, mapping "no data yet" conditions to `nb::Error::WouldBlock`.

use crate::common::hal_traits::{BalanceSerial, BalanceTimer};
use std::io::{self, Read, Write};
use std::time::Duration;

/// Clock used by [`StdInterface`].
pub type StdInstant = std::time::Instant;

/// Wraps a blocking `Read + Write` port.
#[derive(Debug)]
pub struct StdInterface<P> {
    port: P,
}

impl<P> StdInterface<P>
where
    P: Read + Write,
{
    pub fn new(port: P) -> Self {
        StdInterface { port }
    }

    /// Gives back the wrapped port.
    pub fn into_inner(self) -> P {
        self.port
    }
}

/// Errors that only mean "nothing available right now".
fn is_transient(error: &io::Error) -> bool {
    matches!(
        error.kind(),
        io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut | io::ErrorKind::Interrupted
    )
}

impl<P> BalanceSerial for StdInterface<P>
where
    P: Read + Write,
{
    type Error = io::Error;

    fn read_byte(&mut self) -> nb::Result<u8, Self::Error> {
        let mut byte = [0u8; 1];
        match self.port.read(&mut byte) {
            Ok(1) => Ok(byte[0]),
            Ok(_) => Err(nb::Error::WouldBlock),
            Err(e) if is_transient(&e) => Err(nb::Error::WouldBlock),
            Err(e) => Err(nb::Error::Other(e)),
        }
    }

    fn write_byte(&mut self, byte: u8) -> nb::Result<(), Self::Error> {
        match self.port.write(&[byte]) {
            Ok(1) => Ok(()),
            Ok(_) => Err(nb::Error::WouldBlock),
            Err(e) if is_transient(&e) => Err(nb::Error::WouldBlock),
            Err(e) => Err(nb::Error::Other(e)),
        }
    }

    fn flush(&mut self) -> nb::Result<(), Self::Error> {
        match self.port.flush() {
            Ok(()) => Ok(()),
            Err(e) if is_transient(&e) => Err(nb::Error::WouldBlock),
            Err(e) => Err(nb::Error::Other(e)),
        }
    }
}

impl<P> BalanceTimer for StdInterface<P> {
    type Instant = StdInstant;

    fn now(&self) -> Self::Instant {
        StdInstant::now()
    }

    fn delay_us(&mut self, us: u32) {
        std::thread::sleep(Duration::from_micros(us as u64));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::balance::SyncBalance;
    use crate::common::{BalanceConfig, BalanceError};
    use std::collections::VecDeque;

    /// In-memory port: reads from `input`, records writes in `output`.
    #[derive(Debug, Default)]
    struct Loopback {
        input: VecDeque<u8>,
        output: Vec<u8>,
        broken: bool,
    }

    impl Read for Loopback {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.broken {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "unplugged"));
            }
            self.input.read(buf)
        }
    }

    impl Write for Loopback {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.output.write(buf)
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn fast_config() -> BalanceConfig {
        BalanceConfig::default().with_read_timeout(Duration::from_millis(20))
    }

    #[test]
    fn test_measure_over_std_port() {
        let port = Loopback {
            input: b" 123.4567[8]g  \r\n\r\n".iter().copied().collect(),
            ..Default::default()
        };
        let mut balance = SyncBalance::new(StdInterface::new(port), fast_config());

        let m = balance.measure().unwrap();
        assert_eq!(m.value.as_deref(), Some("123.45678"));
        assert_eq!(m.unit.as_deref(), Some("g"));
        assert!(m.calibration_note);

        let port = balance.release().into_inner();
        assert_eq!(port.output, b"\x1bP\r\n");
    }

    #[test]
    fn test_empty_port_times_out() {
        let mut balance = SyncBalance::new(StdInterface::new(Loopback::default()), fast_config());
        assert!(balance.measure().unwrap().is_timeout());
    }

    #[test]
    fn test_port_error_is_reported() {
        let port = Loopback { broken: true, ..Default::default() };
        let mut balance = SyncBalance::new(StdInterface::new(port), fast_config());
        assert!(matches!(balance.measure(), Err(BalanceError::Io(_))));
    }
}
