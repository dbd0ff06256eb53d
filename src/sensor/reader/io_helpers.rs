// src/sensor/reader/io_helpers.rs

use crate::common::{
    hal_traits::{ByteSource, DustClock, DustSerial},
    timing,
};
use core::time::Duration;
use embedded_hal::delay::DelayNs;

/// Adapts a non-blocking byte-at-a-time UART into a blocking [`ByteSource`].
///
/// `read` polls `read_byte` until the buffer is full or the deadline passes,
/// sleeping [`timing::IDLE_POLL_DELAY`] between empty polls.
#[derive(Debug)]
pub struct NbByteSource<IF> {
    interface: IF,
}

impl<IF> NbByteSource<IF>
where
    IF: DustSerial + DustClock + DelayNs,
{
    pub fn new(interface: IF) -> Self {
        NbByteSource { interface }
    }

    pub fn interface(&self) -> &IF {
        &self.interface
    }

    pub fn into_inner(self) -> IF {
        self.interface
    }
}

impl<IF> ByteSource for NbByteSource<IF>
where
    IF: DustSerial + DustClock + DelayNs,
{
    type Error = IF::Error;

    fn read(&mut self, buf: &mut [u8], timeout: Duration) -> Result<usize, Self::Error> {
        let deadline = self.interface.now() + timeout;
        let mut bytes_read = 0;

        while bytes_read < buf.len() {
            match self.interface.read_byte() {
                Ok(byte) => {
                    buf[bytes_read] = byte;
                    bytes_read += 1;
                }
                Err(nb::Error::WouldBlock) => {
                    if self.interface.now() >= deadline {
                        break; // short read is fine
                    }
                    self.interface.delay_us(timing::IDLE_POLL_DELAY.as_micros() as u32);
                }
                Err(nb::Error::Other(e)) => return Err(e),
            }
        }

        Ok(bytes_read)
    }
}
