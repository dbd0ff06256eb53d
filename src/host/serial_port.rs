// src/host/serial_port.rs

use crate::common::{hal_traits::ByteSource, timing};
use serialport::{DataBits, FlowControl, Parity, SerialPort, StopBits};
use std::io::{self, Read};
use std::time::{Duration, Instant};

/// A readable port whose read timeout can be changed between reads.
pub trait TimeoutRead: Read {
    fn set_read_timeout(&mut self, timeout: Duration) -> io::Result<()>;
}

impl TimeoutRead for Box<dyn SerialPort> {
    fn set_read_timeout(&mut self, timeout: Duration) -> io::Result<()> {
        self.set_timeout(timeout).map_err(io::Error::from)
    }
}

/// [`ByteSource`] over a host serial port.
///
/// `read` keeps reading until the buffer is full or the timeout has passed,
/// so a single call can span several UART bursts.
pub struct SerialSource<P: TimeoutRead = Box<dyn SerialPort>> {
    port: P,
}

impl SerialSource {
    /// Opens `path` at `baud_rate`, 8N1, no flow control.
    pub fn open(path: &str, baud_rate: u32, timeout: Duration) -> Result<Self, serialport::Error> {
        let port = serialport::new(path, baud_rate)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .flow_control(FlowControl::None)
            .timeout(timeout)
            .open()?;
        tracing::info!(port = path, baud_rate, "serial port opened");
        Ok(SerialSource { port })
    }

    /// Opens `path` with the sensor's default line settings.
    pub fn open_default(path: &str) -> Result<Self, serialport::Error> {
        Self::open(path, timing::BAUD_RATE, timing::DEFAULT_READ_TIMEOUT)
    }
}

impl<P: TimeoutRead> SerialSource<P> {
    pub fn from_port(port: P) -> Self {
        SerialSource { port }
    }

    pub fn into_port(self) -> P {
        self.port
    }
}

impl<P: TimeoutRead> ByteSource for SerialSource<P> {
    type Error = io::Error;

    fn read(&mut self, buf: &mut [u8], timeout: Duration) -> io::Result<usize> {
        let deadline = Instant::now() + timeout;
        let mut bytes_read = 0;

        while bytes_read < buf.len() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break;
            }
            self.port.set_read_timeout(remaining)?;

            match self.port.read(&mut buf[bytes_read..]) {
                Ok(0) => break,
                Ok(n) => bytes_read += n,
                Err(e) if e.kind() == io::ErrorKind::TimedOut => break,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }

        Ok(bytes_read)
    }
}

impl<P: TimeoutRead> std::fmt::Debug for SerialSource<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerialSource").finish_non_exhaustive()
    }
}
