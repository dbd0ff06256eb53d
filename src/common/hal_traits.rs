// src/common/hal_traits.rs

use core::fmt::Debug;
use core::ops::{Add, Sub};
use core::time::Duration;

/// Blocking byte source the frame reader pulls from.
///
/// `read` fills `buf` with up to `buf.len()` bytes and returns how many were
/// written. It may return fewer than requested, including zero when nothing
/// arrived before `timeout`. It must not block much longer than `timeout`.
/// An `Err` means the source itself is gone or unusable.
pub trait ByteSource {
    /// Associated error type for source failures.
    type Error: Debug;

    fn read(&mut self, buf: &mut [u8], timeout: Duration) -> Result<usize, Self::Error>;
}

impl<T: ByteSource + ?Sized> ByteSource for &mut T {
    type Error = T::Error;

    fn read(&mut self, buf: &mut [u8], timeout: Duration) -> Result<usize, Self::Error> {
        (**self).read(buf, timeout)
    }
}

/// Abstraction for non-blocking, byte-at-a-time serial reception (UART RX).
///
/// Used through [`NbByteSource`](crate::sensor::reader::NbByteSource), which
/// turns it into a [`ByteSource`] with a deadline.
pub trait DustSerial {
    /// Associated error type for communication errors.
    type Error: Debug;

    /// Takes the next received byte off the sensor's TX line, if one is waiting.
    ///
    /// `WouldBlock` just means the sensor has not sent the next byte yet; the
    /// caller keeps polling until its deadline. `Other` is a UART fault.
    fn read_byte(&mut self) -> nb::Result<u8, Self::Error>;
}

/// Monotonic time source for deadline tracking.
///
/// Waiting itself goes through `embedded_hal::delay::DelayNs`.
pub trait DustClock {
    type Instant: DustInstant;

    fn now(&self) -> Self::Instant;
}

/// Requirements on the instant type produced by a [`DustClock`].
pub trait DustInstant:
    Copy + PartialOrd + Add<Duration, Output = Self> + Sub<Self, Output = Duration>
{
}

impl<T> DustInstant for T where
    T: Copy + PartialOrd + Add<Duration, Output = T> + Sub<T, Output = Duration>
{
}
