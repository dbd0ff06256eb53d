// src/common/types.rs

use core::fmt;

// --- Vout ---

/// Sensor output voltage, stored as an exact count of ten-thousandths of a volt.
///
/// Four decimal places is the resolution Vout is reported and compared at.
/// Keeping it as an integer makes equality and the K table lookup exact.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Vout(u32);

impl Vout {
    /// Scale between volts and the stored integer.
    pub const SCALE: u32 = 10_000;

    pub const ZERO: Vout = Vout(0);

    /// From a count of 0.0001 V steps.
    #[inline]
    pub const fn from_ten_thousandths(value: u32) -> Self {
        Vout(value)
    }

    #[inline]
    pub const fn as_ten_thousandths(&self) -> u32 {
        self.0
    }

    #[inline]
    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / Self::SCALE as f64
    }
}

impl fmt::Display for Vout {
    /// Always four decimals, e.g. `0.4736`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:04}", self.0 / Self::SCALE, self.0 % Self::SCALE)
    }
}

// --- Reading ---

/// One computed measurement: the decoded voltage, the K used and the resulting
/// dust density in µg/m³.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Reading {
    pub vout: Vout,
    pub k: f64,
    pub density: f64,
}

/// Result of one poll of the sensor.
///
/// `Unavailable` is the normal outcome while the stream is not aligned to a
/// frame (or nothing arrived in time). It is not a fault.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PollOutcome {
    Reading(Reading),
    Unavailable,
}

impl PollOutcome {
    pub fn reading(&self) -> Option<&Reading> {
        match self {
            PollOutcome::Reading(r) => Some(r),
            PollOutcome::Unavailable => None,
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, PollOutcome::Unavailable)
    }
}
