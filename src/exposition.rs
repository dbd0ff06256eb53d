// src/exposition.rs

//! Gauges reported for each poll.

use crate::common::types::PollOutcome;
use arrayvec::ArrayVec;

/// Content type of the text exposition format.
pub const CONTENT_TYPE: &str = "text/plain; version=0.0.4";

pub const DUST_DENSITY: Gauge = Gauge {
    name: "dust_density",
    help: "dust density value of GP2Y1051AU0F",
};
pub const VOUT: Gauge = Gauge { name: "vout", help: "Vout value" };
pub const K: Gauge = Gauge { name: "k", help: "k coefficient" };
pub const FRAME_AVAILABLE: Gauge = Gauge {
    name: "frame_available",
    help: "1 if a complete frame was read on this scrape, 0 otherwise",
};

/// Every gauge the exporter can report.
pub const GAUGES: [Gauge; 4] = [DUST_DENSITY, VOUT, K, FRAME_AVAILABLE];

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Gauge {
    pub name: &'static str,
    pub help: &'static str,
}

#[cfg(feature = "exporter")]
impl Gauge {
    /// Registers the help text with the current `metrics` recorder.
    pub fn describe(&self) {
        metrics::describe_gauge!(self.name, self.help);
    }
}

/// Gauge values for one poll.
///
/// An unavailable poll only reports `frame_available 0`; the measurement
/// gauges are left out instead of repeating stale values.
pub fn gauge_values(outcome: &PollOutcome) -> ArrayVec<(Gauge, f64), 4> {
    let mut values = ArrayVec::new();
    match outcome {
        PollOutcome::Reading(reading) => {
            values.push((DUST_DENSITY, reading.density));
            values.push((VOUT, reading.vout.as_f64()));
            values.push((K, reading.k));
            values.push((FRAME_AVAILABLE, 1.0));
        }
        PollOutcome::Unavailable => values.push((FRAME_AVAILABLE, 0.0)),
    }
    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::types::{Reading, Vout};

    #[test]
    fn test_values_for_reading() {
        let outcome = PollOutcome::Reading(Reading {
            vout: Vout::from_ten_thousandths(4736),
            k: 3000.0,
            density: 1420.0,
        });
        let values = gauge_values(&outcome);
        assert_eq!(values.len(), 4);
        assert_eq!(values[0], (DUST_DENSITY, 1420.0));
        assert_eq!(values[1].0, VOUT);
        assert!((values[1].1 - 0.4736).abs() < 1e-12);
        assert_eq!(values[2], (K, 3000.0));
        assert_eq!(values[3], (FRAME_AVAILABLE, 1.0));
    }

    #[test]
    fn test_values_for_unavailable() {
        let values = gauge_values(&PollOutcome::Unavailable);
        assert_eq!(values.as_slice(), &[(FRAME_AVAILABLE, 0.0)]);
    }

    #[test]
    fn test_gauge_names_are_unique() {
        for (i, a) in GAUGES.iter().enumerate() {
            for b in &GAUGES[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
    }
}
