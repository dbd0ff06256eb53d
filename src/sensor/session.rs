// src/sensor/session.rs

use super::decoder::decode;
use super::density::DensityModel;
use super::reader::FrameReader;
use crate::common::{
    error::AirqError,
    hal_traits::ByteSource,
    types::{PollOutcome, Reading},
};
use core::time::Duration;

/// Phases a single `poll` goes through. Only used for tracing, nothing is
/// kept between polls.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SessionState {
    Idle,
    Reading,
    Decoded,
    NoData,
}

/// Owns the sensor's byte source and the density model for its lifetime.
///
/// Dropping the session drops the source (closing the port for real serial
/// ports). Not meant for concurrent use: wrap it in a mutex if several
/// callers share one sensor.
#[derive(Debug)]
pub struct SensorSession<S: ByteSource> {
    reader: FrameReader<S>,
    model: DensityModel,
}

impl<S: ByteSource> SensorSession<S> {
    pub fn new(source: S, model: DensityModel) -> Self {
        SensorSession {
            reader: FrameReader::new(source),
            model,
        }
    }

    pub fn with_timeout(source: S, model: DensityModel, timeout: Duration) -> Self {
        SensorSession {
            reader: FrameReader::with_timeout(source, timeout),
            model,
        }
    }

    pub fn model(&self) -> &DensityModel {
        &self.model
    }

    pub fn read_timeout(&self) -> Duration {
        self.reader.timeout()
    }

    /// Ends the session and returns the source.
    pub fn into_source(self) -> S {
        self.reader.into_source()
    }

    /// Reads one measurement.
    ///
    /// Returns `Unavailable` when no complete frame was found in this read;
    /// call again later. Errors only when the source fails.
    pub fn poll(&mut self) -> Result<PollOutcome, AirqError<S::Error>> {
        tracing::trace!(state = ?SessionState::Idle, "poll start");
        tracing::trace!(state = ?SessionState::Reading, "reading frame");

        let read = self.reader.read_frame();
        if let Err(e) = &read {
            tracing::warn!(error = %e, "byte source read failed");
        }
        let Some(frame) = read? else {
            tracing::debug!(state = ?SessionState::NoData, "no measurement this cycle");
            return Ok(PollOutcome::Unavailable);
        };

        let vout = decode(&frame);
        let k = self.model.coefficient_for(vout);
        let density = self.model.density_with(k, vout);

        tracing::debug!(
            state = ?SessionState::Decoded,
            ?frame,
            %vout,
            k,
            density,
            "measurement decoded"
        );

        Ok(PollOutcome::Reading(Reading { vout, k, density }))
    }
}
