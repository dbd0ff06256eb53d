// src/sensor/reader/mod.rs

mod io_helpers;

pub use io_helpers::NbByteSource;

use crate::common::{
    error::AirqError,
    frame::{locate_frame, Frame, READ_LEN},
    hal_traits::ByteSource,
    timing,
};
use arrayvec::ArrayVec;
use core::time::Duration;

/// Pulls bytes from a [`ByteSource`] and finds one frame per call.
///
/// Every call is self-contained: one read of up to [`READ_LEN`] bytes, scan
/// for the first START byte, keep nothing for the next call.
#[derive(Debug)]
pub struct FrameReader<S: ByteSource> {
    source: S,
    timeout: Duration,
}

impl<S: ByteSource> FrameReader<S> {
    pub fn new(source: S) -> Self {
        Self::with_timeout(source, timing::DEFAULT_READ_TIMEOUT)
    }

    pub fn with_timeout(source: S, timeout: Duration) -> Self {
        FrameReader { source, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Gives the source back.
    pub fn into_source(self) -> S {
        self.source
    }

    /// Reads once and returns the first complete frame in what arrived.
    ///
    /// `Ok(None)` means no frame this time: nothing read, no START byte, or a
    /// START byte too close to the end of the read. Only source failures are
    /// errors.
    pub fn read_frame(&mut self) -> Result<Option<Frame>, AirqError<S::Error>> {
        let raw = self.read_raw()?;
        tracing::trace!(len = raw.len(), bytes = ?raw.as_slice(), "raw read");

        if raw.is_empty() {
            tracing::debug!("source returned no bytes before timeout");
            return Ok(None);
        }

        match locate_frame(&raw) {
            Some(frame) => {
                if !frame.has_end_marker() {
                    tracing::debug!(end = frame.end_byte(), "frame END byte is not 0xFF, using frame anyway");
                }
                Ok(Some(frame))
            }
            None => {
                tracing::debug!(len = raw.len(), "no complete frame in read");
                Ok(None)
            }
        }
    }

    /// One blocking read into a fresh fixed-size buffer.
    fn read_raw(&mut self) -> Result<ArrayVec<u8, READ_LEN>, AirqError<S::Error>> {
        let mut buf = [0u8; READ_LEN];
        let n = self.source.read(&mut buf, self.timeout)?;

        let mut raw = ArrayVec::from(buf);
        raw.truncate(n);
        Ok(raw)
    }
}
