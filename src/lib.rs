// src/lib.rs

#![cfg_attr(not(feature = "std"), no_std)] // core builds without std

pub mod common;
pub mod exposition;
pub mod sensor;

#[cfg(feature = "exporter")]
pub mod exporter;

#[cfg(feature = "std")]
pub mod host;

// Re-export key types for convenience
pub use common::{AirqError, ByteSource, Frame, PollOutcome, Reading, Vout};
pub use sensor::{DensityModel, SensorSession};
