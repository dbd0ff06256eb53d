// src/host/mod.rs

// Host-side pieces: real serial port and TOML configuration.

pub mod config;
pub mod serial_port;

pub use config::{Config, ConfigError, DensityMode};
pub use serial_port::{SerialSource, TimeoutRead};

use crate::sensor::SensorSession;

#[derive(Debug, thiserror::Error)]
pub enum OpenError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to open serial port {port}: {source}")]
    Port {
        port: String,
        #[source]
        source: serialport::Error,
    },
}

/// Opens the configured serial port and builds a session around it.
///
/// Everything that can be wrong with the configuration is reported here,
/// before the first poll.
pub fn open_session(config: &Config) -> Result<SensorSession<SerialSource>, OpenError> {
    config.validate()?;
    let model = config.density_model()?;
    let serial = &config.serial;

    let source = SerialSource::open(&serial.port, serial.baud_rate, serial.timeout()).map_err(|source| {
        OpenError::Port {
            port: serial.port.clone(),
            source,
        }
    })?;

    tracing::info!(
        port = %serial.port,
        mode = ?config.density.mode,
        policy = ?model.policy(),
        timeout_ms = serial.timeout_ms,
        "sensor session ready"
    );
    Ok(SensorSession::with_timeout(source, model, serial.timeout()))
}
