// src/host/config.rs

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::common::{timing, AirqError};
use crate::sensor::density::{CoefficientModel, DensityModel, DensityPolicy};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("serial.port must not be empty")]
    EmptyPort,

    #[error("serial.baud_rate must be greater than zero")]
    ZeroBaudRate,

    #[error("serial.timeout_ms must be greater than zero")]
    ZeroTimeout,

    #[error("density.coefficient is required when density.mode = \"fixed\"")]
    MissingCoefficient,

    #[error("density.coefficient is only valid when density.mode = \"fixed\"")]
    UnexpectedCoefficient,

    #[error("invalid density settings: {0}")]
    Model(#[from] AirqError),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub serial: SerialConfig,
    #[serde(default)]
    pub density: DensityConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SerialConfig {
    /// Device path or name, e.g. `/dev/ttyS0` or `COM7`
    pub port: String,
    #[serde(default = "default_baud_rate")]
    pub baud_rate: u32,
    /// Upper bound for one read of the sensor, in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl SerialConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum DensityMode {
    #[default]
    Stepped,
    Fixed,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DensityConfig {
    #[serde(default)]
    pub mode: DensityMode,
    /// K for `mode = "fixed"`
    pub coefficient: Option<f64>,
    /// Defaults to truncate for stepped, precise for fixed
    pub policy: Option<DensityPolicy>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Address for the metrics HTTP server to listen on
    #[serde(default = "default_addr")]
    pub addr: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { addr: default_addr() }
    }
}

fn default_baud_rate() -> u32 {
    timing::BAUD_RATE
}

fn default_timeout_ms() -> u64 {
    timing::DEFAULT_READ_TIMEOUT.as_millis() as u64
}

fn default_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 9100))
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses and validates.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.serial.port.trim().is_empty() {
            return Err(ConfigError::EmptyPort);
        }
        if self.serial.baud_rate == 0 {
            return Err(ConfigError::ZeroBaudRate);
        }
        if self.serial.timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        self.density_model().map(|_| ())
    }

    /// The density model this configuration selects.
    pub fn density_model(&self) -> Result<DensityModel, ConfigError> {
        let density = &self.density;
        let (coefficients, default_policy) = match (density.mode, density.coefficient) {
            (DensityMode::Stepped, None) => (CoefficientModel::Stepped, DensityPolicy::Truncate),
            (DensityMode::Stepped, Some(_)) => return Err(ConfigError::UnexpectedCoefficient),
            (DensityMode::Fixed, Some(k)) => (CoefficientModel::Fixed(k), DensityPolicy::Precise),
            (DensityMode::Fixed, None) => return Err(ConfigError::MissingCoefficient),
        };
        let policy = density.policy.unwrap_or(default_policy);

        Ok(DensityModel::new(coefficients, policy)?)
    }
}
