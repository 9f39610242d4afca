use crate::domain::LocationSettings;
use crate::geocoding::GeocoderStrategy;
use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    core: Core,
    #[serde(default)]
    location: LocationSettings,
    geocoder: Geocoding,
}

impl AppConfig {
    /// Loads `config.toml`, overlaid by an optional `config_local.toml` and `WHEREABOUTS_*` environment variables.
    pub fn load() -> Result<Self, AppConfigError> {
        let config = Config::builder()
            .add_source(File::with_name("config").required(true))
            .add_source(File::with_name("config_local").required(false))
            .add_source(Environment::with_prefix("WHEREABOUTS").prefix_separator("_").separator("__").try_parsing(true))
            .build()?
            .try_deserialize::<AppConfig>()?;

        config.validated()
    }

    pub fn from_toml_str(toml: &str) -> Result<Self, AppConfigError> {
        let config = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize::<AppConfig>()?;

        config.validated()
    }

    fn validated(self) -> Result<Self, AppConfigError> {
        if self.core.event_buffer_size == 0 {
            return Err(AppConfigError::InvalidEventBufferSize);
        }

        if self.geocoder.poll_interval_ms == 0 {
            return Err(AppConfigError::InvalidPollInterval);
        }

        Ok(self)
    }

    pub fn core(&self) -> &Core {
        &self.core
    }

    pub fn location(&self) -> &LocationSettings {
        &self.location
    }

    pub fn geocoder(&self) -> &Geocoding {
        &self.geocoder
    }
}

#[derive(Debug, Deserialize)]
pub struct Core {
    event_buffer_size: usize,
}

impl Core {
    pub fn event_buffer_size(&self) -> usize {
        self.event_buffer_size
    }
}

#[derive(Debug, Deserialize)]
pub struct Geocoding {
    #[serde(default)]
    strategy: GeocoderStrategy,
    poll_interval_ms: u64,
}

impl Geocoding {
    pub fn strategy(&self) -> GeocoderStrategy {
        self.strategy
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

#[derive(Error, Debug)]
pub enum AppConfigError {
    #[error("could not load configuration: {0}")]
    Load(#[from] ConfigError),
    #[error("core.event_buffer_size must be at least 1")]
    InvalidEventBufferSize,
    #[error("geocoder.poll_interval_ms must be at least 1")]
    InvalidPollInterval,
}

#[cfg(test)]
pub struct AppConfigBuilder {
    config: AppConfig,
}

#[cfg(test)]
impl AppConfigBuilder {
    pub fn new() -> Self {
        AppConfigBuilder {
            config: AppConfig {
                core: Core { event_buffer_size: 16 },
                location: LocationSettings::default(),
                geocoder: Geocoding {
                    strategy: GeocoderStrategy::Completion,
                    poll_interval_ms: 1,
                },
            },
        }
    }

    pub fn strict_mode(mut self, strict_mode: bool) -> Self {
        self.config.location.strict_mode = strict_mode;
        self
    }

    pub fn reject_repeated_locations(mut self, reject_repeated_locations: bool) -> Self {
        self.config.location.reject_repeated_locations = reject_repeated_locations;
        self
    }

    pub fn build(self) -> AppConfig {
        self.config
    }
}
