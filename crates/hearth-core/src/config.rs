use anyhow::Result;
use config::{Config, ConfigBuilder, FileFormat, builder::DefaultState};
use serde::Deserialize;

use crate::error::{CoreError, CoreResult};

/// Default number of occurrences materialized per series and window.
pub const DEFAULT_EXPANSION_CAP: usize = 50;

/// Default multiplier applied to a generator limit to obtain its iteration ceiling.
pub const DEFAULT_CEILING_FACTOR: usize = 100;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub recurrence: RecurrenceConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RecurrenceConfig {
    /// Upper bound on occurrences generated for one series per expansion.
    pub expansion_cap: usize,
    /// The generator gives up after `limit * ceiling_factor` iterations.
    pub ceiling_factor: usize,
}

impl Default for RecurrenceConfig {
    fn default() -> Self {
        Self {
            expansion_cap: DEFAULT_EXPANSION_CAP,
            ceiling_factor: DEFAULT_CEILING_FACTOR,
        }
    }
}

impl RecurrenceConfig {
    /// ## Summary
    /// Rejects bounds that would stop every series from expanding.
    ///
    /// ## Errors
    /// Returns `CoreError::InvalidConfiguration` if either bound is zero.
    pub fn validate(&self) -> CoreResult<()> {
        if self.expansion_cap == 0 {
            return Err(CoreError::InvalidConfiguration(
                "recurrence.expansion_cap must be at least 1".to_string(),
            ));
        }
        if self.ceiling_factor == 0 {
            return Err(CoreError::InvalidConfiguration(
                "recurrence.ceiling_factor must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Settings {
    /// ## Summary
    /// Loads configuration from `.env`, an optional `hearth.toml` and `HEARTH__*`
    /// environment variables, in increasing order of precedence.
    ///
    /// ## Errors
    /// Returns an error if building, deserializing or validating the configuration fails.
    pub fn load() -> Result<Self> {
        let settings = Self::defaults()?
            // TOML file
            .add_source(config::File::with_name("hearth.toml").required(false))
            // Env vars, e.g. HEARTH__RECURRENCE__EXPANSION_CAP=80
            .add_source(
                config::Environment::with_prefix("HEARTH")
                    .prefix_separator("__")
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Settings>()?;

        settings.validate()?;
        Ok(settings)
    }

    /// ## Summary
    /// Builds settings from a TOML document layered over the defaults.
    ///
    /// ## Errors
    /// Returns an error if the document is malformed or fails validation.
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        let settings = Self::defaults()?
            .add_source(config::File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize::<Settings>()?;

        settings.validate()?;
        Ok(settings)
    }

    /// ## Summary
    /// Checks invariants that deserialization alone cannot express.
    ///
    /// ## Errors
    /// Returns `CoreError::InvalidConfiguration` if a recurrence bound is zero.
    pub fn validate(&self) -> CoreResult<()> {
        self.recurrence.validate()
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>> {
        Ok(Config::builder()
            .set_default("recurrence.expansion_cap", 50_i64)?
            .set_default("recurrence.ceiling_factor", 100_i64)?
            .set_default("logging.level", "info")?)
    }
}

/// ## Summary
/// Loads configuration from environment variables, `.env` and `hearth.toml`.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    if let Err(err) = dotenvy::dotenv() {
        tracing::trace!(error = %err, "No .env file loaded");
    }

    Settings::load()
}
