//! Ambient mapping configuration.
//!
//! Result mapping builders read two things from the surrounding
//! configuration: the global lazy-loading default and the converter
//! registry. Both are reached through the [`MappingContext`] trait so a
//! builder can be driven by [`MappingConfiguration`] or by any test double.
//!
//! Settings are loaded from `config/config.toml` (section `[mapping]`) or
//! from environment variables using [`MappingSettings::load()`].

use crate::converter::{ConverterRegistry, TypeConverterRegistry};
use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

const CONFIG_FILE: &str = "config/config.toml";
const ENV_PREFIX: &str = "RESULTMAP";

/// Read-only view of the configuration a result mapping is built against
pub trait MappingContext {
    /// Global lazy-loading default applied to new builders
    fn is_lazy_loading_enabled(&self) -> bool;

    /// Registry used to resolve implicit converters
    fn converter_registry(&self) -> &dyn ConverterRegistry;
}

/// Global mapping settings
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct MappingSettings {
    /// Whether nested mappings are resolved lazily unless they say otherwise
    #[serde(default)]
    pub lazy_loading_enabled: bool,
}

impl MappingSettings {
    /// Load the mapping settings from `config/config.toml`, falling back to env vars.
    ///
    /// Environment variables use the `RESULTMAP` prefix and `__` separator,
    /// e.g. `RESULTMAP__MAPPING__LAZY_LOADING_ENABLED=true`.
    pub fn load() -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"));

        let settings = match builder.build() {
            Ok(cfg) => cfg,
            Err(err) => {
                // The file existed but could not be read or parsed, retry with env only
                if std::path::Path::new(CONFIG_FILE).exists() {
                    log::warn!(
                        "Failed to load {}, falling back to environment: {}",
                        CONFIG_FILE,
                        err
                    );
                }
                Config::builder()
                    .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
                    .build()
                    .map_err(|env_err| {
                        ConfigError::Message(format!(
                            "Failed to load configuration from file and env: {}, \
                             then env-only error: {}",
                            err, env_err
                        ))
                    })?
            }
        };

        Self::from_config(&settings)
    }

    /// Parse the settings from an in-memory TOML document
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?;
        Self::from_config(&settings)
    }

    fn from_config(settings: &Config) -> Result<Self, ConfigError> {
        match settings.get::<MappingSettings>("mapping") {
            Ok(mapping) => Ok(mapping),
            // A missing section means all defaults
            Err(ConfigError::NotFound(_)) => Ok(Self::default()),
            Err(e) => Err(ConfigError::Message(format!(
                "Mapping configuration could not be loaded from file or environment: {}",
                e
            ))),
        }
    }
}

/// Settings plus converter registry: the standard [`MappingContext`]
#[derive(Debug, Clone)]
pub struct MappingConfiguration {
    settings: MappingSettings,
    registry: TypeConverterRegistry,
}

impl Default for MappingConfiguration {
    fn default() -> Self {
        Self::new(MappingSettings::default())
    }
}

impl MappingConfiguration {
    /// Create a configuration with the built-in converters registered
    pub fn new(settings: MappingSettings) -> Self {
        Self::with_registry(settings, TypeConverterRegistry::with_defaults())
    }

    pub fn with_registry(settings: MappingSettings, registry: TypeConverterRegistry) -> Self {
        Self { settings, registry }
    }

    pub fn settings(&self) -> &MappingSettings {
        &self.settings
    }

    pub fn set_lazy_loading_enabled(&mut self, enabled: bool) {
        self.settings.lazy_loading_enabled = enabled;
    }

    pub fn registry(&self) -> &TypeConverterRegistry {
        &self.registry
    }

    /// Mutable registry access, for registering custom converters
    pub fn registry_mut(&mut self) -> &mut TypeConverterRegistry {
        &mut self.registry
    }
}

impl MappingContext for MappingConfiguration {
    fn is_lazy_loading_enabled(&self) -> bool {
        self.settings.lazy_loading_enabled
    }

    fn converter_registry(&self) -> &dyn ConverterRegistry {
        &self.registry
    }
}
