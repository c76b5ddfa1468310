//! Shared configuration loader for chartmark.
//!
//! `defaults/chartmark.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`ChartmarkConfig`].

use chartmark::{ChartOptions, HtmlOptions};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/chartmark.default.toml");

/// Top-level configuration consumed by chartmark applications.
#[derive(Debug, Clone, Deserialize)]
pub struct ChartmarkConfig {
    pub chart: ChartConfig,
    pub html: HtmlConfig,
}

/// Mirrors [`ChartOptions`].
#[derive(Debug, Clone, Deserialize)]
pub struct ChartConfig {
    pub marker: String,
    pub default_color: String,
    pub grid_color: String,
    pub container_class: String,
}

impl From<ChartConfig> for ChartOptions {
    fn from(config: ChartConfig) -> Self {
        ChartOptions {
            marker: config.marker,
            default_color: config.default_color,
            grid_color: config.grid_color,
            container_class: config.container_class,
        }
    }
}

impl From<&ChartConfig> for ChartOptions {
    fn from(config: &ChartConfig) -> Self {
        config.clone().into()
    }
}

/// Standalone page knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct HtmlConfig {
    pub chartjs_src: String,
    pub title: String,
    #[serde(default)]
    pub custom_css: String,
}

impl From<HtmlConfig> for HtmlOptions {
    fn from(config: HtmlConfig) -> Self {
        HtmlOptions {
            chartjs_src: config.chartjs_src,
            title: config.title,
            custom_css: (!config.custom_css.is_empty()).then_some(config.custom_css),
        }
    }
}

impl From<&HtmlConfig> for HtmlOptions {
    fn from(config: &HtmlConfig) -> Self {
        config.clone().into()
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override, e.g. `chart.marker`.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<ChartmarkConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<ChartmarkConfig, ConfigError> {
    Loader::new().build()
}
