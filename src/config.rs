//! Configuration loader.
//!
//! `defaults/rt-tables.default.toml` is embedded into the crate so the documented defaults
//! and runtime behavior stay in sync. [`Loader`] layers a user file and the command-line
//! settings on top before deserializing into [`RtConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_TOML: &str = include_str!("../defaults/rt-tables.default.toml");

#[derive(Debug, Clone, Deserialize)]
pub struct RtConfig {
    pub data: DataConfig,
    pub output: OutputConfig,
}

/// Default dataset roots used when a command gives no `--dir`.
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    pub egap_dir: PathBuf,
    pub sos_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub pretty: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Yaml,
}

/// Builds an [`RtConfig`]: embedded defaults, then an optional `--config` file, then
/// command-line settings.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        let defaults = File::from_str(DEFAULT_TOML, FileFormat::Toml);
        Self {
            builder: Config::builder().add_source(defaults),
        }
    }

    /// Layer a user TOML file. The file must exist.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let user = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(user);
        self
    }

    /// Override `output.format` (`json` or `yaml`); checked when the config is built.
    pub fn with_output_format(self, format: &str) -> Result<Self, ConfigError> {
        self.set("output.format", format)
    }

    /// Override the dataset root of `dataset` (`egap` or `sos`).
    pub fn with_data_dir(
        self,
        dataset: &str,
        dir: impl AsRef<Path>,
    ) -> Result<Self, ConfigError> {
        let dir = dir.as_ref().to_string_lossy().into_owned();
        self.set(&format!("data.{}_dir", dataset), dir)
    }

    fn set(mut self, key: &str, value: impl Into<ValueKind>) -> Result<Self, ConfigError> {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<RtConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

pub fn load_defaults() -> Result<RtConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.data.sos_dir, PathBuf::from("sos_data"));
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(config.output.pretty);
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .with_output_format("yaml")
            .expect("override to apply")
            .with_data_dir("egap", "/data/egap")
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.output.format, OutputFormat::Yaml);
        assert_eq!(config.data.egap_dir, PathBuf::from("/data/egap"));
    }

    #[test]
    fn user_file_layers_over_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[output]\npretty = false").unwrap();
        let config = Loader::new().with_file(file.path()).build().unwrap();
        assert!(!config.output.pretty);
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn data_dir_override_beats_user_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[data]\nsos_dir = \"/from/file\"").unwrap();
        let config = Loader::new()
            .with_file(file.path())
            .with_data_dir("sos", "/from/flag")
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(config.data.sos_dir, PathBuf::from("/from/flag"));
        assert_eq!(config.data.egap_dir, PathBuf::from("egap_data"));
    }

    #[test]
    fn missing_user_file_is_an_error() {
        let result = Loader::new()
            .with_file("/nonexistent/rt-tables.toml")
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn rejects_unknown_output_format() {
        let result = Loader::new()
            .with_output_format("csv")
            .unwrap()
            .build();
        assert!(result.is_err());
    }
}
