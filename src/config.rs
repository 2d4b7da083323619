//! Configuration management for the demo
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (typed-records.toml)
//! - Environment variables (TYPED_RECORDS__*)
//!
//! ## Example config file (typed-records.toml):
//! ```toml
//! [inputs]
//! order_path = "example_external_file/order.json"
//! table_path = "example_external_file/data.csv"
//!
//! [greeting]
//! name = "Pyth"
//! lhs = 1
//! rhs = 2
//!
//! [output]
//! format = "text"
//! ```

use config_crate::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DemoConfig {
    /// External input files
    #[serde(default)]
    pub inputs: InputConfig,

    /// Greeting and arithmetic inputs
    #[serde(default)]
    pub greeting: GreetingConfig,

    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,
}

/// Locations of the external order document and table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    #[serde(default = "default_order_path")]
    pub order_path: PathBuf,

    #[serde(default = "default_table_path")]
    pub table_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GreetingConfig {
    /// Name to greet
    #[serde(default = "default_name")]
    pub name: String,

    /// Left operand of the sample addition
    #[serde(default = "default_lhs")]
    pub lhs: i64,

    /// Right operand of the sample addition
    #[serde(default = "default_rhs")]
    pub rhs: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

/// Output format for the demo report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

// Default value functions
fn default_order_path() -> PathBuf {
    PathBuf::from("example_external_file/order.json")
}

fn default_table_path() -> PathBuf {
    PathBuf::from("example_external_file/data.csv")
}

fn default_name() -> String {
    "Pyth".to_string()
}

fn default_lhs() -> i64 {
    1
}

fn default_rhs() -> i64 {
    2
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            order_path: default_order_path(),
            table_path: default_table_path(),
        }
    }
}

impl Default for GreetingConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            lhs: default_lhs(),
            rhs: default_rhs(),
        }
    }
}

impl DemoConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration, layering an explicit file over the default locations
    pub fn load_from(config_path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        let config_locations = [
            "typed-records.toml",
            ".typed-records.toml",
            "config/typed-records.toml",
        ];

        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        if let Some(config_dir) = directories::ProjectDirs::from("dev", "familiar", "typed-records") {
            let xdg_config = config_dir.config_dir().join("typed-records.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // TYPED_RECORDS__INPUTS__ORDER_PATH=...
        builder = builder.add_source(
            Environment::with_prefix("TYPED_RECORDS")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Save configuration to a file
    pub fn save(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, content)
    }

    /// Resolve an input path against `base` unless it is already absolute
    pub fn resolve(base: &Path, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            base.join(path)
        }
    }
}
