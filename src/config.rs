//! Configuration for the CodeFlow console
//!
//! Sources, lowest to highest precedence:
//! 1. Built-in defaults
//! 2. A TOML file: `--config` / `CODEFLOW_CONFIG_PATH`, or `codeflow.toml`
//!    in the working directory when present
//! 3. Environment variables such as `CODEFLOW__CONSOLE__PROMPT`
//!
//! The interpreter itself takes no configuration; these settings only
//! shape how the binary presents a running program.

use anyhow::{Context, Result};
use config::{Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable naming the config file
pub const CONFIG_PATH_ENV: &str = "CODEFLOW_CONFIG_PATH";

const DEFAULT_PROMPT: &str = "Enter value for '{name}': ";
const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub console: ConsoleConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Prompt printed when a program reads a variable; `{name}` is replaced
    pub prompt: String,
    /// Echo each value read from the console as `> value`
    pub echo_input: bool,
    /// Print the start banner and the completion marker
    pub banner: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_string(),
            echo_input: true,
            banner: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive; `RUST_LOG` takes precedence
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl ConsoleConfig {
    /// Render the input prompt for a variable
    pub fn prompt_for(&self, name: &str) -> String {
        self.prompt.replace("{name}", name)
    }
}

impl Config {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Effective configuration rendered as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to render configuration")
    }
}

/// Builder for loading [`Config`] with overrides
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    config_path: Option<PathBuf>,
}

impl ConfigBuilder {
    /// Set the config file path (overrides `CODEFLOW_CONFIG_PATH` and the default search)
    pub fn config_path(mut self, path: Option<PathBuf>) -> Self {
        self.config_path = path;
        self
    }

    pub fn build(self) -> Result<Config> {
        let defaults = Config::default();
        let mut builder = config::Config::builder()
            .set_default("console.prompt", defaults.console.prompt)?
            .set_default("console.echo_input", defaults.console.echo_input)?
            .set_default("console.banner", defaults.console.banner)?
            .set_default("logging.filter", defaults.logging.filter)?;

        let path = self
            .config_path
            .or_else(|| std::env::var(CONFIG_PATH_ENV).ok().map(PathBuf::from));

        builder = match &path {
            Some(path) => builder.add_source(File::from(path.as_path()).required(true)),
            None => builder.add_source(File::with_name("codeflow").required(false)),
        };

        let settings = builder
            .add_source(
                Environment::with_prefix("CODEFLOW")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| match &path {
                Some(path) => format!("Failed to load configuration from {}", path.display()),
                None => "Failed to load configuration".to_string(),
            })?;

        settings
            .try_deserialize()
            .context("Invalid configuration")
    }
}
