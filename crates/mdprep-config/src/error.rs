use std::{io, path::PathBuf};

use thiserror::Error;

/// Error type for mdprep-config operations
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("Configuration error: {0}")]
  Config(String),

  #[error("Failed to read config file {}: {source}", path.display())]
  Read {
    path:   PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("Unsupported config format: {0}")]
  UnsupportedFormat(String),

  #[error("Unknown configuration key: '{0}'")]
  UnknownKey(String),

  #[error("Invalid value '{value}' for '{key}': {reason}")]
  InvalidValue {
    key:    String,
    value:  String,
    reason: String,
  },

  #[error("Failed to write config file {}: {source}", path.display())]
  Write {
    path:   PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("Failed to parse JSON config from {}: {source}", path.display())]
  Json {
    path:   PathBuf,
    #[source]
    source: serde_json::Error,
  },

  #[error("Failed to parse TOML config from {}: {source}", path.display())]
  Toml {
    path:   PathBuf,
    #[source]
    source: toml::de::Error,
  },
}
