use std::{io, path::PathBuf};

use mdprep_config::ConfigError;
use thiserror::Error;

/// Errors that abort processing of a document.
///
/// Missing history is not among them; it only removes the history table.
#[derive(Debug, Error)]
pub enum MdprepError {
  #[error("Input file not found: {}", .0.display())]
  InputNotFound(PathBuf),

  #[error("Failed to read {}: {source}", path.display())]
  Read {
    path:   PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("Failed to write {}: {source}", path.display())]
  Write {
    path:   PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("Configuration error: {0}")]
  Config(#[from] ConfigError),
}
