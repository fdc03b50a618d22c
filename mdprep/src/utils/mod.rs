pub mod markdown;

use std::path::PathBuf;

use mdprep_config::Config;
use mdprep_core::Preprocessor;

pub use crate::utils::markdown::{
  DocumentReport,
  output_path_for,
  preprocess_directory,
  preprocess_file,
};
use crate::error::MdprepError;

/// Load the configuration and apply the history switch from the command line.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded or is invalid.
pub fn load_config(
  config_files: &[PathBuf],
  config_overrides: &[String],
  no_history: bool,
) -> Result<Config, MdprepError> {
  let mut config = Config::load(config_files, config_overrides)?;
  if no_history {
    config.history_mut().enable = false;
  }
  Ok(config)
}

/// Create the preprocessor described by `config`.
#[must_use]
pub fn create_preprocessor(config: &Config) -> Preprocessor {
  Preprocessor::new(config.preprocess_options())
}
