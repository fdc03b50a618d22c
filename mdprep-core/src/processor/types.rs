//! Type definitions for the preprocessing pipeline.
//!
//! # Examples
//!
//! ```
//! use mdprep_core::{PreprocessOptions, Preprocessor};
//!
//! let options = PreprocessOptions {
//!   toc_title: "Contents".to_string(),
//!   ..Default::default()
//! };
//!
//! let preprocessor = Preprocessor::new(options);
//! ```

use crate::history::{DEFAULT_HISTORY_TITLE, default_branches};
use crate::toc::DEFAULT_TOC_TITLE;

/// Options for configuring the preprocessor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreprocessOptions {
  /// Heading of the generated table of contents.
  pub toc_title: String,

  /// Whether to look up and insert the version history table.
  pub history_enabled: bool,

  /// Heading of the generated version history table.
  pub history_title: String,

  /// Branches to read history from, in order of preference.
  pub preferred_branches: Vec<String>,
}

impl Default for PreprocessOptions {
  fn default() -> Self {
    Self {
      toc_title:          DEFAULT_TOC_TITLE.to_string(),
      history_enabled:    true,
      history_title:      DEFAULT_HISTORY_TITLE.to_string(),
      preferred_branches: default_branches(),
    }
  }
}

impl PreprocessOptions {
  /// Options that never consult a history provider.
  #[must_use]
  pub fn without_history() -> Self {
    Self {
      history_enabled: false,
      ..Self::default()
    }
  }
}

/// Document preprocessor.
///
/// Holds no per-document state, so one instance can be shared across threads
/// and used for any number of documents.
#[derive(Debug, Clone, Default)]
pub struct Preprocessor {
  pub(crate) options: PreprocessOptions,
}
