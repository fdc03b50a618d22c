use mdprep_core::toc::DEFAULT_TOC_TITLE;
use serde::{Deserialize, Serialize};

/// Table of contents configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TocConfig {
  /// Heading of the generated table of contents.
  pub title: String,
}

impl Default for TocConfig {
  fn default() -> Self {
    Self {
      title: DEFAULT_TOC_TITLE.to_string(),
    }
  }
}
