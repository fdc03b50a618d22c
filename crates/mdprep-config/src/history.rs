use mdprep_core::history::{DEFAULT_HISTORY_TITLE, default_branches};
use serde::{Deserialize, Serialize};

/// Version history configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HistoryConfig {
  /// Whether to insert the version history table.
  pub enable: bool,

  /// Heading of the version history table.
  pub title: String,

  /// Branches to read history from, most preferred first. History is only
  /// read from one of these, never from whatever branch is checked out.
  pub branches: Vec<String>,
}

impl Default for HistoryConfig {
  fn default() -> Self {
    Self {
      enable:   true,
      title:    DEFAULT_HISTORY_TITLE.to_string(),
      branches: default_branches(),
    }
  }
}

impl HistoryConfig {
  /// Check that an enabled history has somewhere to read from.
  ///
  /// # Errors
  ///
  /// Returns a message if history is enabled with an empty branch list or a
  /// blank branch name.
  pub fn validate(&self) -> Result<(), String> {
    if !self.enable {
      return Ok(());
    }
    if self.branches.is_empty() {
      return Err("history.branches must list at least one branch".to_string());
    }
    if self.branches.iter().any(|b| b.trim().is_empty()) {
      return Err("history.branches must not contain empty names".to_string());
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_defaults_prefer_main_then_master() {
    let config = HistoryConfig::default();
    assert!(config.enable);
    assert_eq!(config.branches, vec!["main", "master"]);
  }

  #[test]
  fn test_validate_rejects_empty_branches() {
    let config = HistoryConfig {
      branches: Vec::new(),
      ..Default::default()
    };
    assert!(config.validate().is_err());

    let disabled = HistoryConfig {
      enable: false,
      branches: Vec::new(),
      ..Default::default()
    };
    assert!(disabled.validate().is_ok());
  }

  #[test]
  fn test_partial_toml_keeps_defaults() {
    let config: HistoryConfig =
      toml::from_str("title = \"Changes\"").unwrap_or_default();
    assert_eq!(config.title, "Changes");
    assert!(config.enable);
    assert_eq!(config.branches.len(), 2);
  }
}
