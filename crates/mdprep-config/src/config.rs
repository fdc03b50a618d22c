use std::{
  fs,
  path::{Path, PathBuf},
  sync::OnceLock,
};

use mdprep_core::{
  PreprocessOptions,
  history::{DEFAULT_HISTORY_TITLE, default_branches},
  toc::DEFAULT_TOC_TITLE,
};
use serde::{Deserialize, Serialize};

use crate::{error::ConfigError, history::HistoryConfig, templates, toc::TocConfig};

/// File names searched for in the working directory, in order.
const CONFIG_FILENAMES: [&str; 6] = [
  "mdprep.toml",
  "mdprep.json",
  ".mdprep.toml",
  ".mdprep.json",
  ".config/mdprep.toml",
  ".config/mdprep.json",
];

/// Configuration for the mdprep preprocessor.
///
/// [`Config`] is typically loaded from a TOML or JSON file, merged with
/// further files and `KEY=VALUE` overrides, and finally adjusted by CLI
/// flags. Sections that are absent fall back to the defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
  /// Number of documents processed in parallel in batch mode.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub jobs: Option<usize>,

  /// Table of contents configuration.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub toc: Option<TocConfig>,

  /// Version history configuration.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub history: Option<HistoryConfig>,
}

impl Config {
  /// Heading of the generated table of contents.
  #[must_use]
  pub fn toc_title(&self) -> &str {
    self
      .toc
      .as_ref()
      .map_or(DEFAULT_TOC_TITLE, |toc| toc.title.as_str())
  }

  /// Whether version history should be looked up.
  #[must_use]
  pub fn history_enabled(&self) -> bool {
    self.history.as_ref().is_none_or(|history| history.enable)
  }

  /// Heading of the version history table.
  #[must_use]
  pub fn history_title(&self) -> &str {
    self
      .history
      .as_ref()
      .map_or(DEFAULT_HISTORY_TITLE, |history| history.title.as_str())
  }

  /// Branches to read history from, most preferred first.
  #[must_use]
  pub fn history_branches(&self) -> Vec<String> {
    self
      .history
      .as_ref()
      .map_or_else(default_branches, |history| history.branches.clone())
  }

  /// Mutable access to the history section, creating it from defaults.
  pub fn history_mut(&mut self) -> &mut HistoryConfig {
    self.history.get_or_insert_with(HistoryConfig::default)
  }

  /// Mutable access to the table of contents section, creating it from
  /// defaults.
  pub fn toc_mut(&mut self) -> &mut TocConfig {
    self.toc.get_or_insert_with(TocConfig::default)
  }

  /// Build the pipeline options described by this configuration.
  #[must_use]
  pub fn preprocess_options(&self) -> PreprocessOptions {
    PreprocessOptions {
      toc_title:          self.toc_title().to_string(),
      history_enabled:    self.history_enabled(),
      history_title:      self.history_title().to_string(),
      preferred_branches: self.history_branches(),
    }
  }

  /// Load configuration from a file (TOML or JSON).
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be read or parsed, or if the format is
  /// unsupported.
  pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    let content =
      fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
      })?;

    let extension = path
      .extension()
      .and_then(|ext| ext.to_str())
      .map(str::to_lowercase);

    match extension.as_deref() {
      Some("json") => {
        serde_json::from_str(&content).map_err(|source| {
          ConfigError::Json {
            path: path.to_path_buf(),
            source,
          }
        })
      },
      Some("toml") => {
        toml::from_str(&content).map_err(|source| {
          ConfigError::Toml {
            path: path.to_path_buf(),
            source,
          }
        })
      },
      Some(_) => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
      None => {
        Err(ConfigError::Config(format!(
          "Config file has no extension: {}",
          path.display()
        )))
      },
    }
  }

  /// Load configuration from files and overrides.
  ///
  /// Explicit files are merged in order, later files taking precedence. When
  /// none are given a config file is searched for in the usual locations
  /// (see [`Config::find_config_file`]); failing that the defaults are used.
  /// `KEY=VALUE` overrides are applied last and the result is validated.
  ///
  /// # Errors
  ///
  /// Returns an error if a file cannot be loaded, an override is invalid or
  /// the merged configuration fails validation.
  pub fn load(
    config_files: &[PathBuf],
    config_overrides: &[String],
  ) -> Result<Self, ConfigError> {
    let mut config = if let Some((first, rest)) = config_files.split_first() {
      let mut merged_config = Self::from_file(first)?;

      for config_path in rest {
        merged_config.merge(Self::from_file(config_path)?);
      }

      if config_files.len() > 1 {
        log::info!("Loaded and merged {} config files", config_files.len());
      }

      merged_config
    } else if let Some(discovered_config) = Self::find_config_file() {
      log::info!(
        "Using discovered config file: {}",
        discovered_config.display()
      );
      Self::from_file(&discovered_config)?
    } else {
      Self::default()
    };

    if !config_overrides.is_empty() {
      config.apply_overrides(config_overrides)?;
    }

    config.validate()?;
    Ok(config)
  }

  /// Check the configuration for values the pipeline cannot work with.
  ///
  /// # Errors
  ///
  /// Returns an error describing the first invalid value.
  pub fn validate(&self) -> Result<(), ConfigError> {
    if self.jobs == Some(0) {
      return Err(ConfigError::Config(
        "jobs must be at least 1".to_string(),
      ));
    }

    if let Some(ref history) = self.history {
      history.validate().map_err(|e| {
        ConfigError::Config(format!(
          "History configuration validation failed: {e}"
        ))
      })?;
    }

    Ok(())
  }

  /// Apply configuration overrides from KEY=VALUE strings.
  ///
  /// Recognized keys are `jobs`, `toc.title`, `history.enable`,
  /// `history.title` and `history.branches` (comma separated).
  ///
  /// # Errors
  ///
  /// Returns an error if:
  ///
  /// - An override string is not in KEY=VALUE format
  /// - A key is not recognized
  /// - A value cannot be parsed as the expected type
  ///
  /// # Example
  ///
  /// ```rust
  /// use mdprep_config::Config;
  ///
  /// let mut config = Config::default();
  /// config
  ///   .apply_overrides(&[
  ///     "history.enable=false".to_string(),
  ///     "toc.title=Contents".to_string(),
  ///   ])
  ///   .unwrap();
  /// assert!(!config.history_enabled());
  /// assert_eq!(config.toc_title(), "Contents");
  /// ```
  pub fn apply_overrides(
    &mut self,
    overrides: &[String],
  ) -> Result<(), ConfigError> {
    for override_str in overrides {
      let (key, value) = override_str.split_once('=').ok_or_else(|| {
        ConfigError::Config(format!(
          "Invalid config override format: '{override_str}'. Expected \
           KEY=VALUE"
        ))
      })?;

      self.apply_override(key.trim(), value.trim())?;
    }

    Ok(())
  }

  fn apply_override(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
    let invalid = |reason: &str| {
      ConfigError::InvalidValue {
        key:    key.to_string(),
        value:  value.to_string(),
        reason: reason.to_string(),
      }
    };

    match key {
      "jobs" => {
        self.jobs = if value.is_empty() {
          None
        } else {
          Some(
            value
              .parse::<usize>()
              .map_err(|e| invalid(&e.to_string()))?,
          )
        };
      },
      "toc.title" => value.clone_into(&mut self.toc_mut().title),
      "history.enable" => {
        self.history_mut().enable =
          parse_bool(value).ok_or_else(|| invalid("expected a boolean"))?;
      },
      "history.title" => value.clone_into(&mut self.history_mut().title),
      "history.branches" => {
        let branches: Vec<String> = value
          .split(',')
          .map(str::trim)
          .filter(|b| !b.is_empty())
          .map(ToString::to_string)
          .collect();
        if branches.is_empty() {
          return Err(invalid("expected at least one branch name"));
        }
        self.history_mut().branches = branches;
      },
      _ => return Err(ConfigError::UnknownKey(key.to_string())),
    }

    log::debug!("Applied config override {key}={value}");
    Ok(())
  }

  /// Merge another config into this one, with the other config's values taking
  /// precedence.
  ///
  /// # Merge Rules
  ///
  /// - [`Option<T>`] fields: Other's [`Some`] value replaces this config's
  ///   value, whole sections included
  /// - [`None`] in other leaves this config's value alone
  pub fn merge(&mut self, other: Self) {
    if other.jobs.is_some() {
      self.jobs = other.jobs;
    }
    if other.toc.is_some() {
      self.toc = other.toc;
    }
    if other.history.is_some() {
      self.history = other.history;
    }
  }

  /// Search for config files in common locations.
  ///
  /// The working directory is checked first, then `$XDG_CONFIG_HOME`, then
  /// `$HOME/.config/mdprep`. The lookup happens once per process.
  #[must_use]
  pub fn find_config_file() -> Option<PathBuf> {
    static RESULT: OnceLock<Option<PathBuf>> = OnceLock::new();
    RESULT
      .get_or_init(|| {
        let current_dir = std::env::current_dir().ok()?;
        discover_config_file(
          &current_dir,
          std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from).as_deref(),
          std::env::var_os("HOME").map(PathBuf::from).as_deref(),
        )
      })
      .clone()
  }

  /// Write the default configuration template to `path`.
  ///
  /// # Errors
  ///
  /// Returns an error if the format is unsupported or the file cannot be
  /// written.
  pub fn generate_default_config(
    format: &str,
    path: &Path,
  ) -> Result<(), ConfigError> {
    let config_content = templates::get_template(format)?;

    fs::write(path, config_content).map_err(|source| {
      ConfigError::Write {
        path: path.to_path_buf(),
        source,
      }
    })?;

    log::info!("Created default configuration file: {}", path.display());
    Ok(())
  }
}

/// Look for a config file below `current_dir`, then in the XDG and home
/// config directories.
#[must_use]
pub fn discover_config_file(
  current_dir: &Path,
  xdg_config_home: Option<&Path>,
  home: Option<&Path>,
) -> Option<PathBuf> {
  let in_cwd = CONFIG_FILENAMES.iter().map(|name| current_dir.join(name));
  let in_xdg = xdg_config_home
    .into_iter()
    .flat_map(|dir| ["mdprep.toml", "mdprep.json"].map(|name| dir.join(name)));
  let in_home = home.into_iter().flat_map(|dir| {
    let dir = dir.join(".config").join("mdprep");
    ["config.toml", "config.json"].map(|name| dir.join(name))
  });

  in_cwd.chain(in_xdg).chain(in_home).find(|path| path.is_file())
}

/// Parse the boolean spellings accepted in overrides.
fn parse_bool(value: &str) -> Option<bool> {
  match value.to_lowercase().as_str() {
    "true" | "yes" | "1" | "on" => Some(true),
    "false" | "no" | "0" | "off" => Some(false),
    _ => None,
  }
}

#[cfg(test)]
mod tests {
  #![allow(
    clippy::unwrap_used,
    clippy::field_reassign_with_default,
    reason = "Fine in tests"
  )]

  use std::fs;

  use tempfile::tempdir;

  use super::*;

  #[test]
  fn test_defaults_without_sections() {
    let config = Config::default();
    assert_eq!(config.toc_title(), "Table of Contents");
    assert!(config.history_enabled());
    assert_eq!(config.history_title(), "Document Version History");
    assert_eq!(config.history_branches(), ["main", "master"]);
    assert_eq!(config.preprocess_options(), PreprocessOptions::default());
  }

  #[test]
  fn test_from_file_toml_and_json() {
    let dir = tempdir().unwrap();
    let toml_path = dir.path().join("mdprep.toml");
    let json_path = dir.path().join("mdprep.json");
    fs::write(&toml_path, "jobs = 2\n[toc]\ntitle = \"Contents\"\n").unwrap();
    fs::write(&json_path, r#"{"history": {"enable": false}}"#).unwrap();

    let from_toml = Config::from_file(&toml_path).unwrap();
    assert_eq!(from_toml.jobs, Some(2));
    assert_eq!(from_toml.toc_title(), "Contents");
    assert!(from_toml.history_enabled());

    let from_json = Config::from_file(&json_path).unwrap();
    assert!(!from_json.history_enabled());
    assert_eq!(from_json.history_branches(), ["main", "master"]);
  }

  #[test]
  fn test_from_file_rejects_unknown_extension() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("mdprep.yaml");
    fs::write(&path, "jobs: 2").unwrap();
    assert!(matches!(
      Config::from_file(&path),
      Err(ConfigError::UnsupportedFormat(_))
    ));
  }

  #[test]
  fn test_from_file_missing() {
    let dir = tempdir().unwrap();
    assert!(matches!(
      Config::from_file(dir.path().join("absent.toml")),
      Err(ConfigError::Read { .. })
    ));
  }

  #[test]
  fn test_from_file_parse_errors_keep_path_and_source() {
    use std::error::Error;

    let dir = tempdir().unwrap();
    let toml_path = dir.path().join("broken.toml");
    let json_path = dir.path().join("broken.json");
    fs::write(&toml_path, "jobs = = 2\n").unwrap();
    fs::write(&json_path, "{\"jobs\": }").unwrap();

    let toml_err = Config::from_file(&toml_path).unwrap_err();
    assert!(
      matches!(toml_err, ConfigError::Toml { ref path, .. } if *path == toml_path)
    );
    assert!(toml_err.source().is_some());

    let json_err = Config::from_file(&json_path).unwrap_err();
    assert!(
      matches!(json_err, ConfigError::Json { ref path, .. } if *path == json_path)
    );
    assert!(json_err.source().is_some());
  }

  #[test]
  fn test_generate_default_config_write_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing-dir").join("mdprep.toml");
    assert!(matches!(
      Config::generate_default_config("toml", &path),
      Err(ConfigError::Write { .. })
    ));
  }

  #[test]
  fn test_merge_later_sections_win() {
    let mut base = Config::default();
    base.jobs = Some(4);
    base.toc = Some(TocConfig {
      title: "Base".to_string(),
    });

    let mut other = Config::default();
    other.history = Some(HistoryConfig {
      branches: vec!["trunk".to_string()],
      ..Default::default()
    });

    base.merge(other);

    assert_eq!(base.jobs, Some(4));
    assert_eq!(base.toc_title(), "Base");
    assert_eq!(base.history_branches(), ["trunk"]);
  }

  #[test]
  fn test_apply_overrides() {
    let mut config = Config::default();
    config
      .apply_overrides(&[
        "jobs=3".to_string(),
        "history.enable=no".to_string(),
        "history.title = Revisions".to_string(),
        "history.branches=develop, main".to_string(),
      ])
      .unwrap();

    assert_eq!(config.jobs, Some(3));
    assert!(!config.history_enabled());
    assert_eq!(config.history_title(), "Revisions");
    assert_eq!(config.history_branches(), ["develop", "main"]);
  }

  #[test]
  fn test_apply_overrides_errors() {
    let mut config = Config::default();
    assert!(matches!(
      config.apply_overrides(&["no-equals-sign".to_string()]),
      Err(ConfigError::Config(_))
    ));
    assert!(matches!(
      config.apply_overrides(&["nope=1".to_string()]),
      Err(ConfigError::UnknownKey(_))
    ));
    assert!(matches!(
      config.apply_overrides(&["history.enable=maybe".to_string()]),
      Err(ConfigError::InvalidValue { .. })
    ));
    assert!(matches!(
      config.apply_overrides(&["history.branches= , ".to_string()]),
      Err(ConfigError::InvalidValue { .. })
    ));
  }

  #[test]
  fn test_load_merges_files_then_overrides() {
    let dir = tempdir().unwrap();
    let first = dir.path().join("a.toml");
    let second = dir.path().join("b.json");
    fs::write(&first, "jobs = 1\n[toc]\ntitle = \"First\"\n").unwrap();
    fs::write(&second, r#"{"toc": {"title": "Second"}}"#).unwrap();

    let config =
      Config::load(&[first, second], &["jobs=8".to_string()]).unwrap();
    assert_eq!(config.toc_title(), "Second");
    assert_eq!(config.jobs, Some(8));
  }

  #[test]
  fn test_load_validates() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    fs::write(&path, "jobs = 0\n").unwrap();
    assert!(Config::load(&[path], &[]).is_err());
  }

  #[test]
  fn test_discover_config_file_order() {
    let cwd = tempdir().unwrap();
    let xdg = tempdir().unwrap();
    let home = tempdir().unwrap();

    assert_eq!(
      discover_config_file(cwd.path(), Some(xdg.path()), Some(home.path())),
      None
    );

    let home_config = home.path().join(".config").join("mdprep");
    fs::create_dir_all(&home_config).unwrap();
    fs::write(home_config.join("config.toml"), "").unwrap();
    assert_eq!(
      discover_config_file(cwd.path(), Some(xdg.path()), Some(home.path())),
      Some(home_config.join("config.toml"))
    );

    fs::write(xdg.path().join("mdprep.json"), "{}").unwrap();
    assert_eq!(
      discover_config_file(cwd.path(), Some(xdg.path()), Some(home.path())),
      Some(xdg.path().join("mdprep.json"))
    );

    fs::write(cwd.path().join(".mdprep.toml"), "").unwrap();
    assert_eq!(
      discover_config_file(cwd.path(), Some(xdg.path()), Some(home.path())),
      Some(cwd.path().join(".mdprep.toml"))
    );
  }

  #[test]
  fn test_generate_default_config() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("mdprep.toml");
    Config::generate_default_config("toml", &path).unwrap();
    let config = Config::from_file(&path).unwrap();
    assert_eq!(config.preprocess_options(), PreprocessOptions::default());
  }
}
