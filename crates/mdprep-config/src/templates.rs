use crate::error::ConfigError;

/// Default configuration template in TOML, commented so that a freshly
/// generated file explains itself.
pub const DEFAULT_TOML_TEMPLATE: &str = r#"# mdprep configuration file

# Number of documents to process in parallel in batch mode
# (defaults to the number of CPU cores)
# jobs = 4

[toc]
# Heading of the generated table of contents
title = "Table of Contents"

[history]
# Insert a version history table for documents tracked in a repository
enable = true

# Heading of the version history table
title = "Document Version History"

# Branches to read history from, most preferred first. When none of them
# exists the history table is left out.
branches = ["main", "master"]
"#;

/// Default configuration template in JSON format.
pub const DEFAULT_JSON_TEMPLATE: &str = r#"{
  "toc": {
    "title": "Table of Contents"
  },
  "history": {
    "enable": true,
    "title": "Document Version History",
    "branches": ["main", "master"]
  }
}
"#;

/// Get the configuration template for the requested format.
///
/// # Errors
///
/// Returns an error if the requested format is not supported.
pub fn get_template(format: &str) -> Result<&'static str, ConfigError> {
  match format.to_lowercase().as_str() {
    "toml" => Ok(DEFAULT_TOML_TEMPLATE),
    "json" => Ok(DEFAULT_JSON_TEMPLATE),
    _ => Err(ConfigError::UnsupportedFormat(format.to_string())),
  }
}
