//! Types for mdprep-core public API and internal use.
use std::fmt;

use serde::{Deserialize, Serialize};

/// Represents a header in a Markdown document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Header {
  /// Header level (1-4).
  pub level: u8,
  /// Header text, trimmed.
  pub text:  String,
  /// Anchor slug derived from `text` alone.
  pub slug:  String,
}

/// One logged revision of a tracked document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChangeRecord {
  /// Commit date, `YYYY-MM-DD`.
  pub date:    String,
  /// Commit summary line.
  pub message: String,
}

impl ChangeRecord {
  #[must_use]
  pub fn new(date: impl Into<String>, message: impl Into<String>) -> Self {
    Self {
      date:    date.into(),
      message: message.into(),
    }
  }
}

/// Reason a version history could not be produced for a document.
///
/// None of these are errors from the pipeline's point of view; they only
/// decide whether the history section is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryUnavailable {
  /// The document is not inside a repository.
  Untracked,
  /// None of the preferred branches exist.
  NoBranch { tried: Vec<String> },
  /// The branch exists but has no commits touching the document.
  NoHistory { branch: Option<String> },
  /// Retrieval failed.
  Failed(String),
}

impl fmt::Display for HistoryUnavailable {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Untracked => f.write_str("not a repository"),
      Self::NoBranch { tried } => {
        write!(f, "no {} branch found", tried.join("/"))
      },
      Self::NoHistory { branch: Some(branch) } => {
        write!(f, "no history found for this file in {branch} branch")
      },
      Self::NoHistory { branch: None } => {
        f.write_str("no history found for this file")
      },
      Self::Failed(reason) => write!(f, "error getting history: {reason}"),
    }
  }
}

/// What happened to the version history section during one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryStatus {
  /// A history table with `count` rows was inserted.
  Included { count: usize },
  /// History was requested but is not available.
  Unavailable(HistoryUnavailable),
  /// History is turned off or no provider was supplied.
  Disabled,
  /// The document has no headers, so nothing was inserted at all.
  Skipped,
}

/// Result of preprocessing one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreprocessResult {
  /// The processed document.
  pub content: String,

  /// Headers extracted from the input, in document order.
  pub headers: Vec<Header>,

  /// Outcome of the version history lookup.
  pub history: HistoryStatus,
}

impl PreprocessResult {
  /// Whether anything was inserted into the document.
  #[must_use]
  pub const fn is_modified(&self) -> bool {
    !self.headers.is_empty()
  }
}
