//! Version history: the provider capability and the table formatter.
//!
//! Retrieval is kept behind [`HistoryProvider`] so the pipeline does not care
//! whether records come from a repository, a log file or a fixed list. A
//! provider either returns records most-recent-first or says why it cannot,
//! and the pipeline treats every [`HistoryUnavailable`] as "no history
//! section".
use std::{fmt::Write, path::Path};

use crate::types::{ChangeRecord, HistoryUnavailable};

/// Heading used for the generated version history table.
pub const DEFAULT_HISTORY_TITLE: &str = "Document Version History";

/// Branches consulted for history, in order of preference.
pub const DEFAULT_BRANCHES: &[&str] = &["main", "master"];

/// Source of change records for a document.
pub trait HistoryProvider: Send + Sync {
  /// Return the changes to `path` on the first existing branch of
  /// `preferred_branches`, most recent first.
  ///
  /// # Errors
  ///
  /// Returns the reason history is unavailable. Callers are expected to carry
  /// on without a history section.
  fn change_history(
    &self,
    path: &Path,
    preferred_branches: &[String],
  ) -> Result<Vec<ChangeRecord>, HistoryUnavailable>;
}

/// Pick the first candidate branch that exists.
///
/// Candidates are tried strictly in order. When none exists the result is
/// `None`; there is no fallback to whatever branch happens to be checked out.
pub fn resolve_branch<'a, S, F>(candidates: &'a [S], mut exists: F) -> Option<&'a str>
where
  S: AsRef<str>,
  F: FnMut(&str) -> bool,
{
  candidates
    .iter()
    .map(AsRef::as_ref)
    .find(|name| exists(name))
}

/// The default branch preference as owned strings.
#[must_use]
pub fn default_branches() -> Vec<String> {
  DEFAULT_BRANCHES.iter().map(ToString::to_string).collect()
}

/// Render change records as a two-column Markdown table.
///
/// `None` renders nothing. Records keep the order they were given in. The
/// table is followed directly by a horizontal rule, with no blank line before
/// or after it, so concatenating further content does not produce an empty
/// trailing row.
#[must_use]
pub fn render_history(changes: Option<&[ChangeRecord]>, title: &str) -> String {
  let Some(changes) = changes else {
    return String::new();
  };

  let mut history = String::with_capacity(96 + changes.len() * 48);
  history.push_str("## ");
  history.push_str(title);
  history.push_str("\n\n");
  history.push_str("| Date | Changes |\n");
  history.push_str("|------|----------|\n");

  for change in changes {
    // Writing to String is infallible
    let _ = writeln!(
      history,
      "| {} | {} |",
      change.date,
      escape_cell(&change.message)
    );
  }

  history.push_str("---\n");
  history
}

/// Escape pipes so a commit summary cannot add table columns.
fn escape_cell(text: &str) -> String {
  text.replace('|', "\\|")
}

/// A provider with a fixed answer.
///
/// Useful for embedding the pipeline where history comes from somewhere
/// other than a repository, and in tests.
#[derive(Debug, Clone)]
pub struct StaticHistory {
  result: Result<Vec<ChangeRecord>, HistoryUnavailable>,
}

impl StaticHistory {
  #[must_use]
  pub const fn with_changes(changes: Vec<ChangeRecord>) -> Self {
    Self {
      result: Ok(changes),
    }
  }

  #[must_use]
  pub const fn unavailable(reason: HistoryUnavailable) -> Self {
    Self {
      result: Err(reason),
    }
  }
}

impl HistoryProvider for StaticHistory {
  fn change_history(
    &self,
    _path: &Path,
    _preferred_branches: &[String],
  ) -> Result<Vec<ChangeRecord>, HistoryUnavailable> {
    self.result.clone()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_render_single_change() {
    let changes = vec![ChangeRecord::new("2024-01-01", "Initial")];
    let history = render_history(Some(&changes), DEFAULT_HISTORY_TITLE);

    assert_eq!(
      history,
      "## Document Version History\n\n| Date | Changes |\n|------|----------|\n| \
       2024-01-01 | Initial |\n---\n"
    );
    assert!(!history.ends_with("\n\n"));
  }

  #[test]
  fn test_render_keeps_given_order() {
    let changes = vec![
      ChangeRecord::new("2024-03-01", "Newest"),
      ChangeRecord::new("2023-01-01", "Oldest"),
      ChangeRecord::new("2024-02-01", "Middle"),
    ];
    let history = render_history(Some(&changes), DEFAULT_HISTORY_TITLE);

    let newest = history.find("Newest").unwrap_or(usize::MAX);
    let oldest = history.find("Oldest").unwrap_or(usize::MAX);
    let middle = history.find("Middle").unwrap_or(usize::MAX);
    assert!(newest < oldest && oldest < middle);
  }

  #[test]
  fn test_render_absent_is_empty() {
    assert_eq!(render_history(None, DEFAULT_HISTORY_TITLE), "");
  }

  #[test]
  fn test_render_present_but_empty() {
    let history = render_history(Some(&[]), DEFAULT_HISTORY_TITLE);
    assert!(history.ends_with("|------|----------|\n---\n"));
  }

  #[test]
  fn test_render_escapes_pipes() {
    let changes = vec![ChangeRecord::new("2024-01-01", "a | b")];
    let history = render_history(Some(&changes), DEFAULT_HISTORY_TITLE);
    assert!(history.contains("| 2024-01-01 | a \\| b |\n"));
  }

  #[test]
  fn test_resolve_branch_prefers_main() {
    let candidates = default_branches();
    let resolved = resolve_branch(&candidates, |_| true);
    assert_eq!(resolved, Some("main"));
  }

  #[test]
  fn test_resolve_branch_falls_back_to_master() {
    let candidates = default_branches();
    let resolved = resolve_branch(&candidates, |name| name == "master");
    assert_eq!(resolved, Some("master"));
  }

  #[test]
  fn test_resolve_branch_never_guesses() {
    let candidates = default_branches();
    let mut probed = Vec::new();
    let resolved = resolve_branch(&candidates, |name| {
      probed.push(name.to_string());
      false
    });
    assert_eq!(resolved, None);
    assert_eq!(probed, vec!["main", "master"]);
  }

  #[test]
  fn test_static_history_answers() {
    let provider = StaticHistory::unavailable(HistoryUnavailable::Untracked);
    assert_eq!(
      provider.change_history(Path::new("doc.md"), &default_branches()),
      Err(HistoryUnavailable::Untracked)
    );
  }
}
