//! Core implementation of the preprocessing pipeline.
use std::path::Path;

use log::{debug, info, warn};

use super::types::{PreprocessOptions, Preprocessor};
use crate::{
  assemble::assemble,
  headers::extract_headers,
  history::{HistoryProvider, render_history},
  toc::render_toc,
  types::{HistoryStatus, HistoryUnavailable, PreprocessResult},
};

impl Preprocessor {
  /// Create a new `Preprocessor` with the given options.
  #[must_use]
  pub const fn new(options: PreprocessOptions) -> Self {
    Self { options }
  }

  /// Access preprocessor options.
  #[must_use]
  pub const fn options(&self) -> &PreprocessOptions {
    &self.options
  }

  /// Insert a table of contents and, when available, a version history table
  /// after the document title.
  ///
  /// `path` identifies the document for the history provider. A document
  /// without any headers is returned unchanged and the provider is never
  /// consulted. History lookups that come back unavailable are logged and
  /// the document is produced without that section.
  ///
  /// Running this on its own output inserts a second table of contents;
  /// nothing detects an earlier run.
  pub fn process(
    &self,
    content: &str,
    path: &Path,
    provider: Option<&dyn HistoryProvider>,
  ) -> PreprocessResult {
    let headers = extract_headers(content);

    if headers.is_empty() {
      warn!("No headers found in {}, skipping TOC generation", path.display());
      return PreprocessResult {
        content: content.to_string(),
        headers,
        history: HistoryStatus::Skipped,
      };
    }

    let toc = render_toc(&headers, &self.options.toc_title);
    info!("Generated TOC with {} headers", headers.len());

    let (history, status) = self.render_history_for(path, provider);

    PreprocessResult {
      content: assemble(content, &toc, &history),
      headers,
      history: status,
    }
  }

  /// Look up history for `path` and render it, or explain why not.
  fn render_history_for(
    &self,
    path: &Path,
    provider: Option<&dyn HistoryProvider>,
  ) -> (String, HistoryStatus) {
    let Some(provider) = provider.filter(|_| self.options.history_enabled)
    else {
      debug!("Version history disabled for {}", path.display());
      return (String::new(), HistoryStatus::Disabled);
    };

    let lookup = provider
      .change_history(path, &self.options.preferred_branches)
      .and_then(|changes| {
        if changes.is_empty() {
          Err(HistoryUnavailable::NoHistory { branch: None })
        } else {
          Ok(changes)
        }
      });

    match lookup {
      Ok(changes) => {
        info!("Generated version history with {} commits", changes.len());
        (
          render_history(Some(&changes), &self.options.history_title),
          HistoryStatus::Included {
            count: changes.len(),
          },
        )
      },
      Err(reason) => {
        info!("Skipping version history: {reason}");
        (String::new(), HistoryStatus::Unavailable(reason))
      },
    }
  }
}
