//! # mdprep - Markdown preprocessing for document conversion
//!
//! Inserts a table of contents and, for documents tracked in a repository, a
//! version history table right after the document title. The result is meant
//! to be handed to a downstream converter (e.g. to PDF), whose anchor
//! convention the generated links follow.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::path::Path;
//!
//! use mdprep_core::{PreprocessOptions, Preprocessor};
//!
//! let preprocessor = Preprocessor::new(PreprocessOptions::default());
//! let result = preprocessor.process(
//!   "# Guide\n\n## Install\n\n## API Reference\n",
//!   Path::new("guide.md"),
//!   None,
//! );
//!
//! assert!(result.content.contains("- [API Reference](#api-reference)"));
//! ```
//!
//! ## Version history
//!
//! History comes from a [`HistoryProvider`]. The core ships
//! [`StaticHistory`] for fixed data; the `mdprep-git` crate reads it from a
//! Git repository.
//!
//! ```rust
//! use std::path::Path;
//!
//! use mdprep_core::{ChangeRecord, Preprocessor, StaticHistory};
//!
//! let provider =
//!   StaticHistory::with_changes(vec![ChangeRecord::new("2024-01-01", "Initial")]);
//! let result = Preprocessor::default().process(
//!   "# Guide\n\n## Install\n",
//!   Path::new("guide.md"),
//!   Some(&provider),
//! );
//!
//! assert!(result.content.contains("| 2024-01-01 | Initial |"));
//! ```
//!
//! ## Limitations
//!
//! Only ATX headers of level 1-4 at the start of a line are recognized. There
//! is no code fence awareness and no setext header support. Colliding slugs
//! are not deduplicated, and processing already processed output inserts a
//! second table of contents.

pub mod assemble;
pub mod headers;
pub mod history;
pub mod processor;
pub mod toc;
mod types;
pub mod utils;

pub use crate::{
  history::{HistoryProvider, StaticHistory},
  processor::{PreprocessOptions, Preprocessor},
  types::{
    ChangeRecord,
    Header,
    HistoryStatus,
    HistoryUnavailable,
    PreprocessResult,
  },
};
