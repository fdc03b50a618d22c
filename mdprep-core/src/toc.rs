//! Table of contents rendering.
use std::fmt::Write;

use crate::types::Header;

/// Heading used for the generated table of contents.
pub const DEFAULT_TOC_TITLE: &str = "Table of Contents";

/// Indentation added per header level below 2.
const INDENT_UNIT: &str = "  ";

/// Render a table of contents as a nested Markdown list.
///
/// Level 1 headers are left out since the document title is already the
/// first thing on the page. Nesting comes from the header level alone, so a
/// level 4 header directly under a level 2 one is still indented twice.
///
/// The section heading is emitted at level 2 and the list is closed by a
/// horizontal rule followed by a blank line. A document with only level 1
/// headers produces the heading and the rule with nothing in between.
///
/// # Examples
///
/// ```
/// use mdprep_core::{headers::extract_headers, toc::render_toc};
///
/// let headers = extract_headers("# Title\n## Intro\n### Details\n");
/// let toc = render_toc(&headers, "Table of Contents");
/// assert!(toc.contains("- [Intro](#intro)\n  - [Details](#details)\n"));
/// ```
#[must_use]
pub fn render_toc(headers: &[Header], title: &str) -> String {
  let mut toc = String::with_capacity(64 + headers.len() * 48);
  toc.push_str("## ");
  toc.push_str(title);
  toc.push_str("\n\n");

  for header in headers.iter().filter(|h| h.level >= 2) {
    let indent = INDENT_UNIT.repeat(usize::from(header.level - 2));

    // Writing to String is infallible
    let _ = writeln!(toc, "{indent}- [{}](#{})", header.text, header.slug);
  }

  toc.push_str("\n---\n\n");
  toc
}
