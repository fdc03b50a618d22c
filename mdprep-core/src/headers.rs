//! Line-anchored ATX header detection.
//!
//! Only `#` through `####` at column 0 are recognized. There is no code fence
//! tracking, so a matching line inside a fenced block is still reported.
use std::sync::LazyLock;

use regex::Regex;

use crate::{types::Header, utils};

static HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^(#{1,4})\s+(.+)$").unwrap_or_else(|e| {
    log::error!("Failed to compile HEADER_RE regex: {e}");
    utils::never_matching_regex()
  })
});

static TITLE_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^#\s+").unwrap_or_else(|e| {
    log::error!("Failed to compile TITLE_RE regex: {e}");
    utils::never_matching_regex()
  })
});

/// Parse a single line as a header.
///
/// Returns `None` for anything that is not a level 1-4 header with non-empty
/// text.
#[must_use]
pub fn parse_header_line(line: &str) -> Option<Header> {
  let caps = HEADER_RE.captures(line)?;
  let text = caps.get(2)?.as_str().trim();
  if text.is_empty() {
    return None;
  }

  #[allow(
    clippy::cast_possible_truncation,
    reason = "The pattern caps the marker at four characters"
  )]
  let level = caps.get(1)?.len() as u8;

  Some(Header {
    level,
    text: text.to_string(),
    slug: utils::slugify(text),
  })
}

/// Extract all headers from a document, in document order.
#[must_use]
pub fn extract_headers(content: &str) -> Vec<Header> {
  content.split('\n').filter_map(parse_header_line).collect()
}

/// Whether the line is a single-`#` title header.
#[must_use]
pub fn is_title_line(line: &str) -> bool {
  TITLE_RE.is_match(line)
}
