use std::path::{Path, PathBuf};

use log::trace;
use regex::Regex;
use walkdir::WalkDir;

/// Slugify header text into an anchor ID.
///
/// Lowercases the input and drops everything that is not an ASCII letter,
/// ASCII digit, underscore, whitespace or hyphen, so accented and non-Latin
/// letters disappear from the slug. Runs of whitespace and hyphens become a
/// single hyphen, and leading/trailing separators are trimmed. The result
/// follows the anchor convention used by common Markdown renderers, so links
/// produced from it resolve in the rendered document.
///
/// # Examples
///
/// ```
/// use mdprep_core::utils::slugify;
///
/// assert_eq!(slugify("API Reference"), "api-reference");
/// assert_eq!(slugify("Hello, World!"), "hello-world");
/// ```
#[must_use]
pub fn slugify(text: &str) -> String {
  let lowered = text.to_lowercase();
  let mut slug = String::with_capacity(lowered.len());
  let mut pending_separator = false;

  for c in lowered.chars() {
    if c.is_whitespace() || c == '-' {
      pending_separator = true;
    } else if c.is_ascii_alphanumeric() || c == '_' {
      // Separators are only emitted between kept characters, which also
      // trims them from both ends.
      if pending_separator && !slug.is_empty() {
        slug.push('-');
      }
      pending_separator = false;
      slug.push(c);
    }
  }

  slug
}

/// Return true if the line is empty or whitespace-only.
#[must_use]
pub fn is_blank_line(line: &str) -> bool {
  line.trim().is_empty()
}

/// Collect all markdown files below the input directory, sorted by path.
pub fn collect_markdown_files(input_dir: &Path) -> Vec<PathBuf> {
  let mut files = Vec::with_capacity(32);

  for entry in WalkDir::new(input_dir)
    .follow_links(true)
    .sort_by_file_name()
    .into_iter()
    .filter_map(Result::ok)
  {
    let path = entry.path();
    if path.is_file() && path.extension().is_some_and(|ext| ext == "md") {
      files.push(path.to_owned());
    }
  }

  trace!("Found {} markdown files to process", files.len());
  files
}

/// Create a regex that never matches anything.
///
/// Used as a fallback when one of the static patterns fails to compile, so a
/// broken pattern degrades to "no match" instead of panicking.
#[must_use]
pub fn never_matching_regex() -> Regex {
  #[allow(
    clippy::expect_used,
    reason = "This pattern is guaranteed to be valid"
  )]
  Regex::new(r"[^\s\S]").expect("regex pattern [^\\s\\S] should always compile")
}
