//! Splicing generated sections into a document.
use crate::{headers::is_title_line, utils::is_blank_line};

/// Find the line index at which generated content is inserted.
///
/// This is the line after the first `# Title` header, or the start of the
/// document when there is no title. Blank lines directly after that point
/// are skipped.
#[must_use]
pub fn find_insertion_point(lines: &[&str]) -> usize {
  let mut index = lines
    .iter()
    .position(|line| is_title_line(line))
    .map_or(0, |title| title + 1);

  while index < lines.len() && is_blank_line(lines[index]) {
    index += 1;
  }

  index
}

/// Insert the table of contents and history block into a document.
///
/// Everything up to the insertion point is kept as is, followed by a blank
/// line, the generated sections and the rest of the document. Assembly never
/// fails; callers decide beforehand whether there is anything to insert.
///
/// # Examples
///
/// ```
/// use mdprep_core::assemble::assemble;
///
/// let out = assemble("# Title\n\ntext", "TOC\n", "");
/// assert_eq!(out, "# Title\n\n\nTOC\ntext");
/// ```
#[must_use]
pub fn assemble(content: &str, toc: &str, history: &str) -> String {
  let lines: Vec<&str> = content.split('\n').collect();
  let index = find_insertion_point(&lines);

  let before = lines[..index].join("\n");
  let after = lines[index..].join("\n");

  let mut output = String::with_capacity(
    content.len() + toc.len() + history.len() + 2,
  );
  output.push_str(&before);
  output.push_str("\n\n");
  output.push_str(toc);
  output.push_str(history);
  output.push_str(&after);
  output
}
