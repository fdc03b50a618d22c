#![allow(clippy::expect_used, reason = "Fine in tests")]
use std::{fs, path::Path};

use mdprep_core::{
  ChangeRecord,
  HistoryStatus,
  HistoryUnavailable,
  PreprocessOptions,
  Preprocessor,
  StaticHistory,
  utils::collect_markdown_files,
};
use tempfile::tempdir;

#[test]
fn test_toc_inserted_after_title_blank_line() {
  let result = Preprocessor::default().process(
    "# Title\n\ntext\n\n## Section\n",
    Path::new("doc.md"),
    None,
  );

  let toc_at = result
    .content
    .find("## Table of Contents")
    .expect("TOC should be inserted");
  let text_at = result.content.find("text").expect("body should remain");
  let title_end = "# Title\n\n".len();

  assert!(title_end <= toc_at, "TOC must follow the title blank line");
  assert!(toc_at < text_at, "TOC must precede the body");
  assert!(result.content.starts_with("# Title\n"));
  assert!(result.content.ends_with("text\n\n## Section\n"));
}

#[test]
fn test_zero_headers_is_byte_identical() {
  let content = "No headers.\r\n\n  # indented is not a header\n";
  let provider =
    StaticHistory::with_changes(vec![ChangeRecord::new("2024-01-01", "x")]);
  let result = Preprocessor::default().process(
    content,
    Path::new("doc.md"),
    Some(&provider),
  );

  assert_eq!(result.content.as_bytes(), content.as_bytes());
}

#[test]
fn test_unavailable_history_leaves_no_section() {
  let provider = StaticHistory::unavailable(HistoryUnavailable::NoBranch {
    tried: vec!["main".to_string(), "master".to_string()],
  });
  let result = Preprocessor::default().process(
    "# Title\n\n## Section\n",
    Path::new("doc.md"),
    Some(&provider),
  );

  assert!(!result.content.contains("Document Version History"));
  assert!(result.content.contains("## Table of Contents"));
  assert!(matches!(
    result.history,
    HistoryStatus::Unavailable(HistoryUnavailable::NoBranch { .. })
  ));
}

#[test]
fn test_history_follows_toc_without_gap_rows() {
  let provider =
    StaticHistory::with_changes(vec![ChangeRecord::new("2024-01-01", "Initial")]);
  let result = Preprocessor::default().process(
    "# Title\n\nBody\n\n## Section\n",
    Path::new("doc.md"),
    Some(&provider),
  );

  assert!(result.content.contains(
    "\n---\n\n## Document Version History\n\n| Date | Changes \
     |\n|------|----------|\n| 2024-01-01 | Initial |\n---\nBody\n"
  ));
}

#[test]
fn test_second_pass_duplicates_toc() {
  let preprocessor = Preprocessor::default();
  let first =
    preprocessor.process("# Title\n\n## Section\n", Path::new("doc.md"), None);
  let second = preprocessor.process(&first.content, Path::new("doc.md"), None);

  // Nothing guards against re-processing; the generated TOC heading is itself
  // a level 2 header and ends up listed in the second TOC.
  assert_eq!(second.content.matches("## Table of Contents").count(), 2);
  assert!(
    second
      .content
      .contains("- [Table of Contents](#table-of-contents)")
  );
}

#[test]
fn test_custom_titles() {
  let provider =
    StaticHistory::with_changes(vec![ChangeRecord::new("2024-01-01", "x")]);
  let preprocessor = Preprocessor::new(PreprocessOptions {
    toc_title: "Contents".to_string(),
    history_title: "Revisions".to_string(),
    ..Default::default()
  });
  let result =
    preprocessor.process("# T\n## A\n", Path::new("doc.md"), Some(&provider));

  assert!(result.content.contains("## Contents\n\n- [A](#a)\n"));
  assert!(result.content.contains("## Revisions\n\n| Date | Changes |"));
}

#[test]
fn test_collect_markdown_files() {
  let temp_dir = tempdir().expect("Failed to create temp dir in test");
  let nested = temp_dir.path().join("guide");
  fs::create_dir_all(&nested).expect("Failed to create dir in test");
  fs::write(temp_dir.path().join("README.md"), "# Readme")
    .expect("Failed to write file in test");
  fs::write(nested.join("install.md"), "# Install")
    .expect("Failed to write file in test");
  fs::write(nested.join("notes.txt"), "not markdown")
    .expect("Failed to write file in test");

  let files = collect_markdown_files(temp_dir.path());
  assert_eq!(files.len(), 2);
  assert!(files.iter().all(|f| f.extension().is_some_and(|e| e == "md")));
}
