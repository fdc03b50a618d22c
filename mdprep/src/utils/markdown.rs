use std::{
  fs,
  path::{Path, PathBuf},
};

use log::info;
use mdprep_core::{
  HistoryProvider,
  HistoryStatus,
  Preprocessor,
  utils::collect_markdown_files,
};
use rayon::prelude::*;

use crate::error::MdprepError;

/// Outcome of preprocessing one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentReport {
  pub input:   PathBuf,
  pub output:  PathBuf,
  pub headers: usize,
  pub history: HistoryStatus,
}

impl DocumentReport {
  /// Whether a table of contents was inserted.
  #[must_use]
  pub const fn is_modified(&self) -> bool {
    self.headers > 0
  }
}

/// Preprocess `input` and write the result to `output`.
///
/// The input is checked before anything is written, so a missing input never
/// leaves a partial output behind. Documents without headers are written
/// unchanged. Parent directories of `output` are created as needed.
///
/// # Errors
///
/// Returns an error if the input does not exist or cannot be read, or if the
/// output cannot be written.
pub fn preprocess_file(
  preprocessor: &Preprocessor,
  provider: Option<&dyn HistoryProvider>,
  input: &Path,
  output: &Path,
) -> Result<DocumentReport, MdprepError> {
  if !input.is_file() {
    return Err(MdprepError::InputNotFound(input.to_path_buf()));
  }

  info!("Processing: {}", display_name(input));

  let content = fs::read_to_string(input).map_err(|source| {
    MdprepError::Read {
      path: input.to_path_buf(),
      source,
    }
  })?;

  let result = preprocessor.process(&content, input, provider);

  let write_error = |source| {
    MdprepError::Write {
      path: output.to_path_buf(),
      source,
    }
  };

  if let Some(parent) = output.parent()
    && !parent.as_os_str().is_empty()
  {
    fs::create_dir_all(parent).map_err(write_error)?;
  }
  fs::write(output, &result.content).map_err(write_error)?;

  info!("Saved to: {}", display_name(output));

  Ok(DocumentReport {
    input:   input.to_path_buf(),
    output:  output.to_path_buf(),
    headers: result.headers.len(),
    history: result.history,
  })
}

/// Preprocess every markdown file below `input_dir` in parallel.
///
/// Outputs mirror the input layout below `output_dir`. Each document goes
/// through its own pipeline; the first failure is returned.
///
/// # Errors
///
/// Returns the first error encountered while processing a file.
pub fn preprocess_directory(
  preprocessor: &Preprocessor,
  provider: Option<&dyn HistoryProvider>,
  input_dir: &Path,
  output_dir: &Path,
) -> Result<Vec<DocumentReport>, MdprepError> {
  info!("Input directory: {}", input_dir.display());
  let files = collect_markdown_files(input_dir);
  info!("Found {} markdown files", files.len());

  files
    .par_iter()
    .map(|file| {
      let output = output_path_for(input_dir, output_dir, file);
      preprocess_file(preprocessor, provider, file, &output)
    })
    .collect()
}

/// Map a file below `input_dir` to the same relative location below
/// `output_dir`. Files outside `input_dir` keep only their file name.
#[must_use]
pub fn output_path_for(input_dir: &Path, output_dir: &Path, file: &Path) -> PathBuf {
  file.strip_prefix(input_dir).map_or_else(
    |_| output_dir.join(file.file_name().unwrap_or(file.as_os_str())),
    |relative| output_dir.join(relative),
  )
}

fn display_name(path: &Path) -> String {
  path
    .file_name()
    .map_or_else(|| path.display().to_string(), |name| {
      name.to_string_lossy().into_owned()
    })
}
