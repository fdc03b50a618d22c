//! Document version history read from a Git repository.
//!
//! [`GitHistory`] implements [`HistoryProvider`] by running the `git`
//! executable. History is only ever read from one of the preferred branches
//! (by default `main`, then `master`), following renames of the document.
use std::{
  ffi::OsStr,
  fs,
  path::{Path, PathBuf},
  process::{Command, Stdio},
};

use log::{debug, info};
use mdprep_core::{
  ChangeRecord,
  HistoryProvider,
  HistoryUnavailable,
  history::resolve_branch,
};

/// Separates date and subject in the `git log` output. Commit subjects
/// cannot contain it.
const FIELD_SEPARATOR: char = '\u{1f}';

#[derive(Debug, thiserror::Error)]
pub enum GitError {
  #[error("failed to run git: {0}")]
  Io(#[from] std::io::Error),

  #[error("git output is not UTF-8: {0}")]
  FromUtf8(#[from] std::string::FromUtf8Error),

  #[error("`git {command}` failed: {stderr}")]
  Command { command: String, stderr: String },
}

/// History provider backed by a Git working tree.
#[derive(Debug, Clone)]
pub struct GitHistory {
  repo: PathBuf,
}

impl GitHistory {
  /// Create a provider for the repository containing `repo`. The directory
  /// does not have to be the top level of the working tree.
  #[must_use]
  pub fn new(repo: impl Into<PathBuf>) -> Self {
    Self { repo: repo.into() }
  }

  /// The directory git commands are run in.
  #[must_use]
  pub fn repo(&self) -> &Path {
    &self.repo
  }

  /// Run git in `dir` and return its stdout, failing on a non-zero exit.
  fn run<I, S>(dir: &Path, args: I) -> Result<String, GitError>
  where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
  {
    let args: Vec<S> = args.into_iter().collect();
    let output = Command::new("git")
      .current_dir(dir)
      .args(&args)
      .stdin(Stdio::null())
      .output()?;

    if output.status.success() {
      Ok(String::from_utf8(output.stdout)?)
    } else {
      let command = args
        .iter()
        .map(|arg| arg.as_ref().to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ");
      Err(GitError::Command {
        command,
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
      })
    }
  }

  /// Whether the directory is inside a Git working tree.
  ///
  /// # Errors
  ///
  /// Returns an error if git cannot be run at all.
  pub fn is_repository(&self) -> Result<bool, GitError> {
    let output = Command::new("git")
      .current_dir(&self.repo)
      .args(["rev-parse", "--is-inside-work-tree"])
      .stdin(Stdio::null())
      .stderr(Stdio::null())
      .output()?;

    Ok(output.status.success() && String::from_utf8(output.stdout)?.trim() == "true")
  }

  /// Absolute path of the top level of the working tree.
  ///
  /// # Errors
  ///
  /// Returns an error if git fails.
  pub fn toplevel(&self) -> Result<PathBuf, GitError> {
    let stdout = Self::run(&self.repo, ["rev-parse", "--show-toplevel"])?;
    Ok(PathBuf::from(stdout.trim()))
  }

  /// Whether a branch (or any ref resolving to a commit) with this name
  /// exists.
  ///
  /// # Errors
  ///
  /// Returns an error if git cannot be run at all.
  pub fn branch_exists(&self, name: &str) -> Result<bool, GitError> {
    if name.is_empty() || name.starts_with('-') {
      return Ok(false);
    }

    let status = Command::new("git")
      .current_dir(&self.repo)
      .args(["rev-parse", "--verify", "--quiet"])
      .arg(format!("{name}^{{commit}}"))
      .stdin(Stdio::null())
      .stdout(Stdio::null())
      .stderr(Stdio::null())
      .status()?;

    Ok(status.success())
  }

  /// Changes to `relative_path` reachable from `branch`, most recent first,
  /// following renames. `root` must be the top level of the working tree.
  ///
  /// # Errors
  ///
  /// Returns an error if `git log` fails.
  pub fn log(
    &self,
    root: &Path,
    branch: &str,
    relative_path: &Path,
  ) -> Result<Vec<ChangeRecord>, GitError> {
    let format = format!("--format=%ad{FIELD_SEPARATOR}%s");
    let stdout = Self::run(root, [
      OsStr::new("log"),
      OsStr::new("--follow"),
      OsStr::new("--date=short"),
      OsStr::new(&format),
      OsStr::new(branch),
      OsStr::new("--"),
      relative_path.as_os_str(),
    ])?;

    Ok(parse_log(&stdout))
  }
}

impl HistoryProvider for GitHistory {
  fn change_history(
    &self,
    path: &Path,
    preferred_branches: &[String],
  ) -> Result<Vec<ChangeRecord>, HistoryUnavailable> {
    let failed = |e: GitError| HistoryUnavailable::Failed(e.to_string());

    if !self.is_repository().map_err(failed)? {
      return Err(HistoryUnavailable::Untracked);
    }

    let root = self.toplevel().map_err(failed)?;
    let relative = relative_to_root(&root, path);

    let mut probe_error = None;
    let branch = resolve_branch(preferred_branches, |name| {
      self.branch_exists(name).unwrap_or_else(|e| {
        if probe_error.is_none() {
          probe_error = Some(e);
        }
        false
      })
    });

    let Some(branch) = branch else {
      return Err(probe_error.map_or_else(
        || HistoryUnavailable::NoBranch {
          tried: preferred_branches.to_vec(),
        },
        failed,
      ));
    };
    info!("Using '{branch}' branch for version history");

    let changes = self.log(&root, branch, &relative).map_err(failed)?;
    debug!(
      "Found {} commits for {} on {branch}",
      changes.len(),
      relative.display()
    );

    if changes.is_empty() {
      return Err(HistoryUnavailable::NoHistory {
        branch: Some(branch.to_string()),
      });
    }

    Ok(changes)
  }
}

/// Express `path` relative to the working tree root.
///
/// Both sides are canonicalized when possible so symlinked temp or home
/// directories still line up. Paths outside the root are returned as is and
/// left for git to reject.
fn relative_to_root(root: &Path, path: &Path) -> PathBuf {
  let root = fs::canonicalize(root).unwrap_or_else(|_| root.to_path_buf());
  let path = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());

  path
    .strip_prefix(&root)
    .map_or_else(|_| path.clone(), Path::to_path_buf)
}

/// Parse `git log` output produced with `--format=%ad<US>%s`.
///
/// Lines without a separator are skipped.
#[must_use]
pub fn parse_log(stdout: &str) -> Vec<ChangeRecord> {
  stdout
    .lines()
    .filter(|line| !line.is_empty())
    .filter_map(|line| {
      let parsed = line.split_once(FIELD_SEPARATOR);
      if parsed.is_none() {
        debug!("Skipping unexpected git log line: {line}");
      }
      parsed
    })
    .map(|(date, message)| ChangeRecord::new(date.trim(), message.trim()))
    .collect()
}
