use std::path::{Path, PathBuf};

use color_eyre::eyre::{Context, Result, bail};
use log::{LevelFilter, info, warn};
use mdprep::{
  cli::{Cli, Commands},
  utils::{self, DocumentReport},
};
use mdprep_config::Config;
use mdprep_core::{HistoryProvider, HistoryStatus};
use mdprep_git::GitHistory;

fn main() -> Result<()> {
  color_eyre::install()?;

  let cli = Cli::parse_args();

  // Initialize logging first so we can log during command handling
  env_logger::Builder::new()
    .filter_level(if cli.verbose {
      LevelFilter::Debug
    } else {
      LevelFilter::Info
    })
    .write_style(env_logger::WriteStyle::Always)
    .init();

  match &cli.command {
    Commands::Init {
      output,
      format,
      force,
    } => init_config(output, format, *force),

    Commands::Process {
      input,
      output,
      repo,
      no_history,
    } => {
      let config =
        utils::load_config(&cli.config_files, &cli.config_overrides, *no_history)?;
      process_single(&config, input, output, repo.as_deref())
    },

    Commands::Batch {
      input_dir,
      output_dir,
      repo,
      jobs,
      no_history,
    } => {
      let mut config =
        utils::load_config(&cli.config_files, &cli.config_overrides, *no_history)?;
      if jobs.is_some() {
        config.jobs = *jobs;
        config.validate()?;
      }
      process_batch(&config, input_dir, output_dir, repo.as_deref())
    },
  }
}

/// Write a default configuration file.
fn init_config(output: &Path, format: &str, force: bool) -> Result<()> {
  // Check if file already exists and that we're not forcing overwrite
  if output.exists() && !force {
    bail!(
      "Configuration file already exists: {}. Use --force to overwrite.",
      output.display()
    );
  }

  if let Some(parent) = output.parent()
    && !parent.as_os_str().is_empty()
    && !parent.exists()
  {
    std::fs::create_dir_all(parent).wrap_err_with(|| {
      format!("Failed to create directory: {}", parent.display())
    })?;
    info!("Created directory: {}", parent.display());
  }

  Config::generate_default_config(format, output).wrap_err_with(|| {
    format!(
      "Failed to generate configuration file: {}",
      output.display()
    )
  })?;

  info!(
    "Configuration file created successfully. Edit it to customize the \
     generated sections."
  );
  Ok(())
}

/// Preprocess one document.
fn process_single(
  config: &Config,
  input: &Path,
  output: &Path,
  repo: Option<&Path>,
) -> Result<()> {
  let input = std::path::absolute(input)
    .wrap_err_with(|| format!("Invalid input path: {}", input.display()))?;
  let output = std::path::absolute(output)
    .wrap_err_with(|| format!("Invalid output path: {}", output.display()))?;

  if !input.is_file() {
    bail!("Input file not found: {}", input.display());
  }

  let repo = repo.map_or_else(
    || input.parent().map(Path::to_path_buf).unwrap_or_default(),
    Path::to_path_buf,
  );

  let preprocessor = utils::create_preprocessor(config);
  let provider = history_provider(config, repo);

  let report = utils::preprocess_file(
    &preprocessor,
    provider.as_ref().map(|p| p as &dyn HistoryProvider),
    &input,
    &output,
  )
  .wrap_err_with(|| format!("Failed to process {}", input.display()))?;

  log_report(&report);
  Ok(())
}

/// Preprocess every document below `input_dir` in parallel.
fn process_batch(
  config: &Config,
  input_dir: &Path,
  output_dir: &Path,
  repo: Option<&Path>,
) -> Result<()> {
  if !input_dir.is_dir() {
    bail!("Input directory not found: {}", input_dir.display());
  }

  let thread_count = config.jobs.unwrap_or_else(num_cpus::get);
  rayon::ThreadPoolBuilder::new()
    .num_threads(thread_count)
    .build_global()
    .wrap_err("Failed to set up the thread pool")?;

  let repo = repo.unwrap_or(input_dir).to_path_buf();
  let preprocessor = utils::create_preprocessor(config);
  let provider = history_provider(config, repo);

  let reports = utils::preprocess_directory(
    &preprocessor,
    provider.as_ref().map(|p| p as &dyn HistoryProvider),
    input_dir,
    output_dir,
  )
  .wrap_err_with(|| format!("Failed to process {}", input_dir.display()))?;

  let modified = reports.iter().filter(|r| r.is_modified()).count();
  let with_history = reports
    .iter()
    .filter(|r| matches!(r.history, HistoryStatus::Included { .. }))
    .count();

  info!(
    "Processed {} documents ({modified} with TOC, {with_history} with version \
     history) into {}",
    reports.len(),
    output_dir.display()
  );
  Ok(())
}

/// The history provider for `repo`, unless history is turned off.
fn history_provider(config: &Config, repo: PathBuf) -> Option<GitHistory> {
  config.history_enabled().then(|| GitHistory::new(repo))
}

fn log_report(report: &DocumentReport) {
  match &report.history {
    HistoryStatus::Included { count } => {
      info!("Inserted TOC and version history ({count} commits)");
    },
    HistoryStatus::Unavailable(reason) => {
      info!("Inserted TOC without version history: {reason}");
    },
    HistoryStatus::Disabled => info!("Inserted TOC (version history disabled)"),
    HistoryStatus::Skipped => {
      warn!("No headers found, copied document unchanged");
    },
  }
}
