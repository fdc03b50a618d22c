use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Command line interface for mdprep
#[derive(Parser, Debug)]
#[command(
  author,
  version,
  about = "mdprep: insert a table of contents and version history into \
           Markdown documents"
)]
pub struct Cli {
  /// Subcommand to execute (see [`Commands`])
  #[command(subcommand)]
  pub command: Commands,

  /// Enable verbose debug logging
  #[arg(short, long, global = true)]
  pub verbose: bool,

  /// Path to configuration file(s) (TOML or JSON, can be specified multiple
  /// times). Multiple files are merged in order, with later files overriding
  /// earlier ones
  #[arg(
    short = 'c',
    long = "config-file",
    global = true,
    action = clap::ArgAction::Append
  )]
  pub config_files: Vec<PathBuf>,

  /// Override configuration values (KEY=VALUE format, can be used multiple
  /// times)
  #[arg(long = "config", global = true, action = clap::ArgAction::Append)]
  pub config_overrides: Vec<String>,
}

/// All supported subcommands for the mdprep CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Preprocess a single Markdown document.
  Process {
    /// Markdown file to read.
    input: PathBuf,

    /// Where to write the processed document.
    output: PathBuf,

    /// Directory inside the repository to read history from. Defaults to the
    /// directory containing the input file.
    repo: Option<PathBuf>,

    /// Do not insert a version history table.
    #[arg(long)]
    no_history: bool,
  },

  /// Preprocess every Markdown document below a directory.
  Batch {
    /// Directory containing markdown files.
    #[arg(short, long)]
    input_dir: PathBuf,

    /// Output directory; the input tree layout is mirrored below it.
    #[arg(short, long)]
    output_dir: PathBuf,

    /// Directory inside the repository to read history from. Defaults to the
    /// input directory.
    #[arg(short, long)]
    repo: Option<PathBuf>,

    /// Number of threads to use for parallel processing.
    #[arg(
      short = 'p',
      long = "jobs",
      value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..)
    )]
    jobs: Option<usize>,

    /// Do not insert version history tables.
    #[arg(long)]
    no_history: bool,
  },

  /// Initialize a new mdprep configuration file
  Init {
    /// Path to create the configuration file at
    #[arg(short, long, default_value = "mdprep.toml")]
    output: PathBuf,

    /// Format of the configuration file.
    #[arg(short = 'F', long, default_value = "toml", value_parser = ["toml", "json"])]
    format: String,

    /// Force overwrite if file already exists
    #[arg(short, long)]
    force: bool,
  },
}

impl Cli {
  /// Parse command line arguments into a [`Cli`] struct.
  #[must_use]
  pub fn parse_args() -> Self {
    Self::parse()
  }
}
