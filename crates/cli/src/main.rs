mod cmd;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use autobus_lib::consts::{APP_NAME, DEFAULT_BUILD_FILE};

use crate::cmd::{BuildArgs, cmd_build, cmd_check, cmd_leaves, cmd_plan};
use crate::output::OutputFormat;

/// autobus - incremental build runner
#[derive(Parser)]
#[command(name = APP_NAME)]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable debug logging
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Build a target and whatever it depends on
  Build {
    /// Target to build (default: first target in the build file)
    target: Option<String>,

    /// Path to the build file
    #[arg(short, long, default_value = DEFAULT_BUILD_FILE)]
    file: PathBuf,

    /// Rebuild targets even when their outputs are current
    #[arg(long)]
    force: bool,

    /// Print actions without running them
    #[arg(long)]
    dry_run: bool,

    /// Maximum concurrent actions within a stage
    #[arg(short = 'j', long)]
    jobs: Option<usize>,

    /// Enable a feature, selecting dependencies gated on it
    #[arg(long = "feature")]
    features: Vec<String>,
  },

  /// Show which targets are stale, in build order
  Plan {
    /// Target to plan (default: first target in the build file)
    target: Option<String>,

    /// Path to the build file
    #[arg(short, long, default_value = DEFAULT_BUILD_FILE)]
    file: PathBuf,

    /// Enable a feature, selecting dependencies gated on it
    #[arg(long = "feature")]
    features: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t)]
    output: OutputFormat,
  },

  /// Verify that declared outputs exist
  Check {
    /// Target to check (default: first target in the build file)
    target: Option<String>,

    /// Path to the build file
    #[arg(short, long, default_value = DEFAULT_BUILD_FILE)]
    file: PathBuf,

    /// Enable a feature, selecting dependencies gated on it
    #[arg(long = "feature")]
    features: Vec<String>,
  },

  /// List the leaf targets a target depends on
  Leaves {
    /// Root target (default: first target in the build file)
    target: Option<String>,

    /// Path to the build file
    #[arg(short, long, default_value = DEFAULT_BUILD_FILE)]
    file: PathBuf,

    /// Enable a feature, selecting dependencies gated on it
    #[arg(long = "feature")]
    features: Vec<String>,
  },
}

fn main() -> ExitCode {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "debug" } else { "warn" };
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  match run(cli.command) {
    Ok(true) => ExitCode::SUCCESS,
    Ok(false) => ExitCode::FAILURE,
    Err(err) => {
      output::print_error(&format!("{:#}", err));
      ExitCode::FAILURE
    }
  }
}

/// Dispatch a subcommand. `Ok(false)` means it ran but reported a failure.
fn run(command: Commands) -> Result<bool> {
  match command {
    Commands::Build {
      target,
      file,
      force,
      dry_run,
      jobs,
      features,
    } => cmd_build(BuildArgs {
      target,
      file,
      force,
      dry_run,
      jobs,
      features,
    }),
    Commands::Plan {
      target,
      file,
      features,
      output,
    } => cmd_plan(&file, target.as_deref(), &features, output).map(|()| true),
    Commands::Check {
      target,
      file,
      features,
    } => cmd_check(&file, target.as_deref(), &features),
    Commands::Leaves {
      target,
      file,
      features,
    } => cmd_leaves(&file, target.as_deref(), &features).map(|()| true),
  }
}
