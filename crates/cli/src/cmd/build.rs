//! Implementation of the `autobus build` command.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};

use autobus_lib::driver::{BuildOptions, build_target};
use autobus_lib::execute::{CommandRunner, ExecuteConfig};
use autobus_lib::path::OsFileSystem;

use super::{load, resolve};
use crate::output::{format_duration, print_error, print_stat, print_success, print_warning};

pub struct BuildArgs {
  pub target: Option<String>,
  pub file: PathBuf,
  pub force: bool,
  pub dry_run: bool,
  pub jobs: Option<usize>,
  pub features: Vec<String>,
}

/// Build the requested target and its selected dependencies.
///
/// Returns `Ok(false)` when a target failed; the failure has been printed.
pub fn cmd_build(args: BuildArgs) -> Result<bool> {
  let mut manifest = load(&args.file, &args.features)?;
  let root = resolve(&manifest, args.target.as_deref())?;

  let mut execute = ExecuteConfig {
    dry_run: args.dry_run,
    ..ExecuteConfig::default()
  };
  if let Some(jobs) = args.jobs {
    execute.parallelism = jobs.max(1);
  }
  let options = BuildOptions {
    force: args.force,
    execute,
  };

  if options.execute.dry_run {
    print_warning("Dry run: actions are printed, not executed");
  }

  let runner = Arc::new(CommandRunner::new(&options.execute));
  let started = Instant::now();

  let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
  let report = rt
    .block_on(build_target(&mut manifest.graph, root, &runner, &OsFileSystem, &options))
    .context("Build failed")?;

  if let Some((name, err)) = &report.failed {
    print_error(&format!("Target '{}' failed: {}", name, err));
    print_stat("Built", &report.built.len().to_string());
    print_stat("Not attempted", &report.skipped.len().to_string());
    return Ok(false);
  }

  if report.built.is_empty() {
    print_success(&format!("'{}' is up to date", manifest.graph[root].name()));
  } else {
    print_success(&format!(
      "Built {} target(s) in {}",
      report.built.len(),
      format_duration(started.elapsed())
    ));
    for name in &report.built {
      println!("  {}", name);
    }
  }
  print_stat("Up to date", &report.up_to_date.len().to_string());

  Ok(true)
}
