//! Implementation of the `autobus plan` command.
//!
//! Reports which selected targets are stale without running anything.

use std::path::Path;

use anyhow::{Context, Result};

use autobus_lib::driver::plan;
use autobus_lib::path::OsFileSystem;

use super::{load, resolve};
use crate::output::{OutputFormat, print_info, print_json, print_target_line};

pub fn cmd_plan(file: &Path, target: Option<&str>, features: &[String], output: OutputFormat) -> Result<()> {
  let manifest = load(file, features)?;
  let root = resolve(&manifest, target)?;

  let plan = plan(&manifest.graph, root, &OsFileSystem).context("Failed to compute plan")?;

  if output.is_json() {
    return print_json(&plan);
  }

  print_info(&format!("Plan for '{}'", plan.root));
  for (index, wave) in plan.waves.iter().enumerate() {
    println!("Wave {}:", index + 1);
    for target in wave {
      let detail = if target.dependencies.is_empty() {
        format!("({} stage(s))", target.stages)
      } else {
        format!("({} stage(s), after {})", target.stages, target.dependencies.join(", "))
      };
      print_target_line(&target.name, target.stale, &detail);
    }
  }
  println!();
  println!("Stale: {} of {}", plan.stale_count(), plan.targets().count());

  Ok(())
}
