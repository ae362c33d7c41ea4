//! Implementation of the `autobus check` command.

use std::path::Path;

use anyhow::{Context, Result};

use autobus_lib::driver::check_outputs;
use autobus_lib::path::OsFileSystem;

use super::{load, resolve};
use crate::output::{print_error, print_success};

/// Verify the declared outputs of a target and its selected dependencies.
///
/// Returns `Ok(false)` when any output is missing.
pub fn cmd_check(file: &Path, target: Option<&str>, features: &[String]) -> Result<bool> {
  let manifest = load(file, features)?;
  let root = resolve(&manifest, target)?;

  let missing = check_outputs(&manifest.graph, root, &OsFileSystem).context("Failed to check outputs")?;

  if missing.is_empty() {
    print_success("All declared outputs exist");
    return Ok(true);
  }

  for err in &missing {
    print_error(&err.to_string());
  }
  Ok(false)
}
