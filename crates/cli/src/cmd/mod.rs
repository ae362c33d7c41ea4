mod build;
mod check;
mod leaves;
mod plan;

pub use build::{BuildArgs, cmd_build};
pub use check::cmd_check;
pub use leaves::cmd_leaves;
pub use plan::cmd_plan;

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{Context, Result, anyhow};

use autobus_lib::manifest::{Manifest, load_manifest};
use autobus_lib::target::TargetId;

/// Load the build file with the given features enabled.
fn load(file: &Path, features: &[String]) -> Result<Manifest> {
  let features: BTreeSet<String> = features.iter().cloned().collect();
  load_manifest(file, &features).with_context(|| format!("Failed to load build file: {}", file.display()))
}

/// Resolve a target name, falling back to the first target in the file.
fn resolve(manifest: &Manifest, target: Option<&str>) -> Result<TargetId> {
  manifest.resolve_target(target).ok_or_else(|| match target {
    Some(name) => anyhow!("No such target: {}", name),
    None => anyhow!("Build file defines no targets"),
  })
}
