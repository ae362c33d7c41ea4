//! Implementation of the `autobus leaves` command.

use std::path::Path;

use anyhow::Result;

use super::{load, resolve};

/// Print the leaf targets reachable from a target through selected edges, one
/// per line, sorted.
pub fn cmd_leaves(file: &Path, target: Option<&str>, features: &[String]) -> Result<()> {
  let manifest = load(file, features)?;
  let root = resolve(&manifest, target)?;

  let mut names: Vec<&str> = manifest
    .graph
    .selected_leaves(root)
    .into_iter()
    .map(|id| manifest.graph[id].name())
    .collect();
  names.sort_unstable();

  for name in names {
    println!("{}", name);
  }
  Ok(())
}
