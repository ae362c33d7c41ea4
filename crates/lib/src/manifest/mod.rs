//! The build file.
//!
//! A TOML document listing targets with their inputs, outputs, dependencies and
//! stages. Loading it produces a [`Manifest`]: a ready-to-walk [`BuildGraph`]
//! whose relative paths and commands are anchored at the build file's directory.

mod load;
mod types;

pub use load::{Manifest, load_manifest, parse_manifest};
pub use types::{ActionSpec, ActionTable, BuildFile, DependencySpec, ManifestError, StageSpec, TargetSpec};
