//! File and directory references.
//!
//! An [`Artifact`] names one file and resolves its absolute location through an
//! optional chain of [`Directory`] parents. Existence and modification times are
//! read through the [`FileSystem`] capability so staleness decisions can be made
//! against the real disk or an in-memory stand-in.

mod artifact;
mod directory;
mod fs;
mod types;

pub use artifact::Artifact;
pub use directory::{Directory, normalize};
pub use fs::{FileSystem, OsFileSystem, all_exist, earliest_mtime, latest_mtime, touch};
pub use types::PathError;
