//! autobus-lib: incremental build engine
//!
//! This crate provides the pieces of a make-like tool:
//! - `Artifact` / `Directory`: file references resolved through a parent chain
//! - `BuildTarget` / `BuildGraph`: targets, dependency edges and staleness decisions
//! - `tree`: non-recursive traversal over any tree-shaped structure
//! - `execute`: actions, stages and the runner that executes them
//! - `manifest`: the TOML build file
//! - `driver`: walks a graph and builds what is out of date

pub mod consts;
pub mod driver;
pub mod execute;
pub mod manifest;
pub mod path;
pub mod target;
pub mod tree;
pub mod util;
