//! Build targets and the dependency graph between them.
//!
//! Targets live in a [`BuildGraph`] arena and are addressed by [`TargetId`].
//! A [`DependencyEdge`] points from a dependent target to one of its
//! dependencies; the dependency keeps a non-owning reverse index of the edges
//! that point at it.

mod build_target;
mod dag;
mod edge;
mod graph;
mod types;

pub use build_target::BuildTarget;
pub use dag::SelectionDag;
pub use edge::{DependencyEdge, EdgeRef, SelectionPredicate};
pub use graph::BuildGraph;
pub use types::{BuildError, GraphError, TargetId, TargetState};
