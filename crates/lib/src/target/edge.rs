use std::fmt;
use std::sync::Arc;

use super::TargetId;

/// Decides whether an edge counts toward a target's selected dependencies.
pub type SelectionPredicate = Arc<dyn Fn(&DependencyEdge) -> bool + Send + Sync>;

/// A directed edge from a dependent target to one of its dependencies.
///
/// Edges are created through [`BuildGraph::add_dependencies`](super::BuildGraph::add_dependencies),
/// which also registers them in the dependency's reverse index. They are never
/// removed.
#[derive(Clone)]
pub struct DependencyEdge {
  dependency: TargetId,
  dependent: TargetId,
  predicate: Option<SelectionPredicate>,
}

impl DependencyEdge {
  pub(crate) fn new(dependency: TargetId, dependent: TargetId, predicate: Option<SelectionPredicate>) -> Self {
    Self {
      dependency,
      dependent,
      predicate,
    }
  }

  /// The target depended upon.
  pub fn dependency(&self) -> TargetId {
    self.dependency
  }

  /// The target that declared the dependency.
  pub fn dependent(&self) -> TargetId {
    self.dependent
  }

  pub fn has_predicate(&self) -> bool {
    self.predicate.is_some()
  }

  /// True without a predicate, otherwise the predicate's verdict.
  pub fn is_selected(&self) -> bool {
    self.predicate.as_ref().is_none_or(|predicate| predicate(self))
  }
}

impl fmt::Debug for DependencyEdge {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("DependencyEdge")
      .field("dependency", &self.dependency)
      .field("dependent", &self.dependent)
      .field("predicate", &self.predicate.is_some())
      .finish()
  }
}

/// Locates an edge from the dependency side: the dependent target and the
/// position of the edge in its edge list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeRef {
  pub dependent: TargetId,
  pub index: usize,
}
