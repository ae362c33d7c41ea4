use std::collections::HashSet;
use std::ops::Index;

use tracing::debug;

use super::{BuildTarget, DependencyEdge, EdgeRef, GraphError, SelectionPredicate, TargetId};

/// Arena owning every target of one build.
///
/// Ids handed out by [`add_target`](Self::add_target) stay valid for the life
/// of the graph; targets and edges are never removed.
#[derive(Debug, Clone, Default)]
pub struct BuildGraph {
  targets: Vec<BuildTarget>,
}

impl BuildGraph {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn add_target(&mut self, target: BuildTarget) -> TargetId {
    let id = TargetId(self.targets.len());
    self.targets.push(target);
    id
  }

  pub fn get(&self, id: TargetId) -> Option<&BuildTarget> {
    self.targets.get(id.0)
  }

  pub fn get_mut(&mut self, id: TargetId) -> Option<&mut BuildTarget> {
    self.targets.get_mut(id.0)
  }

  /// First target with the given name.
  pub fn find(&self, name: &str) -> Option<TargetId> {
    self.targets.iter().position(|t| t.name() == name).map(TargetId)
  }

  pub fn ids(&self) -> impl Iterator<Item = TargetId> + '_ {
    (0..self.targets.len()).map(TargetId)
  }

  pub fn len(&self) -> usize {
    self.targets.len()
  }

  pub fn is_empty(&self) -> bool {
    self.targets.is_empty()
  }

  /// Make `dependent` depend on each of `dependencies`, in order.
  ///
  /// One edge is created per dependency, all sharing `predicate`, and each is
  /// registered in its dependency's reverse index. Nothing is added if any
  /// dependency is unknown, is `dependent` itself, or already (transitively)
  /// depends on `dependent`.
  pub fn add_dependencies(
    &mut self,
    dependent: TargetId,
    dependencies: &[TargetId],
    predicate: Option<SelectionPredicate>,
  ) -> Result<(), GraphError> {
    let dependent_name = self.target(dependent)?.name().to_string();

    for &dependency in dependencies {
      let dependency_name = self.target(dependency)?.name();
      if dependency == dependent {
        return Err(GraphError::SelfDependency(dependent_name));
      }
      if self.depends_on(dependency, dependent) {
        return Err(GraphError::WouldCycle {
          dependent: dependent_name,
          dependency: dependency_name.to_string(),
        });
      }
    }

    for &dependency in dependencies {
      let edge = DependencyEdge::new(dependency, dependent, predicate.clone());
      let target = &mut self.targets[dependent.0];
      let edge_ref = EdgeRef {
        dependent,
        index: target.edges.len(),
      };
      target.edges.push(edge);
      self.targets[dependency.0].dependees.insert(edge_ref);
      debug!(dependent = %dependent_name, dependency = %self.targets[dependency.0].name(), "added dependency");
    }

    Ok(())
  }

  /// Dependency targets of `id`, unfiltered.
  pub fn dependencies(&self, id: TargetId) -> Result<Vec<TargetId>, GraphError> {
    Ok(self.target(id)?.dependencies())
  }

  /// Dependency targets of `id` whose edge is selected.
  pub fn selected_dependencies(&self, id: TargetId) -> Result<Vec<TargetId>, GraphError> {
    Ok(self.target(id)?.selected_dependencies())
  }

  /// Edges pointing at `id`, resolved from its reverse index.
  pub fn dependee_edges(&self, id: TargetId) -> Result<Vec<&DependencyEdge>, GraphError> {
    let mut refs: Vec<&EdgeRef> = self.target(id)?.dependees().collect();
    refs.sort();
    Ok(refs
      .into_iter()
      .filter_map(|r| self.targets.get(r.dependent.0)?.edges().get(r.index))
      .collect())
  }

  /// Targets that declared a dependency on `id`.
  pub fn dependees(&self, id: TargetId) -> Result<HashSet<TargetId>, GraphError> {
    Ok(self.target(id)?.dependees().map(|r| r.dependent).collect())
  }

  /// Targets without dependencies reachable from `root` (root excluded).
  pub fn leaves(&self, root: TargetId) -> HashSet<TargetId> {
    self.collect_leaves(root, |id| self.children(id))
  }

  /// Like [`leaves`](Self::leaves), following selected edges only. A target
  /// whose dependencies are all unselected counts as a leaf.
  pub fn selected_leaves(&self, root: TargetId) -> HashSet<TargetId> {
    self.collect_leaves(root, |id| {
      self
        .targets
        .get(id.0)
        .map(BuildTarget::selected_dependencies)
        .unwrap_or_default()
    })
  }

  /// Whether `dependency` is reachable from `dependent` through its edges.
  pub fn depends_on(&self, dependent: TargetId, dependency: TargetId) -> bool {
    let mut hit = false;
    walk_dependencies(dependent, |id| self.children(id), |id, _| {
      hit = id == dependency;
      hit
    });
    hit
  }

  fn collect_leaves(&self, root: TargetId, children_of: impl Fn(TargetId) -> Vec<TargetId>) -> HashSet<TargetId> {
    let mut found = HashSet::new();
    walk_dependencies(root, children_of, |id, has_dependencies| {
      if !has_dependencies {
        found.insert(id);
      }
      false
    });
    found
  }

  fn children(&self, id: TargetId) -> Vec<TargetId> {
    self.targets.get(id.0).map(BuildTarget::dependencies).unwrap_or_default()
  }

  fn target(&self, id: TargetId) -> Result<&BuildTarget, GraphError> {
    self.get(id).ok_or(GraphError::UnknownTarget(id))
  }
}

impl Index<TargetId> for BuildGraph {
  type Output = BuildTarget;

  fn index(&self, id: TargetId) -> &BuildTarget {
    &self.targets[id.0]
  }
}

/// Depth-first walk below `root` that visits each target once, however many
/// paths lead to it. `visit` gets the target and whether it has dependencies,
/// and returns true to stop.
fn walk_dependencies(
  root: TargetId,
  children_of: impl Fn(TargetId) -> Vec<TargetId>,
  mut visit: impl FnMut(TargetId, bool) -> bool,
) {
  let mut seen = HashSet::new();
  let mut stack = children_of(root);
  while let Some(id) = stack.pop() {
    if !seen.insert(id) {
      continue;
    }
    let children = children_of(id);
    if visit(id, !children.is_empty()) {
      return;
    }
    stack.extend(children);
  }
}
