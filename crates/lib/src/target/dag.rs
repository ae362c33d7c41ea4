//! Ordering of the targets selected for a build.
//!
//! The DAG holds the root target and everything reachable from it through
//! selected edges, with edges running from dependency to dependent, and
//! provides:
//! - Topological ordering (dependencies before dependents), computed once
//! - Waves: groups of targets whose dependencies all sit in earlier waves

use std::collections::HashMap;

use petgraph::Direction;
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};

use super::{BuildGraph, GraphError, TargetId};

pub struct SelectionDag {
  /// The underlying graph.
  graph: DiGraph<TargetId, ()>,

  /// Map from target id to node index.
  nodes: HashMap<TargetId, NodeIndex>,

  /// Dependencies-first order of every node.
  order: Vec<TargetId>,
}

impl SelectionDag {
  /// Collect `root` and its transitive selected dependencies.
  pub fn from_graph(build_graph: &BuildGraph, root: TargetId) -> Result<Self, GraphError> {
    let mut graph = DiGraph::new();
    let mut nodes = HashMap::new();

    build_graph.get(root).ok_or(GraphError::UnknownTarget(root))?;
    nodes.insert(root, graph.add_node(root));

    let mut pending = vec![root];
    while let Some(id) = pending.pop() {
      let dependent_idx = nodes[&id];
      for dependency in build_graph.selected_dependencies(id)? {
        let dependency_idx = match nodes.get(&dependency) {
          Some(&idx) => idx,
          None => {
            let idx = graph.add_node(dependency);
            nodes.insert(dependency, idx);
            pending.push(dependency);
            idx
          }
        };
        // Edge from dependency to dependent
        graph.update_edge(dependency_idx, dependent_idx, ());
      }
    }

    // Graphs assembled through `add_dependencies` cannot contain cycles, but
    // the sort is needed for the order anyway and reports one if it finds it.
    let sorted = toposort(&graph, None).map_err(|_| GraphError::CycleDetected)?;
    let order = sorted.into_iter().map(|idx| graph[idx]).collect();

    Ok(Self { graph, nodes, order })
  }

  /// Targets in an order where dependencies come before dependents.
  pub fn topological(&self) -> &[TargetId] {
    &self.order
  }

  /// Targets grouped into waves.
  ///
  /// Every target's dependencies are in earlier waves, so the targets of one
  /// wave are independent of each other. Each wave is sorted by id.
  pub fn waves(&self) -> Vec<Vec<TargetId>> {
    let mut in_degree: HashMap<NodeIndex, usize> = self
      .graph
      .node_indices()
      .map(|idx| (idx, self.graph.neighbors_directed(idx, Direction::Incoming).count()))
      .collect();

    let mut waves = Vec::new();
    let mut ready: Vec<NodeIndex> = in_degree.iter().filter(|(_, d)| **d == 0).map(|(i, _)| *i).collect();
    let mut placed = 0;

    while !ready.is_empty() {
      let mut next = Vec::new();
      for &idx in &ready {
        for dependent in self.graph.neighbors_directed(idx, Direction::Outgoing) {
          if let Some(degree) = in_degree.get_mut(&dependent) {
            *degree -= 1;
            if *degree == 0 {
              next.push(dependent);
            }
          }
        }
      }

      placed += ready.len();
      let mut wave: Vec<TargetId> = ready.iter().map(|idx| self.graph[*idx]).collect();
      wave.sort();
      waves.push(wave);
      ready = next;
    }

    debug_assert_eq!(placed, self.graph.node_count());
    waves
  }

  /// Direct selected dependencies of a target within the DAG.
  pub fn dependencies(&self, id: TargetId) -> Vec<TargetId> {
    let Some(&idx) = self.nodes.get(&id) else {
      return Vec::new();
    };
    let mut deps: Vec<TargetId> = self
      .graph
      .neighbors_directed(idx, Direction::Incoming)
      .map(|dep| self.graph[dep])
      .collect();
    deps.sort();
    deps
  }

  pub fn contains(&self, id: TargetId) -> bool {
    self.nodes.contains_key(&id)
  }

  pub fn len(&self) -> usize {
    self.nodes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.nodes.is_empty()
  }
}
