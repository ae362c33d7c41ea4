//! Non-recursive traversal over tree-shaped structures.
//!
//! The structure is described only by a root and a `children_of` accessor, so
//! the same walker serves directory trees, syntax trees or anything else. There
//! is no visited set: a node reachable through several paths is walked once per
//! path, which suits trees but not DAGs with heavily shared nodes.
//! Traversal keeps an explicit stack of frames (the remaining siblings of each
//! ancestor) instead of recursing, so depth is bounded by memory rather than by
//! the call stack.
//!
//! The root itself is never part of a result. The walk assumes the structure is
//! acyclic: a cycle reachable from the root never terminates.

use std::collections::HashSet;
use std::hash::Hash;

/// Every childless node reachable from `root`'s children.
///
/// Nodes reachable through several paths appear once.
pub fn leaves<N, F, I>(root: &N, children_of: F) -> HashSet<N>
where
  N: Eq + Hash,
  F: Fn(&N) -> I,
  I: IntoIterator<Item = N>,
{
  let mut found = HashSet::new();
  walk(root, &children_of, |node, has_children| {
    if !has_children {
      found.insert(node);
    }
    false
  });
  found
}

/// Whether `target` is reachable from `root`'s children.
///
/// Comparison uses `PartialEq`, so `contains(root, f, root)` is false unless an
/// equal node appears below the root.
pub fn contains<N, F, I>(root: &N, children_of: F, target: &N) -> bool
where
  N: PartialEq,
  F: Fn(&N) -> I,
  I: IntoIterator<Item = N>,
{
  let mut hit = false;
  walk(root, &children_of, |node, _| {
    hit = node == *target;
    hit
  });
  hit
}

/// Depth-first walk. `visit` gets each node and whether it has children, and
/// returns true to stop early.
fn walk<N, F, I, V>(root: &N, children_of: &F, mut visit: V)
where
  F: Fn(&N) -> I,
  I: IntoIterator<Item = N>,
  V: FnMut(N, bool) -> bool,
{
  let mut stack: Vec<Vec<N>> = Vec::new();
  let first: Vec<N> = children_of(root).into_iter().collect();
  if !first.is_empty() {
    stack.push(first);
  }

  while let Some(frame) = stack.last_mut() {
    // frames are never pushed empty and are dropped as soon as they drain
    let Some(current) = frame.pop() else {
      stack.pop();
      continue;
    };
    if frame.is_empty() {
      stack.pop();
    }

    let children: Vec<N> = children_of(&current).into_iter().collect();
    let has_children = !children.is_empty();
    if has_children {
      if visit(current, true) {
        return;
      }
      stack.push(children);
    } else if visit(current, false) {
      return;
    }
  }
}
