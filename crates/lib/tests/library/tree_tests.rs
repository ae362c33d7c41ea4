use std::collections::{HashMap, HashSet};

use autobus_lib::tree::{contains, leaves};

/// A directory-like tree keyed by name.
fn tree() -> HashMap<&'static str, Vec<&'static str>> {
  HashMap::from([
    ("/", vec!["usr", "etc"]),
    ("usr", vec!["bin", "lib"]),
    ("etc", vec![]),
    ("bin", vec![]),
    ("lib", vec!["lib64"]),
    ("lib64", vec![]),
  ])
}

#[test]
fn leaves_of_a_keyed_tree() {
  let tree = tree();
  let children = |node: &&'static str| tree.get(node).cloned().unwrap_or_default();

  assert_eq!(leaves(&"/", children), HashSet::from(["etc", "bin", "lib64"]));
}

#[test]
fn contains_in_a_keyed_tree() {
  let tree = tree();
  let children = |node: &&'static str| tree.get(node).cloned().unwrap_or_default();

  assert!(contains(&"/", children, &"lib64"));
  assert!(!contains(&"usr", children, &"etc"));
}
