use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use super::types::{ActionSpec, ActionTable, BuildFile, ManifestError, StageSpec, TargetSpec};
use crate::execute::{Action, CmdAction, Stage};
use crate::path::{Artifact, Directory};
use crate::target::{BuildGraph, BuildTarget, DependencyEdge, SelectionPredicate, TargetId};

/// A loaded build file.
pub struct Manifest {
  pub graph: BuildGraph,
  /// Directory the build file lives in; relative paths resolve against it.
  pub root: Arc<Directory>,
  /// The first target declared, used when none is named.
  pub default_target: Option<TargetId>,
}

impl Manifest {
  /// Look up a target by name, or the default target when `name` is `None`.
  pub fn resolve_target(&self, name: Option<&str>) -> Option<TargetId> {
    match name {
      Some(name) => self.graph.find(name),
      None => self.default_target,
    }
  }
}

/// Read and parse a build file from disk.
pub fn load_manifest(path: &Path, features: &BTreeSet<String>) -> Result<Manifest, ManifestError> {
  let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
    path: path.to_path_buf(),
    source,
  })?;

  let absolute = dunce::canonicalize(path).map_err(|source| ManifestError::Read {
    path: path.to_path_buf(),
    source,
  })?;
  let dir = absolute.parent().map(Path::to_path_buf).unwrap_or(absolute);
  let root = Arc::new(Directory::new(dir, None)?);

  info!(path = %path.display(), "loading build file");
  parse_manifest(&content, root, features)
}

/// Parse build file content with paths anchored at `root`.
///
/// Dependencies gated on a feature are only selected when that feature is in
/// `features`.
pub fn parse_manifest(content: &str, root: Arc<Directory>, features: &BTreeSet<String>) -> Result<Manifest, ManifestError> {
  let file: BuildFile = toml::from_str(content)?;
  let features = Arc::new(features.clone());

  let mut graph = BuildGraph::new();
  let mut ids: HashMap<String, TargetId> = HashMap::new();

  // First pass: create every target so dependencies can refer forward
  for spec in &file.targets {
    if ids.contains_key(&spec.name) {
      return Err(ManifestError::DuplicateTarget(spec.name.clone()));
    }
    let target = build_target(spec, &root)?;
    ids.insert(spec.name.clone(), graph.add_target(target));
  }

  // Second pass: wire dependencies in declaration order
  for spec in &file.targets {
    let dependent = ids[&spec.name];
    for dep in &spec.deps {
      let dependency = *ids.get(dep.name()).ok_or_else(|| ManifestError::UnknownDependency {
        target: spec.name.clone(),
        dependency: dep.name().to_string(),
      })?;

      let predicate = dep.feature().map(|feature| feature_predicate(feature, &features));
      graph.add_dependencies(dependent, &[dependency], predicate)?;
    }
  }

  let default_target = file.targets.first().map(|spec| ids[&spec.name]);
  debug!(targets = graph.len(), "parsed build file");

  Ok(Manifest {
    graph,
    root,
    default_target,
  })
}

fn feature_predicate(feature: &str, enabled: &Arc<BTreeSet<String>>) -> SelectionPredicate {
  let feature = feature.to_string();
  let enabled = Arc::clone(enabled);
  Arc::new(move |_: &DependencyEdge| enabled.contains(&feature))
}

fn build_target(spec: &TargetSpec, root: &Arc<Directory>) -> Result<BuildTarget, ManifestError> {
  let mut inputs = Vec::new();
  for pattern in &spec.inputs {
    if is_glob(pattern) {
      let matches = root.glob(pattern)?;
      debug!(name = %spec.name, pattern = %pattern, matches = matches.len(), "expanded input pattern");
      let base = root.absolute_path();
      inputs.extend(matches.into_iter().map(|path| {
        let name = path.strip_prefix(&base).unwrap_or(&path);
        Artifact::new(name.to_string_lossy().into_owned(), Some(root.clone()))
      }));
    } else {
      inputs.push(Artifact::new(pattern.clone(), Some(root.clone())));
    }
  }

  let outputs = spec
    .outputs
    .iter()
    .map(|name| Artifact::new(name.clone(), Some(root.clone())));

  let mut target = BuildTarget::new(spec.name.clone())
    .with_inputs(inputs)
    .with_outputs(outputs);

  for stage in &spec.stages {
    target = target.with_stage(convert_stage(stage, &spec.name, root)?);
  }

  Ok(target)
}

fn convert_stage(stage: &StageSpec, target: &str, root: &Directory) -> Result<Stage, ManifestError> {
  match stage {
    StageSpec::Single(action) => Ok(Stage::Single(convert_action(action, target, root)?)),
    StageSpec::Group(actions) => Ok(Stage::Group(
      actions
        .iter()
        .map(|action| convert_action(action, target, root))
        .collect::<Result<_, _>>()?,
    )),
  }
}

fn convert_action(action: &ActionSpec, target: &str, root: &Directory) -> Result<Action, ManifestError> {
  let base = root.absolute_path();
  match action {
    ActionSpec::Shell(cmd) => Ok(Action::Cmd(CmdAction::shell(cmd.clone()).with_cwd(base))),
    ActionSpec::Table(table) => convert_table(table, target, &base),
  }
}

fn convert_table(table: &ActionTable, target: &str, base: &Path) -> Result<Action, ManifestError> {
  let invalid = |message: String| ManifestError::InvalidAction {
    target: target.to_string(),
    message,
  };

  let mut cmd = match (&table.cmd, &table.args, &table.touch) {
    (Some(cmd), None, None) => CmdAction::shell(cmd.clone()),
    (None, Some(args), None) => CmdAction::argv(args.clone()).map_err(|e| invalid(e.to_string()))?,
    (None, None, Some(path)) => {
      if table.timeout.is_some() || table.check || table.cwd.is_some() || !table.env.is_empty() {
        return Err(invalid("`touch` takes no other options".to_string()));
      }
      return Ok(Action::Touch(base.join(path)));
    }
    _ => return Err(invalid("exactly one of `cmd`, `args` or `touch` is required".to_string())),
  };

  cmd.env = table.env.clone();
  cmd.check = table.check;
  cmd.cwd = Some(match &table.cwd {
    Some(cwd) => base.join(cwd),
    None => PathBuf::from(base),
  });
  if let Some(timeout) = &table.timeout {
    let parsed =
      humantime::parse_duration(timeout).map_err(|e| invalid(format!("invalid timeout '{}': {}", timeout, e)))?;
    cmd.timeout = Some(parsed);
  }

  Ok(Action::Cmd(cmd))
}

fn is_glob(pattern: &str) -> bool {
  pattern.contains(['*', '?', '['])
}
