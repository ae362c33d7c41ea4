//! Driving a build over a target graph.
//!
//! The driver selects the root target and everything it transitively depends
//! on through selected edges, orders the selection dependencies-first, and
//! builds each target whose outputs are stale. Targets themselves never
//! decide when to build.

mod types;

use std::sync::Arc;

use tracing::{debug, error, info};

pub use types::{BuildOptions, BuildReport, DriverError, Plan, PlannedTarget};

use crate::execute::ActionRunner;
use crate::path::FileSystem;
use crate::target::{BuildError, BuildGraph, SelectionDag, TargetId, TargetState};

/// Build `root` and its selected dependencies.
///
/// Stops at the first failing target; the failure is recorded in the report
/// rather than returned as an error.
pub async fn build_target<R: ActionRunner>(
  graph: &mut BuildGraph,
  root: TargetId,
  runner: &Arc<R>,
  fs: &impl FileSystem,
  options: &BuildOptions,
) -> Result<BuildReport, DriverError> {
  let dag = SelectionDag::from_graph(graph, root)?;
  let order = dag.topological();
  select(graph, order);

  info!(root = %graph[root].name(), targets = order.len(), force = options.force, "starting build");

  let mut report = BuildReport::default();
  for (position, &id) in order.iter().enumerate() {
    let target = &graph[id];
    let name = target.name().to_string();

    let stale = options.force || target.is_rebuild_needed(fs)?;
    if !stale {
      debug!(name = %name, "up to date");
      report.up_to_date.push(name);
      mark(graph, id, TargetState::Done);
      continue;
    }

    match run_one(graph, id, runner, fs, options).await {
      Ok(()) => {
        report.built.push(name);
        mark(graph, id, TargetState::Done);
      }
      Err(err) => {
        error!(name = %name, error = %err, "target failed");
        report.failed = Some((name, err));
        report.skipped = order[position + 1..].iter().map(|&id| graph[id].name().to_string()).collect();
        break;
      }
    }
  }

  info!(
    built = report.built.len(),
    up_to_date = report.up_to_date.len(),
    success = report.is_success(),
    "build finished"
  );
  Ok(report)
}

async fn run_one<R: ActionRunner>(
  graph: &BuildGraph,
  id: TargetId,
  runner: &Arc<R>,
  fs: &impl FileSystem,
  options: &BuildOptions,
) -> Result<(), BuildError> {
  let target = &graph[id];
  target.build(runner, &options.execute, options.force).await?;
  if !options.execute.dry_run {
    target.check_outputs(fs)?;
  }
  Ok(())
}

fn select(graph: &mut BuildGraph, selected: &[TargetId]) {
  let all: Vec<TargetId> = graph.ids().collect();
  for id in all {
    mark(graph, id, TargetState::NotSelected);
  }
  for &id in selected {
    mark(graph, id, TargetState::Selected);
  }
}

fn mark(graph: &mut BuildGraph, id: TargetId, state: TargetState) {
  if let Some(target) = graph.get_mut(id) {
    target.set_state(state);
  }
}

/// Describe what building `root` would do without running anything.
pub fn plan(graph: &BuildGraph, root: TargetId, fs: &impl FileSystem) -> Result<Plan, DriverError> {
  let dag = SelectionDag::from_graph(graph, root)?;

  let mut waves = Vec::new();
  for wave in dag.waves() {
    let mut planned = Vec::with_capacity(wave.len());
    for id in wave {
      let target = &graph[id];
      planned.push(PlannedTarget {
        name: target.name().to_string(),
        stale: target.is_rebuild_needed(fs)?,
        stages: target.stages().len(),
        dependencies: dag
          .dependencies(id)
          .into_iter()
          .map(|dep| graph[dep].name().to_string())
          .collect(),
      });
    }
    waves.push(planned);
  }

  Ok(Plan {
    root: graph[root].name().to_string(),
    waves,
  })
}

/// Check the declared outputs of `root` and its selected dependencies.
///
/// Returns one error per target with a missing output, in build order.
pub fn check_outputs(graph: &BuildGraph, root: TargetId, fs: &impl FileSystem) -> Result<Vec<BuildError>, DriverError> {
  let dag = SelectionDag::from_graph(graph, root)?;
  let mut missing = Vec::new();
  for &id in dag.topological() {
    match graph[id].check_outputs(fs) {
      Ok(()) => {}
      Err(BuildError::Path(err)) => return Err(err.into()),
      Err(err) => missing.push(err),
    }
  }
  Ok(missing)
}
