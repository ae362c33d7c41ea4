//! Stages: ordered steps of a build plan.

use std::slice;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error};

use super::actions::{Action, ActionRunner};
use super::types::ExecuteError;

/// One step of a target's build plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stage {
  /// A single action.
  Single(Action),
  /// Actions with no data dependency on one another.
  Group(Vec<Action>),
}

impl Stage {
  /// The stage's actions, a single action seen as a one-element list.
  pub fn actions(&self) -> &[Action] {
    match self {
      Stage::Single(action) => slice::from_ref(action),
      Stage::Group(actions) => actions,
    }
  }
}

impl From<Action> for Stage {
  fn from(action: Action) -> Self {
    Stage::Single(action)
  }
}

impl From<Vec<Action>> for Stage {
  fn from(actions: Vec<Action>) -> Self {
    Stage::Group(actions)
  }
}

/// Run every action of a stage.
///
/// Groups run concurrently with at most `parallelism` actions in flight. The
/// first failure cancels the actions not yet finished and is returned; the
/// function only returns `Ok` once every action has completed.
pub async fn run_stage<R: ActionRunner>(stage: &Stage, runner: &Arc<R>, parallelism: usize) -> Result<(), ExecuteError> {
  let actions = stage.actions();

  if actions.len() <= 1 || parallelism <= 1 {
    for action in actions {
      runner.run(action).await?;
    }
    return Ok(());
  }

  debug!(actions = actions.len(), parallelism, "running stage group");

  let semaphore = Arc::new(Semaphore::new(parallelism));
  let mut join_set = JoinSet::new();

  for action in actions {
    let action = action.clone();
    let runner = Arc::clone(runner);
    let semaphore = semaphore.clone();

    join_set.spawn(async move {
      let _permit = semaphore
        .acquire_owned()
        .await
        .map_err(|e| ExecuteError::TaskFailed(e.to_string()))?;
      runner.run(&action).await
    });
  }

  while let Some(joined) = join_set.join_next().await {
    let result = joined.map_err(|e| ExecuteError::TaskFailed(e.to_string())).and_then(|r| r);
    if let Err(e) = result {
      error!(error = %e, pending = join_set.len(), "stage action failed, cancelling the rest");
      join_set.abort_all();
      return Err(e);
    }
  }

  Ok(())
}
