//! Action execution.
//!
//! A target's build plan is a sequence of [`Stage`]s. Each stage is one action
//! or a group of independent actions. Stages run strictly in order; the actions
//! of a group run concurrently, bounded by [`ExecuteConfig::parallelism`].

pub mod actions;
pub mod stage;
pub mod types;

pub use actions::{Action, ActionRunner, CmdAction, CommandLine, CommandRunner};
pub use stage::{Stage, run_stage};
pub use types::{ExecuteConfig, ExecuteError};
