//! Actions and the runner that executes them.
//!
//! An [`Action`] is an opaque side effect from the point of view of a build
//! target: the target only asks an [`ActionRunner`] to run it and looks at
//! success or failure, never at output.

pub mod cmd;

use std::collections::BTreeMap;
use std::fmt;
use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

use tracing::info;

use crate::execute::types::{ExecuteConfig, ExecuteError};

pub use cmd::execute_cmd;

/// How a command is handed to the operating system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandLine {
  /// A single string interpreted by the shell.
  Shell(String),
  /// Program followed by its arguments, run without a shell.
  Argv(Vec<String>),
}

impl fmt::Display for CommandLine {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      CommandLine::Shell(cmd) => f.write_str(cmd),
      CommandLine::Argv(args) => f.write_str(&args.join(" ")),
    }
  }
}

/// An external command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmdAction {
  pub command: CommandLine,
  /// Extra variables merged into the inherited environment.
  pub env: BTreeMap<String, String>,
  pub cwd: Option<PathBuf>,
  /// Kill the command and fail once this elapses.
  pub timeout: Option<Duration>,
  /// Treat a non-zero exit status as a failure.
  pub check: bool,
}

impl CmdAction {
  pub fn shell(cmd: impl Into<String>) -> Self {
    Self::from_command(CommandLine::Shell(cmd.into()))
  }

  pub fn argv<I, S>(args: I) -> Result<Self, ExecuteError>
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    let args: Vec<String> = args.into_iter().map(Into::into).collect();
    if args.is_empty() {
      return Err(ExecuteError::EmptyCommand);
    }
    Ok(Self::from_command(CommandLine::Argv(args)))
  }

  fn from_command(command: CommandLine) -> Self {
    Self {
      command,
      env: BTreeMap::new(),
      cwd: None,
      timeout: None,
      check: false,
    }
  }

  pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
    self.env.insert(key.into(), value.into());
    self
  }

  pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
    self.cwd = Some(cwd.into());
    self
  }

  pub fn with_timeout(mut self, timeout: Duration) -> Self {
    self.timeout = Some(timeout);
    self
  }

  pub fn checked(mut self) -> Self {
    self.check = true;
    self
  }
}

/// A single step of a build plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
  /// Run an external command.
  Cmd(CmdAction),
  /// Create a file if missing and set its modification time to now.
  Touch(PathBuf),
}

impl From<CmdAction> for Action {
  fn from(cmd: CmdAction) -> Self {
    Action::Cmd(cmd)
  }
}

impl fmt::Display for Action {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Action::Cmd(cmd) => write!(f, "{}", cmd.command),
      Action::Touch(path) => write!(f, "touch {}", path.display()),
    }
  }
}

/// Executes actions on behalf of build targets.
///
/// Runners are shared between the concurrently running actions of a stage, so
/// they must be `Send + Sync` and the returned future `Send`.
pub trait ActionRunner: Send + Sync + 'static {
  fn run(&self, action: &Action) -> impl Future<Output = Result<(), ExecuteError>> + Send;
}

/// The default runner: spawns processes and touches files.
///
/// Every action is logged before it runs. In dry-run mode it is only logged.
#[derive(Debug, Clone, Default)]
pub struct CommandRunner {
  shell: Option<String>,
  dry_run: bool,
}

impl CommandRunner {
  pub fn new(config: &ExecuteConfig) -> Self {
    Self {
      shell: config.shell.clone(),
      dry_run: config.dry_run,
    }
  }
}

impl ActionRunner for CommandRunner {
  async fn run(&self, action: &Action) -> Result<(), ExecuteError> {
    info!(action = %action, dry_run = self.dry_run, "running action");
    if self.dry_run {
      return Ok(());
    }

    match action {
      Action::Cmd(cmd) => execute_cmd(cmd, self.shell.as_deref()).await,
      Action::Touch(path) => {
        let path = path.clone();
        tokio::task::spawn_blocking(move || crate::path::touch(&path))
          .await
          .map_err(|e| ExecuteError::TaskFailed(e.to_string()))?
          .map_err(|e| ExecuteError::Io(std::io::Error::other(e)))
      }
    }
  }
}
