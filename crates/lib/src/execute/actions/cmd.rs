//! Cmd action implementation.
//!
//! Commands inherit the environment and standard streams of the build process.
//! Only the exit status is consulted, and only when the action asks for it.

use tokio::process::Command;
use tracing::{debug, warn};

use super::{CmdAction, CommandLine};
use crate::execute::types::ExecuteError;

/// Execute a Cmd action.
///
/// # Arguments
///
/// * `action` - The command, its environment, working directory, timeout and check flag
/// * `shell` - The shell for shell-string commands (defaults to /bin/sh on Unix, cmd.exe on Windows)
///
/// # Errors
///
/// Spawn failures and timeouts are always errors. A non-zero exit status is an
/// error only when `action.check` is set; otherwise it is logged and ignored.
pub async fn execute_cmd(action: &CmdAction, shell: Option<&str>) -> Result<(), ExecuteError> {
  let rendered = action.command.to_string();

  let mut command = match &action.command {
    CommandLine::Shell(cmd) => {
      let (shell_cmd, shell_args) = get_shell(shell);
      let mut command = Command::new(shell_cmd);
      command.args(shell_args).arg(cmd);
      command
    }
    CommandLine::Argv(argv) => {
      let (program, args) = argv.split_first().ok_or(ExecuteError::EmptyCommand)?;
      let mut command = Command::new(program);
      command.args(args);
      command
    }
  };

  if let Some(cwd) = &action.cwd {
    command.current_dir(cwd);
  }
  command.envs(&action.env).kill_on_drop(true);

  debug!(cmd = %rendered, cwd = ?action.cwd, "spawning process");

  let mut child = command.spawn().map_err(|source| ExecuteError::Spawn {
    cmd: rendered.clone(),
    source,
  })?;

  let status = match action.timeout {
    Some(timeout) => match tokio::time::timeout(timeout, child.wait()).await {
      Ok(status) => status?,
      Err(_) => {
        child.kill().await?;
        return Err(ExecuteError::TimedOut { cmd: rendered, timeout });
      }
    },
    None => child.wait().await?,
  };

  if !status.success() {
    if action.check {
      return Err(ExecuteError::CmdFailed {
        cmd: rendered,
        code: status.code(),
      });
    }
    warn!(cmd = %rendered, code = ?status.code(), "command exited with non-zero status");
  }

  Ok(())
}

/// Get the shell command and arguments for the current platform.
///
/// An explicit override picks its argument style from the shell's name.
fn get_shell(override_shell: Option<&str>) -> (String, Vec<String>) {
  if let Some(shell) = override_shell {
    let args = if shell.contains("powershell") || shell.contains("pwsh") {
      vec!["-NoProfile".to_string(), "-Command".to_string()]
    } else if shell.contains("cmd") {
      vec!["/C".to_string()]
    } else {
      // Assume Unix-style shell (bash, sh, zsh, etc.)
      vec!["-c".to_string()]
    };
    return (shell.to_string(), args);
  }

  #[cfg(unix)]
  {
    ("/bin/sh".to_string(), vec!["-c".to_string()])
  }

  #[cfg(windows)]
  {
    ("cmd.exe".to_string(), vec!["/C".to_string()])
  }
}
