use std::io::ErrorKind;
use std::os::unix::process::CommandExt;
use std::path::PathBuf;
use std::process::{Child, Command, ExitStatus, Stdio};

use super::{redirect, ProcessError};
use crate::core::env::Environment;
use crate::parser::ParsedCommand;

/// Result of a successful launch.
#[derive(Debug)]
pub enum Launched {
    Foreground(ExitStatus),
    Background(u32),
}

/// Spawns external programs and keeps track of background children.
#[derive(Default)]
pub struct ProcessExecutor {
    background: Vec<Child>,
}

impl ProcessExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn `command` and, unless it runs in the background, wait for it.
    pub fn launch(
        &mut self,
        command: &ParsedCommand,
        env: &Environment,
    ) -> Result<Launched, ProcessError> {
        let mut process = self.build(command, env)?;

        let mut child = process.spawn().map_err(|e| {
            let name = command.name().to_string();
            match e.kind() {
                ErrorKind::NotFound => ProcessError::CommandNotFound(name),
                ErrorKind::PermissionDenied => ProcessError::PermissionDenied(name),
                _ => ProcessError::Spawn(name, e),
            }
        })?;
        let pid = child.id();

        if command.background {
            log::debug!("started background process {} ({})", pid, command.name());
            self.background.push(child);
            return Ok(Launched::Background(pid));
        }

        log::debug!("started foreground process {} ({})", pid, command.name());
        let status = child.wait().map_err(|e| ProcessError::Wait(pid, e))?;
        log::debug!("process {} exited with {}", pid, status);
        Ok(Launched::Foreground(status))
    }

    fn build(&self, command: &ParsedCommand, env: &Environment) -> Result<Command, ProcessError> {
        let mut process = Command::new(program_path(command.name(), env));
        process
            .arg0(command.name())
            .args(command.args())
            .env_clear()
            .envs(env.snapshot())
            .current_dir(env.current_dir());

        if let Some(path) = &command.input {
            let file = redirect::open_input(path, env)
                .map_err(|e| ProcessError::Redirect(path.clone(), e))?;
            process.stdin(Stdio::from(file));
        }

        if let Some(output) = &command.output {
            let file = redirect::open_output(output, env)
                .map_err(|e| ProcessError::Redirect(output.path.clone(), e))?;
            process.stdout(Stdio::from(file));
        }

        Ok(process)
    }

    /// Collect background children that have exited, without blocking.
    ///
    /// Returns how many were reaped.
    pub fn reap(&mut self) -> usize {
        let before = self.background.len();
        self.background.retain_mut(|child| match child.try_wait() {
            Ok(Some(status)) => {
                log::debug!("background process {} exited with {}", child.id(), status);
                false
            }
            Ok(None) => true,
            Err(e) => {
                log::warn!("couldn't poll background process {}: {}", child.id(), e);
                false
            }
        });
        before - self.background.len()
    }

    pub fn background_pids(&self) -> Vec<u32> {
        self.background.iter().map(Child::id).collect()
    }
}

/// Relative paths naming a directory component are taken from the working
/// directory; bare names are left for the `PATH` search.
fn program_path(name: &str, env: &Environment) -> PathBuf {
    if name.contains('/') {
        env.resolve(name)
    } else {
        PathBuf::from(name)
    }
}
