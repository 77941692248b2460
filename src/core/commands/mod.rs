use std::collections::BTreeMap;
use std::io::{self, BufWriter, Write};

mod cd;
mod dir;
mod echo;
mod environ;
mod help;
mod pause;
mod quit;
mod set;

pub use cd::CdCommand;
pub use dir::DirCommand;
pub use echo::EchoCommand;
pub use environ::EnvironCommand;
pub use help::HelpCommand;
pub use pause::PauseCommand;
pub use quit::QuitCommand;
pub use set::SetCommand;

use crate::core::env::{EnvError, Environment};
use crate::error::ShellError;
use crate::input::LineSource;
use crate::parser::{OutputRedirect, ParsedCommand};
use crate::process::redirect;

/// Names handled in-process.
pub const BUILTIN_NAMES: [&str; 8] = [
    "cd", "dir", "environ", "set", "echo", "help", "pause", "quit",
];

#[derive(Debug)]
pub enum CommandError {
    InvalidArguments(String),
    Env(EnvError),
    Directory(String, io::Error),
    Redirect(String, io::Error),
    Input(ShellError),
    IoError(io::Error),
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandError::InvalidArguments(msg) => write!(f, "{}", msg),
            CommandError::Env(err) => write!(f, "{}", err),
            CommandError::Directory(path, err) => write!(f, "{}: {}", path, err),
            CommandError::Redirect(path, err) => write!(f, "{}: {}", path, err),
            CommandError::Input(err) => write!(f, "{}", err),
            CommandError::IoError(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl std::error::Error for CommandError {}

impl From<io::Error> for CommandError {
    fn from(err: io::Error) -> Self {
        CommandError::IoError(err)
    }
}

impl From<EnvError> for CommandError {
    fn from(err: EnvError) -> Self {
        CommandError::Env(err)
    }
}

/// What the main loop should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Halt,
}

/// Everything a built-in may touch while it runs.
pub struct Context<'a> {
    pub env: &'a mut Environment,
    pub input: &'a mut dyn LineSource,
    pub out: &'a mut dyn Write,
    /// `out` is the terminal and an external pager may be used.
    pub pager: bool,
}

pub trait Command {
    fn execute(&self, args: &[String], ctx: &mut Context<'_>) -> Result<Flow, CommandError>;

    /// Whether `>`/`>>` on the line applies to this command's output.
    fn honors_redirection(&self) -> bool {
        true
    }
}

#[derive(Clone)]
enum CommandType {
    Cd(CdCommand),
    Dir(DirCommand),
    Environ(EnvironCommand),
    Set(SetCommand),
    Echo(EchoCommand),
    Help(HelpCommand),
    Pause(PauseCommand),
    Quit(QuitCommand),
}

impl CommandType {
    fn as_command(&self) -> &dyn Command {
        match self {
            CommandType::Cd(cmd) => cmd,
            CommandType::Dir(cmd) => cmd,
            CommandType::Environ(cmd) => cmd,
            CommandType::Set(cmd) => cmd,
            CommandType::Echo(cmd) => cmd,
            CommandType::Help(cmd) => cmd,
            CommandType::Pause(cmd) => cmd,
            CommandType::Quit(cmd) => cmd,
        }
    }
}

/// Built-in dispatcher.
#[derive(Clone)]
pub struct CommandExecutor {
    commands: BTreeMap<&'static str, CommandType>,
    pager: bool,
}

impl Default for CommandExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandExecutor {
    pub fn new() -> Self {
        let mut commands = BTreeMap::new();
        commands.insert("cd", CommandType::Cd(CdCommand));
        commands.insert("dir", CommandType::Dir(DirCommand));
        commands.insert("environ", CommandType::Environ(EnvironCommand));
        commands.insert("set", CommandType::Set(SetCommand));
        commands.insert("echo", CommandType::Echo(EchoCommand));
        commands.insert("help", CommandType::Help(HelpCommand));
        commands.insert("pause", CommandType::Pause(PauseCommand));
        commands.insert("quit", CommandType::Quit(QuitCommand));

        Self {
            commands,
            pager: false,
        }
    }

    /// Allow `help` to go through an external pager when not redirected.
    pub fn with_pager(mut self, enabled: bool) -> Self {
        self.pager = enabled;
        self
    }

    #[cfg(test)]
    fn is_builtin(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Run `command` in-process. Returns `None` when it is not a built-in.
    pub fn execute(
        &self,
        command: &ParsedCommand,
        env: &mut Environment,
        input: &mut dyn LineSource,
        stdout: &mut dyn Write,
    ) -> Option<Result<Flow, CommandError>> {
        let cmd = self.commands.get(command.name())?.as_command();
        log::debug!("builtin {} {:?}", command.name(), command.args());

        let result = match &command.output {
            Some(target) if cmd.honors_redirection() => {
                Self::execute_redirected(cmd, command.args(), target, env, input)
            }
            _ => {
                let mut ctx = Context {
                    env,
                    input,
                    out: &mut *stdout,
                    pager: self.pager,
                };
                let result = cmd.execute(command.args(), &mut ctx);
                stdout.flush().map_err(CommandError::from).and(result)
            }
        };
        Some(result)
    }

    /// Send the built-in's output to `target` for the duration of the call.
    ///
    /// The file is closed when this returns, whatever the outcome.
    fn execute_redirected(
        cmd: &dyn Command,
        args: &[String],
        target: &OutputRedirect,
        env: &mut Environment,
        input: &mut dyn LineSource,
    ) -> Result<Flow, CommandError> {
        let file = redirect::open_output(target, env)
            .map_err(|e| CommandError::Redirect(target.path.clone(), e))?;
        let mut out = BufWriter::new(file);

        let mut ctx = Context {
            env,
            input,
            out: &mut out,
            pager: false,
        };
        let result = cmd.execute(args, &mut ctx);
        out.flush().map_err(CommandError::from).and(result)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::input::BatchSource;
    use std::io::Cursor;

    pub fn input(lines: &str) -> BatchSource<Cursor<Vec<u8>>> {
        BatchSource::new(Cursor::new(lines.as_bytes().to_vec()))
    }

    /// Run one built-in with its output captured.
    pub fn run(
        cmd: &dyn Command,
        args: &[&str],
        env: &mut Environment,
    ) -> (Result<Flow, CommandError>, String) {
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        let mut input = input("");
        let mut out = Vec::new();
        let mut ctx = Context {
            env,
            input: &mut input,
            out: &mut out,
            pager: false,
        };
        let result = cmd.execute(&args, &mut ctx);
        (result, String::from_utf8_lossy(&out).into_owned())
    }
}
