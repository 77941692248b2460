use std::path::PathBuf;

use crate::core::env::EnvError;

#[derive(Debug)]
pub enum ShellError {
    Readline(rustyline::error::ReadlineError),
    Io(std::io::Error),
    BatchFile(PathBuf, std::io::Error),
    Env(EnvError),
    FlagError(String),
}

impl From<rustyline::error::ReadlineError> for ShellError {
    fn from(err: rustyline::error::ReadlineError) -> Self {
        ShellError::Readline(err)
    }
}

impl From<std::io::Error> for ShellError {
    fn from(err: std::io::Error) -> Self {
        ShellError::Io(err)
    }
}

impl From<EnvError> for ShellError {
    fn from(err: EnvError) -> Self {
        ShellError::Env(err)
    }
}

impl std::fmt::Display for ShellError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShellError::Readline(e) => write!(f, "Readline error: {}", e),
            ShellError::Io(e) => write!(f, "IO error: {}", e),
            ShellError::BatchFile(path, e) => {
                write!(f, "cannot open batch file {}: {}", path.display(), e)
            }
            ShellError::Env(e) => write!(f, "Environment error: {}", e),
            ShellError::FlagError(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for ShellError {}
