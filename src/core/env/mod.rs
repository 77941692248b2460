mod vars;

pub use vars::{Environment, PWD};

use std::path::PathBuf;

#[derive(Debug)]
pub enum EnvError {
    InvalidName(String),
    InvalidValue(&'static str),
    NotADirectory(PathBuf),
    IoError(PathBuf, std::io::Error),
}

impl std::fmt::Display for EnvError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnvError::InvalidName(name) => write!(f, "invalid variable name: '{}'", name),
            EnvError::InvalidValue(val) => write!(f, "invalid value: {}", val),
            EnvError::NotADirectory(path) => write!(f, "{}: not a directory", path.display()),
            EnvError::IoError(path, e) => write!(f, "{}: {}", path.display(), e),
        }
    }
}

impl std::error::Error for EnvError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EnvError::IoError(_, e) => Some(e),
            _ => None,
        }
    }
}
