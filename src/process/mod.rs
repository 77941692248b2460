use std::fmt;

mod executor;
pub mod redirect;

pub use executor::{Launched, ProcessExecutor};

#[derive(Debug)]
pub enum ProcessError {
    CommandNotFound(String),
    PermissionDenied(String),
    Redirect(String, std::io::Error),
    Spawn(String, std::io::Error),
    Wait(u32, std::io::Error),
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessError::CommandNotFound(cmd) => write!(f, "command not found: {}", cmd),
            ProcessError::PermissionDenied(cmd) => write!(f, "{}: permission denied", cmd),
            ProcessError::Redirect(path, e) => write!(f, "{}: {}", path, e),
            ProcessError::Spawn(cmd, e) => write!(f, "failed to launch {}: {}", cmd, e),
            ProcessError::Wait(pid, e) => write!(f, "failed to wait for process {}: {}", pid, e),
        }
    }
}

impl std::error::Error for ProcessError {}
