mod batch;
mod completer;
mod interactive;

pub use batch::BatchSource;
pub use completer::ShellCompleter;
pub use interactive::InteractiveSource;

use crate::core::env::Environment;
use crate::error::ShellError;

/// Supplies one logical input line at a time.
pub trait LineSource {
    /// Read the next line without its terminator. `None` means end of input.
    ///
    /// Batch sources ignore `prompt`.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, ShellError>;

    fn is_interactive(&self) -> bool;

    /// Called before each read with the current variables.
    fn sync_env(&mut self, _env: &Environment) {}

    /// Called once when the main loop halts.
    fn finish(&mut self) {}
}
