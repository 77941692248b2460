use std::io::ErrorKind;
use std::path::PathBuf;

use rustyline::{error::ReadlineError, history::FileHistory, Config, Editor};

use super::{LineSource, ShellCompleter};
use crate::core::env::Environment;
use crate::error::ShellError;

/// Line editor reading from the terminal, with persistent history.
pub struct InteractiveSource {
    editor: Editor<ShellCompleter, FileHistory>,
    history_file: Option<PathBuf>,
}

impl InteractiveSource {
    pub fn new(history_file: Option<PathBuf>, history_size: usize) -> Result<Self, ShellError> {
        let config = Config::builder()
            .max_history_size(history_size)?
            .auto_add_history(true)
            .build();
        let mut editor = Editor::<ShellCompleter, FileHistory>::with_config(config)?;
        editor.set_helper(Some(ShellCompleter::new()));

        if let Some(path) = &history_file {
            if path.exists() {
                if let Err(e) = editor.load_history(path) {
                    log::warn!("couldn't load history from {}: {}", path.display(), e);
                }
            }
        }

        Ok(Self {
            editor,
            history_file,
        })
    }
}

impl LineSource for InteractiveSource {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, ShellError> {
        loop {
            match self.editor.readline(prompt) {
                Ok(line) => return Ok(Some(line)),
                // ctrl-c drops the line being edited
                Err(ReadlineError::Interrupted) => continue,
                Err(ReadlineError::Eof) => return Ok(None),
                Err(ReadlineError::Io(e)) if e.kind() == ErrorKind::InvalidData => {
                    log::warn!("discarding line that is not valid UTF-8: {}", e);
                    continue;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn is_interactive(&self) -> bool {
        true
    }

    fn sync_env(&mut self, env: &Environment) {
        if let Some(helper) = self.editor.helper_mut() {
            helper.set_search_path(env.get("PATH"));
        }
    }

    fn finish(&mut self) {
        if let Some(path) = &self.history_file {
            if let Err(e) = self.editor.save_history(path) {
                log::warn!("couldn't save history to {}: {}", path.display(), e);
            }
        }
    }
}
