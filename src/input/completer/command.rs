use std::{borrow::Cow, collections::BTreeSet, env, fs, os::unix::fs::PermissionsExt};

use rustyline::completion::Pair;

use crate::core::commands::BUILTIN_NAMES;

/// Completes the first word of a line from built-ins and `PATH` executables.
#[derive(Clone, Default)]
pub struct CommandCompleter {
    commands: BTreeSet<Cow<'static, str>>,
    /// `PATH` value the executables were collected from.
    search_path: Option<String>,
}

impl CommandCompleter {
    pub fn new() -> Self {
        let mut completer = Self {
            commands: BTreeSet::new(),
            search_path: env::var("PATH").ok(),
        };
        completer.refresh_commands();
        completer
    }

    /// Rescan executables if `PATH` differs from the last scan.
    pub fn set_search_path(&mut self, search_path: Option<&str>) {
        if self.search_path.as_deref() == search_path {
            return;
        }
        log::debug!("PATH changed, rescanning commands for completion");
        self.search_path = search_path.map(str::to_string);
        self.refresh_commands();
    }

    fn refresh_commands(&mut self) {
        self.commands.clear();
        self.add_builtin_commands();
        self.add_path_commands();
    }

    fn add_builtin_commands(&mut self) {
        self.commands
            .extend(BUILTIN_NAMES.iter().map(|name| Cow::Borrowed(*name)));
    }

    fn add_path_commands(&mut self) {
        let Some(path_var) = &self.search_path else {
            return;
        };

        for path in env::split_paths(path_var) {
            let Ok(entries) = fs::read_dir(path) else {
                continue;
            };
            for entry in entries.filter_map(Result::ok) {
                let executable = entry
                    .metadata()
                    .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
                    .unwrap_or(false);
                if executable {
                    if let Some(name) = entry.file_name().to_str() {
                        self.commands.insert(Cow::Owned(name.to_string()));
                    }
                }
            }
        }
    }

    pub fn complete_command(&self, word: &str) -> Vec<Pair> {
        self.commands
            .iter()
            .filter(|cmd| cmd.starts_with(word))
            .map(|cmd| Pair {
                display: cmd.to_string(),
                replacement: format!("{} ", cmd),
            })
            .collect()
    }
}
