use std::{fs, path::Path};

use rustyline::completion::Pair;

#[derive(Clone, Default)]
pub struct PathCompleter;

impl PathCompleter {
    pub fn new() -> Self {
        Self
    }

    /// Complete `incomplete` against the entries of its parent directory.
    pub fn complete_path(&self, incomplete: &str) -> Vec<Pair> {
        let (typed_dir, file_prefix) = Self::split_input(incomplete);
        let dir_to_search = if typed_dir.is_empty() {
            Path::new(".")
        } else {
            Path::new(typed_dir)
        };

        let Ok(entries) = fs::read_dir(dir_to_search) else {
            return Vec::new();
        };

        let mut matches: Vec<Pair> = entries
            .filter_map(Result::ok)
            .filter_map(|entry| {
                let name = entry.file_name().to_str()?.to_string();
                if !name.starts_with(file_prefix) {
                    return None;
                }
                Some(Self::completion_pair(typed_dir, &name, &entry.path()))
            })
            .collect();

        matches.sort_by(|a, b| a.display.cmp(&b.display));
        matches
    }

    /// Split at the last `/`: the directory as typed (slash included) and
    /// the partial name after it.
    fn split_input(incomplete: &str) -> (&str, &str) {
        match incomplete.rfind('/') {
            Some(idx) => (&incomplete[..=idx], &incomplete[idx + 1..]),
            None => ("", incomplete),
        }
    }

    fn completion_pair(typed_dir: &str, name: &str, path: &Path) -> Pair {
        let completed = format!("{}{}", typed_dir, name);

        if path.is_dir() {
            Pair {
                display: format!("{}/", name),
                replacement: format!("{}/", completed),
            }
        } else {
            Pair {
                display: name.to_string(),
                replacement: format!("{} ", completed),
            }
        }
    }
}
