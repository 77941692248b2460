use super::EnvError;
use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};

/// Variable holding the absolute working directory.
pub const PWD: &str = "PWD";

/// Variables and working directory shared by built-ins and handed to children.
///
/// The working directory is logical: relative paths given to built-ins,
/// redirections and spawned programs are resolved against it rather than
/// against the process cwd, unless [`Environment::follow_process_cwd`] ties
/// the two together.
#[derive(Clone, Debug)]
pub struct Environment {
    vars: BTreeMap<String, String>,
    current_dir: PathBuf,
    follow_process: bool,
}

impl Environment {
    /// Seed the store from the inherited environment and the process cwd.
    pub fn from_process() -> Result<Self, EnvError> {
        let current_dir = env::current_dir().map_err(|e| EnvError::IoError(".".into(), e))?;
        let mut store = Self::isolated(current_dir);

        for (key, value) in env::vars_os() {
            match (key.into_string(), value.into_string()) {
                (Ok(key), Ok(value)) if key != PWD => {
                    if let Err(e) = store.set(&key, &value) {
                        log::warn!("skipping inherited variable {}: {}", key, e);
                    }
                }
                (Ok(_), Ok(_)) => {}
                (Ok(key), Err(_)) => log::warn!("skipping {}: value is not UTF-8", key),
                (Err(key), _) => log::warn!("skipping {:?}: name is not UTF-8", key),
            }
        }

        Ok(store)
    }

    /// A store holding only `PWD`.
    pub fn isolated(current_dir: impl Into<PathBuf>) -> Self {
        let current_dir = current_dir.into();
        let mut vars = BTreeMap::new();
        vars.insert(PWD.to_string(), current_dir.to_string_lossy().into_owned());

        Self {
            vars,
            current_dir,
            follow_process: false,
        }
    }

    /// Make [`Environment::change_dir`] move the process cwd too.
    pub fn follow_process_cwd(mut self) -> Self {
        self.follow_process = true;
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    pub fn set(&mut self, name: &str, value: &str) -> Result<(), EnvError> {
        if name.is_empty() || name.contains(['=', '\0']) {
            return Err(EnvError::InvalidName(name.to_string()));
        }
        if value.contains('\0') {
            return Err(EnvError::InvalidValue("contains a NUL byte"));
        }

        self.vars.insert(name.to_string(), value.to_string());
        Ok(())
    }

    /// Variables in ascending name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn current_dir(&self) -> &Path {
        &self.current_dir
    }

    /// Interpret `path` relative to the working directory.
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        self.current_dir.join(path)
    }

    /// Change the working directory and update `PWD`.
    ///
    /// On failure the store is left untouched.
    pub fn change_dir(&mut self, target: &str) -> Result<&Path, EnvError> {
        let requested = self.resolve(target);
        let canonical = requested
            .canonicalize()
            .map_err(|e| EnvError::IoError(PathBuf::from(target), e))?;

        if !canonical.is_dir() {
            return Err(EnvError::NotADirectory(PathBuf::from(target)));
        }

        if self.follow_process {
            env::set_current_dir(&canonical).map_err(|e| EnvError::IoError(canonical.clone(), e))?;
        }

        self.vars.insert(
            PWD.to_string(),
            canonical.to_string_lossy().into_owned(),
        );
        self.current_dir = canonical;
        Ok(&self.current_dir)
    }

    /// Owned copy of every variable, as handed to a spawned child.
    pub fn snapshot(&self) -> Vec<(String, String)> {
        self.vars
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}
