use std::path::PathBuf;

use simplelog::LevelFilter;

use crate::error::ShellError;
use crate::flags::Flags;

const HISTORY_FILE: &str = ".myshell_history";
const HISTORY_SIZE: usize = 1000;

/// Runtime settings derived from the command line.
#[derive(Debug, Clone)]
pub struct Config {
    /// Script to run instead of reading from the terminal.
    pub batch_file: Option<PathBuf>,
    pub history_file: Option<PathBuf>,
    pub history_size: usize,
    pub log_level: LevelFilter,
}

impl Config {
    pub fn from_flags(flags: &Flags) -> Result<Self, ShellError> {
        let batch_file = match flags.positionals() {
            [] => None,
            [path] => Some(PathBuf::from(path)),
            _ => {
                return Err(ShellError::FlagError(
                    "expected at most one batch file".to_string(),
                ))
            }
        };

        let history_file = match batch_file {
            Some(_) => None,
            None => dirs::home_dir().map(|home| home.join(HISTORY_FILE)),
        };

        let log_level = if flags.is_set("quiet") {
            LevelFilter::Off
        } else if flags.is_set("debug") {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        };

        Ok(Config {
            batch_file,
            history_file,
            history_size: HISTORY_SIZE,
            log_level,
        })
    }

    pub fn is_batch(&self) -> bool {
        self.batch_file.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(args: &[&str]) -> Result<Config, ShellError> {
        let mut flags = Flags::new();
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        flags.parse(&args)?;
        Config::from_flags(&flags)
    }

    #[test]
    fn test_interactive_defaults() -> Result<(), ShellError> {
        let config = config(&[])?;
        assert!(!config.is_batch());
        assert_eq!(config.log_level, LevelFilter::Warn);
        assert_eq!(config.history_size, HISTORY_SIZE);
        Ok(())
    }

    #[test]
    fn test_batch_mode_has_no_history() -> Result<(), ShellError> {
        let config = config(&["-d", "script.txt"])?;
        assert_eq!(config.batch_file, Some(PathBuf::from("script.txt")));
        assert!(config.history_file.is_none());
        assert_eq!(config.log_level, LevelFilter::Debug);
        Ok(())
    }

    #[test]
    fn test_quiet_wins_over_debug() -> Result<(), ShellError> {
        assert_eq!(config(&["-d", "-q"])?.log_level, LevelFilter::Off);
        Ok(())
    }

    #[test]
    fn test_two_batch_files_rejected() {
        assert!(matches!(
            config(&["a.txt", "b.txt"]),
            Err(ShellError::FlagError(_))
        ));
    }
}
