use std::fs::{File, OpenOptions};
use std::io;
use std::os::unix::fs::OpenOptionsExt;

use crate::core::env::Environment;
use crate::parser::OutputRedirect;

const OUTPUT_MODE: u32 = 0o644;

/// Open the `<` target read-only.
pub fn open_input(path: &str, env: &Environment) -> io::Result<File> {
    File::open(env.resolve(path))
}

/// Open the `>`/`>>` target for writing, creating it if absent.
pub fn open_output(redirect: &OutputRedirect, env: &Environment) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options.create(true).mode(OUTPUT_MODE);
    if redirect.append {
        options.append(true);
    } else {
        options.write(true).truncate(true);
    }
    options.open(env.resolve(&redirect.path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write;

    fn redirect(path: &str, append: bool) -> OutputRedirect {
        OutputRedirect {
            path: path.to_string(),
            append,
        }
    }

    #[test]
    fn test_truncate_then_append() -> io::Result<()> {
        let dir = tempfile::tempdir()?;
        let env = Environment::isolated(dir.path());

        open_output(&redirect("out.txt", false), &env)?.write_all(b"first\n")?;
        open_output(&redirect("out.txt", true), &env)?.write_all(b"second\n")?;
        assert_eq!(fs::read_to_string(dir.path().join("out.txt"))?, "first\nsecond\n");

        open_output(&redirect("out.txt", false), &env)?.write_all(b"third\n")?;
        assert_eq!(fs::read_to_string(dir.path().join("out.txt"))?, "third\n");
        Ok(())
    }

    #[test]
    fn test_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let env = Environment::isolated(dir.path());
        let err = open_input("absent.txt", &env).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
