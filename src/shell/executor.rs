use std::io::Write;

use super::{Flow, Shell};
use crate::parser::{self, ParsedCommand};
use crate::process::Launched;

pub(crate) trait LineHandler {
    fn execute_line(&mut self, line: &str) -> Flow;
}

impl LineHandler for Shell {
    fn execute_line(&mut self, line: &str) -> Flow {
        let command = match parser::parse_line(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Flow::Continue,
            Err(e) => {
                self.report(&e.to_string());
                return Flow::Continue;
            }
        };
        log::debug!("parsed {:?}", command);

        match self.run_builtin(&command) {
            Some(flow) => flow,
            None => {
                self.run_external(&command);
                Flow::Continue
            }
        }
    }
}

impl Shell {
    fn run_builtin(&mut self, command: &ParsedCommand) -> Option<Flow> {
        let result = self.commands.execute(
            command,
            &mut self.env,
            self.input.as_mut(),
            self.stdout.as_mut(),
        )?;

        Some(match result {
            Ok(flow) => flow,
            Err(e) => {
                self.report(&format!("{}: {}", command.name(), e));
                Flow::Continue
            }
        })
    }

    fn run_external(&mut self, command: &ParsedCommand) {
        if let Err(e) = self.stdout.flush() {
            log::warn!("couldn't flush output: {}", e);
        }

        match self.processes.launch(command, &self.env) {
            Ok(Launched::Background(pid)) => {
                if let Err(e) = writeln!(self.stdout, "[{}]", pid).and_then(|_| self.stdout.flush())
                {
                    log::warn!("couldn't report background pid {}: {}", pid, e);
                }
            }
            Ok(Launched::Foreground(_)) => {}
            Err(e) => self.report(&e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::env::Environment;
    use crate::input::BatchSource;
    use std::cell::RefCell;
    use std::fs;
    use std::io::{self, Cursor};
    use std::rc::Rc;
    use std::time::{Duration, Instant};

    /// Writer whose contents stay readable after the shell takes ownership.
    #[derive(Clone, Default)]
    struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.borrow()).into_owned()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, data: &[u8]) -> io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(data);
            Ok(data.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn setup_test_shell(script: &str) -> (Shell, SharedBuffer, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let mut env = Environment::from_process().unwrap();
        env.change_dir(dir.path().to_str().unwrap()).unwrap();

        let input = BatchSource::new(Cursor::new(script.as_bytes().to_vec()));
        let out = SharedBuffer::default();
        let shell = Shell::with_parts(Box::new(input), env, Box::new(out.clone()));
        (shell, out, dir)
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _data: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    #[test]
    fn test_report_survives_unflushable_output() {
        let dir = tempfile::tempdir().unwrap();
        let env = Environment::isolated(dir.path().canonicalize().unwrap());
        let input = BatchSource::new(Cursor::new(Vec::new()));
        let mut shell = Shell::with_parts(Box::new(input), env, Box::new(BrokenPipe));

        assert_eq!(shell.execute_line("cd /nonexistent"), Flow::Continue);
        assert_eq!(shell.execute_line("set A b"), Flow::Continue);
        assert_eq!(shell.env().get("A"), Some("b"));
    }

    #[test]
    fn test_blank_lines_do_nothing() {
        let (mut shell, out, _dir) = setup_test_shell("");
        assert_eq!(shell.execute_line(""), Flow::Continue);
        assert_eq!(shell.execute_line(" \t  "), Flow::Continue);
        assert!(out.contents().is_empty());
    }

    #[test]
    fn test_redirected_echo_then_dir() {
        let (mut shell, out, dir) = setup_test_shell("echo hi > out.txt\ndir\n");
        shell.run().unwrap();

        assert_eq!(fs::read_to_string(dir.path().join("out.txt")).unwrap(), "hi\n");
        assert_eq!(out.contents(), "out.txt\n");
    }

    #[test]
    fn test_set_is_seen_by_environ_and_children() {
        let (mut shell, out, dir) =
            setup_test_shell("set A B C\nenviron\nprintenv A > child.txt\n");
        shell.run().unwrap();

        assert!(out.contents().lines().any(|line| line == "A=B C"));
        assert_eq!(
            fs::read_to_string(dir.path().join("child.txt")).unwrap(),
            "B C\n"
        );
    }

    #[test]
    fn test_cd_moves_children_and_prompt() {
        let (mut shell, out, dir) = setup_test_shell("cd sub\ncd\npwd > here.txt\n");
        fs::create_dir(dir.path().join("sub")).unwrap();
        shell.run().unwrap();

        let sub = dir.path().canonicalize().unwrap().join("sub");
        assert_eq!(out.contents(), format!("{}\n", sub.display()));
        assert_eq!(
            fs::read_to_string(sub.join("here.txt")).unwrap().trim_end(),
            sub.to_str().unwrap()
        );
        assert_eq!(shell.env().current_dir(), sub);
    }

    #[test]
    fn test_failures_do_not_stop_the_loop() {
        let script = "nosuchprogram123\ncat <\ncd /nonexistent\nset LONELY\necho still here\n";
        let (mut shell, out, _dir) = setup_test_shell(script);
        shell.run().unwrap();

        assert_eq!(out.contents(), "still here\n");
        assert_eq!(shell.env().get("LONELY"), None);
    }

    #[test]
    fn test_quit_stops_reading() {
        let (mut shell, out, _dir) = setup_test_shell("echo one\nquit\necho two\n");
        shell.run().unwrap();
        assert_eq!(out.contents(), "one\n");
    }

    #[test]
    fn test_last_line_without_newline_runs() {
        let (mut shell, out, _dir) = setup_test_shell("echo first\necho last");
        shell.run().unwrap();
        assert_eq!(out.contents(), "first\nlast\n");
    }

    #[test]
    fn test_pause_consumes_next_batch_line() {
        let (mut shell, out, _dir) = setup_test_shell("pause\necho skipped\necho shown\n");
        shell.run().unwrap();
        assert_eq!(out.contents(), "shown\n");
    }

    #[test]
    fn test_background_reports_pid_and_continues() {
        let (mut shell, out, dir) = setup_test_shell("sleep 5 > sleep.txt &\necho done\n");
        let started = Instant::now();
        shell.run().unwrap();

        assert!(started.elapsed() < Duration::from_secs(3));
        let output = out.contents();
        let mut lines = output.lines();
        let pid_line = lines.next().unwrap();
        assert!(pid_line.starts_with('[') && pid_line.ends_with(']'));
        assert_eq!(lines.next(), Some("done"));
        assert!(dir.path().join("sleep.txt").exists());
    }

    #[test]
    fn test_ampersand_never_reaches_the_program() {
        let (mut shell, _out, dir) = setup_test_shell("echo a b > x.txt &\n");
        shell.run().unwrap();
        assert_eq!(fs::read_to_string(dir.path().join("x.txt")).unwrap(), "a b\n");
    }
}
