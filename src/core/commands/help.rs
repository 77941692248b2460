use std::io::Write;
use std::process::{Command as Process, Stdio};

use super::{Command, CommandError, Context, Flow};
use crate::core::env::Environment;

const DEFAULT_PAGER: &str = "more";

const MANUAL: &str = "\
MYSHELL(1)

NAME
    myshell - a small command interpreter

SYNOPSIS
    myshell [OPTIONS] [BATCHFILE]

    Without BATCHFILE, commands are read interactively after a prompt showing
    the working directory. With BATCHFILE, its lines are run in order without
    prompting and the shell exits at the end of the file.

BUILT-IN COMMANDS
    cd [DIR]        Change the working directory to DIR and update PWD.
                    Without DIR, print the working directory.
    dir [PATH]      List the entries of PATH (default: the working directory).
    environ         Print every environment variable as NAME=VALUE.
    set VAR VALUE   Set VAR to VALUE for this session and for every program
                    started afterwards. VALUE may span several words.
    echo [TEXT]     Print TEXT followed by a newline.
    help            Show this manual.
    pause           Wait until Enter is pressed.
    quit            Leave the shell.

    Any other command names a program, which is looked up in PATH and run
    with the current environment.

REDIRECTION
    < FILE          Read standard input from FILE.
    > FILE          Write standard output to FILE, replacing its contents.
    >> FILE         Append standard output to FILE.

    dir, environ, echo and help honour > and >>. cd, set, pause and quit
    ignore redirection.

BACKGROUND
    COMMAND &       A trailing & starts the program without waiting for it.
                    Its process id is printed and the next command is read
                    immediately.

Words are separated by spaces and tabs. There is no quoting, escaping,
variable expansion, globbing or piping.
";

/// `help`: print the manual, through a pager when writing to a terminal.
#[derive(Clone)]
pub struct HelpCommand;

impl Command for HelpCommand {
    fn execute(&self, _args: &[String], ctx: &mut Context<'_>) -> Result<Flow, CommandError> {
        if ctx.pager {
            ctx.out.flush()?;
            match page(ctx.env) {
                Ok(()) => return Ok(Flow::Continue),
                Err(e) => log::debug!("pager unavailable, printing directly: {}", e),
            }
        }

        ctx.out.write_all(MANUAL.as_bytes())?;
        Ok(Flow::Continue)
    }
}

/// Feed the manual to `$PAGER` (or `more`) and wait for it to exit.
fn page(env: &Environment) -> std::io::Result<()> {
    let pager = env.get("PAGER").unwrap_or(DEFAULT_PAGER);
    let mut words = pager.split_whitespace();
    let program = words.next().unwrap_or(DEFAULT_PAGER);

    let mut child = Process::new(program)
        .args(words)
        .env_clear()
        .envs(env.snapshot())
        .current_dir(env.current_dir())
        .stdin(Stdio::piped())
        .spawn()?;

    if let Some(mut stdin) = child.stdin.take() {
        // the pager may quit before reading everything
        if let Err(e) = stdin.write_all(MANUAL.as_bytes()) {
            log::debug!("pager closed its input early: {}", e);
        }
    }
    child.wait()?;
    Ok(())
}
