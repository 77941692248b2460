use std::io::{self, IsTerminal, Write};

mod executor;

use crate::{
    config::Config,
    core::{commands::CommandExecutor, env::Environment},
    error::ShellError,
    highlight::SyntaxHighlighter,
    input::{BatchSource, InteractiveSource, LineSource},
    process::ProcessExecutor,
};

use executor::LineHandler;

pub use crate::core::commands::Flow;

/// The read-parse-dispatch loop and the state it carries between lines.
pub struct Shell {
    pub(crate) input: Box<dyn LineSource>,
    pub(crate) env: Environment,
    pub(crate) commands: CommandExecutor,
    pub(crate) processes: ProcessExecutor,
    pub(crate) stdout: Box<dyn Write>,
    pub(crate) highlighter: SyntaxHighlighter,
}

impl Shell {
    pub fn new(config: &Config) -> Result<Self, ShellError> {
        let input: Box<dyn LineSource> = match &config.batch_file {
            Some(path) => Box::new(BatchSource::open(path)?),
            None => Box::new(InteractiveSource::new(
                config.history_file.clone(),
                config.history_size,
            )?),
        };

        let env = Environment::from_process()?.follow_process_cwd();
        let pager = !config.is_batch() && io::stdout().is_terminal();
        let highlighter = if io::stderr().is_terminal() {
            SyntaxHighlighter::new()
        } else {
            SyntaxHighlighter::plain()
        };

        let mut shell = Self::with_parts(input, env, Box::new(io::stdout()));
        shell.commands = CommandExecutor::new().with_pager(pager);
        shell.highlighter = highlighter;
        Ok(shell)
    }

    /// Assemble a shell from explicit parts. Errors are printed uncoloured.
    pub fn with_parts(
        input: Box<dyn LineSource>,
        env: Environment,
        stdout: Box<dyn Write>,
    ) -> Self {
        Shell {
            input,
            env,
            commands: CommandExecutor::new(),
            processes: ProcessExecutor::new(),
            stdout,
            highlighter: SyntaxHighlighter::plain(),
        }
    }

    /// Run until `quit` or end of input.
    pub fn run(&mut self) -> Result<(), ShellError> {
        let result = self.run_loop();

        let reaped = self.processes.reap();
        log::debug!(
            "halting: reaped {}, leaving {} background process(es) running",
            reaped,
            self.processes.background_pids().len()
        );
        self.input.finish();
        result
    }

    fn run_loop(&mut self) -> Result<(), ShellError> {
        loop {
            self.processes.reap();

            self.input.sync_env(&self.env);
            let prompt = self.prompt();
            let Some(line) = self.input.read_line(&prompt)? else {
                return Ok(());
            };

            if self.execute_line(&line) == Flow::Halt {
                return Ok(());
            }
        }
    }

    fn prompt(&self) -> String {
        if self.input.is_interactive() {
            format!("{} > ", self.env.current_dir().display())
        } else {
            String::new()
        }
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub(crate) fn report(&mut self, message: &str) {
        // keep stdout and stderr in order on a shared terminal
        if let Err(e) = self.stdout.flush() {
            log::warn!("couldn't flush output: {}", e);
        }
        let line = format!("myshell: {}", message);
        eprintln!("{}", self.highlighter.highlight_error(&line));
    }
}
