use std::io::Write;

use super::{Command, CommandError, Context, Flow};

/// `pause`: wait for one line of input and throw it away.
#[derive(Clone)]
pub struct PauseCommand;

impl Command for PauseCommand {
    fn execute(&self, _args: &[String], ctx: &mut Context<'_>) -> Result<Flow, CommandError> {
        ctx.out.flush()?;
        match ctx.input.read_line("").map_err(CommandError::Input)? {
            Some(_) => Ok(Flow::Continue),
            None => Ok(Flow::Halt),
        }
    }

    fn honors_redirection(&self) -> bool {
        false
    }
}
