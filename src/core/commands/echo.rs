use std::io::Write;

use super::{Command, CommandError, Context, Flow};

#[derive(Clone)]
pub struct EchoCommand;

impl Command for EchoCommand {
    fn execute(&self, args: &[String], ctx: &mut Context<'_>) -> Result<Flow, CommandError> {
        writeln!(ctx.out, "{}", args.join(" "))?;
        Ok(Flow::Continue)
    }
}
