use std::io::Write;

use super::{Command, CommandError, Context, Flow};

#[derive(Clone)]
pub struct EnvironCommand;

impl Command for EnvironCommand {
    fn execute(&self, _args: &[String], ctx: &mut Context<'_>) -> Result<Flow, CommandError> {
        for (name, value) in ctx.env.iter() {
            writeln!(ctx.out, "{}={}", name, value)?;
        }
        Ok(Flow::Continue)
    }
}
