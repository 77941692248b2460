use super::{Command, CommandError, Context, Flow};

#[derive(Clone)]
pub struct QuitCommand;

impl Command for QuitCommand {
    fn execute(&self, _args: &[String], _ctx: &mut Context<'_>) -> Result<Flow, CommandError> {
        Ok(Flow::Halt)
    }

    fn honors_redirection(&self) -> bool {
        false
    }
}
