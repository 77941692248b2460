use super::{Command, CommandError, Context, Flow};

/// `set VAR VALUE...`: the value is the remaining arguments joined by spaces.
#[derive(Clone)]
pub struct SetCommand;

impl Command for SetCommand {
    fn execute(&self, args: &[String], ctx: &mut Context<'_>) -> Result<Flow, CommandError> {
        let [name, value @ ..] = args else {
            return Err(usage());
        };
        if value.is_empty() {
            return Err(usage());
        }

        ctx.env.set(name, &value.join(" "))?;
        Ok(Flow::Continue)
    }

    fn honors_redirection(&self) -> bool {
        false
    }
}

fn usage() -> CommandError {
    CommandError::InvalidArguments("usage: set VAR VALUE...".into())
}
