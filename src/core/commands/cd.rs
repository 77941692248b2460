use std::io::Write;

use super::{Command, CommandError, Context, Flow};

/// `cd [dir]`: print or change the working directory.
#[derive(Clone)]
pub struct CdCommand;

impl Command for CdCommand {
    fn execute(&self, args: &[String], ctx: &mut Context<'_>) -> Result<Flow, CommandError> {
        match args.first() {
            None => writeln!(ctx.out, "{}", ctx.env.current_dir().display())?,
            Some(target) => {
                let new_dir = ctx.env.change_dir(target)?;
                log::debug!("working directory is now {}", new_dir.display());
            }
        }
        Ok(Flow::Continue)
    }

    fn honors_redirection(&self) -> bool {
        false
    }
}
