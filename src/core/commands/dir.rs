use std::fs;
use std::io::{self, Write};

use super::{Command, CommandError, Context, Flow};

/// `dir [path]`: list directory entries, one per line, sorted by name.
#[derive(Clone)]
pub struct DirCommand;

impl Command for DirCommand {
    fn execute(&self, args: &[String], ctx: &mut Context<'_>) -> Result<Flow, CommandError> {
        let path = args.first().map(String::as_str).unwrap_or(".");
        let entries = fs::read_dir(ctx.env.resolve(path))
            .map_err(|e| CommandError::Directory(path.to_string(), e))?;

        let names = entries.map(|entry| {
            entry.map(|entry| entry.file_name().to_string_lossy().into_owned())
        });
        write_listing(names, path, ctx.out)?;
        Ok(Flow::Continue)
    }
}

/// Write the names read before the first error, sorted, then return that error.
fn write_listing<I>(names: I, path: &str, out: &mut dyn Write) -> Result<(), CommandError>
where
    I: Iterator<Item = io::Result<String>>,
{
    let mut listed = Vec::new();
    let mut failure = None;
    for name in names {
        match name {
            Ok(name) => listed.push(name),
            Err(e) => {
                failure = Some(CommandError::Directory(path.to_string(), e));
                break;
            }
        }
    }

    listed.sort();
    for name in &listed {
        writeln!(out, "{}", name)?;
    }

    match failure {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
