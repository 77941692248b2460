use std::fmt;

mod command;
mod tokenizer;

pub use command::{parse, OutputRedirect, ParsedCommand};
pub use tokenizer::tokenize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    MissingRedirectTarget(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::MissingRedirectTarget(op) => {
                write!(f, "syntax error: expected a file name after '{}'", op)
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Tokenize and parse one raw line.
pub fn parse_line(line: &str) -> Result<Option<ParsedCommand>, ParseError> {
    parse(&tokenize(line))
}
