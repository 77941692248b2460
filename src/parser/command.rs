use super::ParseError;

const BACKGROUND: &str = "&";
const REDIRECT_IN: &str = "<";
const REDIRECT_OUT: &str = ">";
const REDIRECT_APPEND: &str = ">>";

/// Target of a `>` or `>>` redirection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRedirect {
    pub path: String,
    pub append: bool,
}

/// One input line after operator extraction.
///
/// `argv` is never empty: lines that would produce an empty argument vector
/// are dropped by [`parse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    pub argv: Vec<String>,
    pub input: Option<String>,
    pub output: Option<OutputRedirect>,
    pub background: bool,
}

impl ParsedCommand {
    pub fn name(&self) -> &str {
        &self.argv[0]
    }

    pub fn args(&self) -> &[String] {
        &self.argv[1..]
    }
}

/// Extract the background marker and redirections from a token list.
///
/// Returns `Ok(None)` when nothing is left to run.
pub fn parse(tokens: &[&str]) -> Result<Option<ParsedCommand>, ParseError> {
    let (tokens, background) = match tokens.split_last() {
        None => return Ok(None),
        Some((&BACKGROUND, rest)) => (rest, true),
        Some(_) => (tokens, false),
    };

    let mut argv = Vec::with_capacity(tokens.len());
    let mut input = None;
    let mut output = None;

    let mut iter = tokens.iter();
    while let Some(&token) = iter.next() {
        match token {
            REDIRECT_IN | REDIRECT_OUT | REDIRECT_APPEND => {
                let target = iter
                    .next()
                    .ok_or_else(|| ParseError::MissingRedirectTarget(token.to_string()))?;
                if token == REDIRECT_IN {
                    input = Some(target.to_string());
                } else {
                    output = Some(OutputRedirect {
                        path: target.to_string(),
                        append: token == REDIRECT_APPEND,
                    });
                }
            }
            _ => argv.push(token.to_string()),
        }
    }

    if argv.is_empty() {
        return Ok(None);
    }

    Ok(Some(ParsedCommand {
        argv,
        input,
        output,
        background,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::tokenize;

    fn parse_line(line: &str) -> Result<Option<ParsedCommand>, ParseError> {
        parse(&tokenize(line))
    }

    #[test]
    fn test_plain_command() -> Result<(), ParseError> {
        let cmd = parse_line("ls -l /tmp")?.expect("command");
        assert_eq!(cmd.argv, vec!["ls", "-l", "/tmp"]);
        assert_eq!(cmd.name(), "ls");
        assert_eq!(cmd.args(), ["-l", "/tmp"]);
        assert!(cmd.input.is_none());
        assert!(cmd.output.is_none());
        assert!(!cmd.background);
        Ok(())
    }

    #[test]
    fn test_empty_and_blank_lines() -> Result<(), ParseError> {
        assert!(parse_line("")?.is_none());
        assert!(parse_line(" \t ")?.is_none());
        Ok(())
    }

    #[test]
    fn test_trailing_ampersand_is_stripped() -> Result<(), ParseError> {
        let cmd = parse_line("sort < in.txt >> out.txt &")?.expect("command");
        assert!(cmd.background);
        assert_eq!(cmd.argv, vec!["sort"]);
        assert_eq!(cmd.input.as_deref(), Some("in.txt"));
        assert_eq!(
            cmd.output,
            Some(OutputRedirect {
                path: "out.txt".into(),
                append: true
            })
        );
        Ok(())
    }

    #[test]
    fn test_lone_ampersand_produces_nothing() -> Result<(), ParseError> {
        assert!(parse_line("&")?.is_none());
        Ok(())
    }

    #[test]
    fn test_inner_ampersand_is_an_argument() -> Result<(), ParseError> {
        let cmd = parse_line("echo a & b")?.expect("command");
        assert!(!cmd.background);
        assert_eq!(cmd.argv, vec!["echo", "a", "&", "b"]);
        Ok(())
    }

    #[test]
    fn test_missing_target_is_a_syntax_error() {
        assert_eq!(
            parse_line("cat <"),
            Err(ParseError::MissingRedirectTarget("<".into()))
        );
        assert_eq!(
            parse_line("echo hi >> &"),
            Err(ParseError::MissingRedirectTarget(">>".into()))
        );
    }

    #[test]
    fn test_later_output_redirect_wins() -> Result<(), ParseError> {
        let cmd = parse_line("echo x > a.txt >> b.txt")?.expect("command");
        assert_eq!(
            cmd.output,
            Some(OutputRedirect {
                path: "b.txt".into(),
                append: true
            })
        );

        let cmd = parse_line("echo x >> a.txt > b.txt")?.expect("command");
        assert_eq!(
            cmd.output,
            Some(OutputRedirect {
                path: "b.txt".into(),
                append: false
            })
        );
        assert_eq!(cmd.argv, vec!["echo", "x"]);
        Ok(())
    }

    #[test]
    fn test_later_input_redirect_wins() -> Result<(), ParseError> {
        let cmd = parse_line("cat < a < b")?.expect("command");
        assert_eq!(cmd.input.as_deref(), Some("b"));
        assert_eq!(cmd.argv, vec!["cat"]);
        Ok(())
    }

    #[test]
    fn test_redirect_only_line_produces_nothing() -> Result<(), ParseError> {
        assert!(parse_line("> file")?.is_none());
        assert!(parse_line("< in > out &")?.is_none());
        Ok(())
    }

    #[test]
    fn test_operators_may_precede_arguments() -> Result<(), ParseError> {
        let cmd = parse_line("> out.txt echo hello")?.expect("command");
        assert_eq!(cmd.argv, vec!["echo", "hello"]);
        assert_eq!(cmd.output.map(|o| o.path), Some("out.txt".into()));
        Ok(())
    }
}
