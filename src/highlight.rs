use inksac::prelude::*;

use crate::parser::tokenize;

const OPERATORS: [&str; 4] = ["<", ">", ">>", "&"];

#[derive(Debug, Clone, Copy)]
pub struct SyntaxHighlighter {
    color_support: ColorSupport,
}

impl Default for SyntaxHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntaxHighlighter {
    pub fn new() -> Self {
        let support = check_color_support().unwrap_or(ColorSupport::NoColor);
        Self {
            color_support: support,
        }
    }

    /// A highlighter that never emits escape codes.
    pub fn plain() -> Self {
        Self {
            color_support: ColorSupport::NoColor,
        }
    }

    fn enabled(&self) -> bool {
        !matches!(self.color_support, ColorSupport::NoColor)
    }

    /// Colour the command word and the redirection/background operators.
    ///
    /// Whitespace is copied through untouched so the cursor position stays valid.
    pub fn highlight_command(&self, input: &str) -> String {
        if !self.enabled() {
            return input.to_string();
        }

        let mut out = String::with_capacity(input.len() * 2);
        let mut rest = input;
        let mut first = true;
        let mut after_redirect = false;

        for token in tokenize(input) {
            // tokens come back in order, so each is found after the previous one
            let start = rest.find(token).unwrap_or(0);
            out.push_str(&rest[..start]);

            if OPERATORS.contains(&token) {
                let operator_style = Style::builder().foreground(Color::Yellow).build();
                out.push_str(&token.style(operator_style).to_string());
                after_redirect = token != "&";
            } else if first && !after_redirect {
                let command_style = Style::builder().foreground(Color::Cyan).bold().build();
                out.push_str(&token.style(command_style).to_string());
                first = false;
            } else {
                out.push_str(token);
                after_redirect = false;
            }

            rest = &rest[start + token.len()..];
        }
        out.push_str(rest);
        out
    }

    pub fn highlight_error(&self, error: &str) -> String {
        if !self.enabled() {
            return error.to_string();
        }

        let error_style = Style::builder().foreground(Color::Red).bold().build();

        error.style(error_style).to_string()
    }

    pub fn highlight_hint(&self, hint: &str) -> String {
        if !self.enabled() {
            return hint.to_string();
        }

        let hint_style = Style::builder()
            .foreground(Color::RGB(128, 128, 128))
            .build();

        hint.style(hint_style).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_passthrough() {
        let highlighter = SyntaxHighlighter::plain();
        assert_eq!(
            highlighter.highlight_command("  ls  -l > out &"),
            "  ls  -l > out &"
        );
        assert_eq!(highlighter.highlight_error("boom"), "boom");
    }
}
