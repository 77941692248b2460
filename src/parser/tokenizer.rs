/// Split a raw line into whitespace-delimited tokens.
///
/// Only spaces and tabs separate tokens. Quotes, `#` and backslashes are
/// ordinary characters.
pub fn tokenize(line: &str) -> Vec<&str> {
    line.split([' ', '\t'])
        .filter(|token| !token.is_empty())
        .collect()
}
