//! Locates the `]` closing a subscript, skipping over quoted literals.
use crate::error::JPathError;
use crate::grammar::quoted_literal_len;

/// Returns the byte offset of the `]` that closes the `[` found at `open`.
///
/// Quoted literals inside the subscript are consumed whole, so brackets and
/// quotes inside them never affect the nesting depth. This applies to
/// filter and script payloads too: a quoted literal there may only escape
/// its own delimiter, `\\`, `/`, `b`, `f`, `n`, `r`, `t` or `\uXXXX`. Any other
/// escape (`"it\'s"`, `"a\d"`) leaves the literal unclosed and is reported
/// as an unmatched quote.
pub(crate) fn find_closing_bracket(path: &str, open: usize) -> Result<usize, JPathError> {
    let bytes = path.as_bytes();
    let mut depth = 1usize;
    let mut index = open + 1;
    while let Some(&byte) = bytes.get(index) {
        match byte {
            b'[' => depth += 1,
            b']' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(index);
                }
            }
            quote @ (b'\'' | b'"') => {
                index += quoted_literal_len(&path[index..]).ok_or(JPathError::UnmatchedQuote {
                    quote: char::from(quote),
                    position: index,
                })?;
                continue;
            }
            _ => {}
        }
        index += 1;
    }
    Err(JPathError::UnmatchedBracket { position: open })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_and_nested_brackets() {
        assert_eq!(find_closing_bracket("a[1]", 1), Ok(3));
        assert_eq!(find_closing_bracket("[$.a[0].b[*]].c", 0), Ok(12));
    }

    #[test]
    fn test_brackets_inside_quotes_are_inert() {
        let path = r#"[?(@path !== "$['store']['book'][0]")]"#;
        assert_eq!(find_closing_bracket(path, 0), Ok(path.len() - 1));
        assert_eq!(find_closing_bracket("['a]b']", 0), Ok(6));
        assert_eq!(find_closing_bracket(r#"['it\'s]']"#, 0), Ok(9));
    }

    #[test]
    fn test_unclosed_quote() {
        assert_eq!(
            find_closing_bracket("$.prop['nes]ted", 6),
            Err(JPathError::UnmatchedQuote { quote: '\'', position: 7 })
        );
        assert_eq!(
            find_closing_bracket(r#"$.prop["]nested"#, 6),
            Err(JPathError::UnmatchedQuote { quote: '"', position: 7 })
        );
    }

    #[test]
    fn test_filter_literals_use_the_narrow_escape_set() {
        let path = r#"[?(@.name == 'it\'s' && @.tag == "a\nb")]"#;
        assert_eq!(find_closing_bracket(path, 0), Ok(path.len() - 1));
        assert_eq!(
            find_closing_bracket(r#"[?(@.name == "it\'s")]"#, 0),
            Err(JPathError::UnmatchedQuote { quote: '"', position: 13 })
        );
        assert_eq!(
            find_closing_bracket(r#"[?(@.name == "a\d")]"#, 0),
            Err(JPathError::UnmatchedQuote { quote: '"', position: 13 })
        );
    }

    #[test]
    fn test_unclosed_bracket() {
        assert_eq!(
            find_closing_bracket("$..book[engine,", 7),
            Err(JPathError::UnmatchedBracket { position: 7 })
        );
        assert_eq!(
            find_closing_bracket("[[a]", 0),
            Err(JPathError::UnmatchedBracket { position: 0 })
        );
    }
}
