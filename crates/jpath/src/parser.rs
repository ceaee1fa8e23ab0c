//! Single-pass scanner turning a JSONPath expression into a node sequence.
use crate::ast::{Key, Node, NormalizedPath};
use crate::error::JPathError;
use crate::matcher::find_closing_bracket;
use crate::subscript::classify;
use once_cell::sync::Lazy;
use std::collections::HashMap;

// --- Main Public Entry Point ---

/// Normalizes a path expression into the ordered selectors it denotes.
///
/// Script, filter and subpath payloads are extracted verbatim and never
/// interpreted. On error nothing is returned but the error.
pub fn normalize(path: &str) -> Result<NormalizedPath, JPathError> {
    let result = Scanner::new(path).run();
    match &result {
        Ok(nodes) => log::debug!("Normalized '{}' into {} nodes", path, nodes.len()),
        Err(e) => log::debug!("Failed to normalize '{}': {}", path, e),
    }
    result
}

// --- Scanner ---

struct Scanner<'a> {
    path: &'a str,
    index: usize,
    /// Start of the plain text not yet turned into a node.
    last_index: usize,
    nodes: Vec<Node>,
}

/// A special character's handler: `accepts` looks ahead without consuming,
/// `apply` consumes the character and emits nodes.
struct ScanRule {
    accepts: for<'p> fn(&Scanner<'p>) -> bool,
    apply: for<'p> fn(&mut Scanner<'p>) -> Result<(), JPathError>,
}

static SCAN_RULES: Lazy<HashMap<u8, ScanRule>> = Lazy::new(|| {
    HashMap::from([
        (
            b'.',
            ScanRule {
                accepts: |_| true,
                apply: dot,
            },
        ),
        (
            b'[',
            ScanRule {
                accepts: |_| true,
                apply: subscript,
            },
        ),
        (
            b'*',
            ScanRule {
                accepts: |scanner| !scanner.has_pending(),
                apply: |scanner| scanner.single(Node::Wildcard),
            },
        ),
        (
            b'$',
            ScanRule {
                accepts: |scanner| scanner.index == 0 && matches!(scanner.peek(1), None | Some(b'.')),
                apply: |scanner| scanner.single(Node::Root),
            },
        ),
        (
            b'^',
            ScanRule {
                accepts: |_| true,
                apply: |scanner| scanner.single(Node::Parent),
            },
        ),
    ])
});

impl<'a> Scanner<'a> {
    fn new(path: &'a str) -> Self {
        Self {
            path,
            index: 0,
            last_index: 0,
            nodes: Vec::new(),
        }
    }

    fn run(mut self) -> Result<NormalizedPath, JPathError> {
        while let Some(byte) = self.peek(0) {
            match SCAN_RULES.get(&byte) {
                Some(rule) if (rule.accepts)(&self) => (rule.apply)(&mut self)?,
                _ => self.index += 1,
            }
        }
        self.flush();
        Ok(NormalizedPath::new(self.nodes))
    }

    // Only ASCII bytes are dispatched on, so every index the scanner stops at
    // is a char boundary.
    fn peek(&self, offset: usize) -> Option<u8> {
        self.path.as_bytes().get(self.index + offset).copied()
    }

    fn has_pending(&self) -> bool {
        self.last_index != self.index
    }

    fn emit(&mut self, node: Node) {
        log::trace!("Emitting {} at offset {}", node, self.index);
        self.nodes.push(node);
    }

    /// Turns pending plain text into a property, or a function call when it
    /// ends with `()`.
    fn flush(&mut self) {
        if !self.has_pending() {
            return;
        }
        let text = &self.path[self.last_index..self.index];
        let node = match text.strip_suffix("()") {
            Some(name) => Node::Fn(name.to_string()),
            None => Node::Property(Key::Name(text.to_string())),
        };
        self.emit(node);
    }

    /// Marks everything before the cursor as consumed.
    fn commit(&mut self) {
        self.last_index = self.index;
    }

    /// Handles a one-character token that stands for `node` on its own.
    fn single(&mut self, node: Node) -> Result<(), JPathError> {
        self.flush();
        self.emit(node);
        self.index += 1;
        self.commit();
        Ok(())
    }
}

fn dot(scanner: &mut Scanner<'_>) -> Result<(), JPathError> {
    scanner.flush();
    match scanner.peek(1) {
        Some(b'.') => {
            scanner.emit(Node::RecursiveDescent);
            scanner.index += 1;
        }
        None => {
            return Err(JPathError::IncompletePath {
                position: scanner.index,
            });
        }
        Some(_) => {}
    }
    scanner.index += 1;
    if scanner.peek(0) == Some(b'.') {
        return Err(JPathError::TripleDot {
            position: scanner.index,
        });
    }
    scanner.commit();
    Ok(())
}

fn subscript(scanner: &mut Scanner<'_>) -> Result<(), JPathError> {
    scanner.flush();
    let open = scanner.index;
    let close = find_closing_bracket(scanner.path, open)?;
    let node = classify(&scanner.path[open + 1..close], open)?;
    scanner.emit(node);
    scanner.index = close + 1;
    scanner.commit();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nodes(path: &str) -> Vec<Node> {
        normalize(path).expect("path should normalize").into_nodes()
    }

    #[test]
    fn test_dotted_properties() {
        assert_eq!(
            nodes("$.store.book"),
            vec![Node::Root, Node::property("store"), Node::property("book")]
        );
        assert_eq!(nodes("store"), vec![Node::property("store")]);
        assert_eq!(nodes(""), Vec::<Node>::new());
    }

    #[test]
    fn test_dollar_is_root_only_at_the_start() {
        assert_eq!(nodes("$"), vec![Node::Root]);
        assert_eq!(nodes("a$a"), vec![Node::property("a$a")]);
        assert_eq!(
            nodes("$.$.@"),
            vec![Node::Root, Node::property("$"), Node::property("@")]
        );
        assert_eq!(
            nodes("$['a']"),
            vec![Node::property("$"), Node::property("a")]
        );
    }

    #[test]
    fn test_star_inside_name_is_text() {
        assert_eq!(nodes("$.a*b"), vec![Node::Root, Node::property("a*b")]);
        assert_eq!(nodes("$.*"), vec![Node::Root, Node::Wildcard]);
    }

    #[test]
    fn test_caret_always_splits() {
        assert_eq!(
            nodes("$.a^"),
            vec![Node::Root, Node::property("a"), Node::Parent]
        );
        assert_eq!(
            nodes("a^b"),
            vec![Node::property("a"), Node::Parent, Node::property("b")]
        );
    }

    #[test]
    fn test_function_suffix() {
        assert_eq!(
            nodes("$.a.length()"),
            vec![Node::Root, Node::property("a"), Node::Fn("length".to_string())]
        );
        assert_eq!(
            nodes("$.a.length().b"),
            vec![
                Node::Root,
                Node::property("a"),
                Node::Fn("length".to_string()),
                Node::property("b")
            ]
        );
    }

    #[test]
    fn test_trailing_recursive_descent_is_allowed() {
        assert_eq!(nodes("$.."), vec![Node::Root, Node::RecursiveDescent]);
    }

    #[test]
    fn test_dot_errors_carry_positions() {
        assert_eq!(
            normalize("$.a."),
            Err(JPathError::IncompletePath { position: 3 })
        );
        assert_eq!(normalize("$...a"), Err(JPathError::TripleDot { position: 3 }));
        assert_eq!(normalize("$.a..."), Err(JPathError::TripleDot { position: 5 }));
        assert_eq!(
            normalize("$.a[0][]"),
            Err(JPathError::EmptySubscript { position: 6 })
        );
    }

    #[test]
    fn test_non_ascii_names() {
        assert_eq!(
            nodes("$.café.naïve[*]"),
            vec![
                Node::Root,
                Node::property("café"),
                Node::property("naïve"),
                Node::Wildcard
            ]
        );
    }
}
