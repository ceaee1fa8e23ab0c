//! Turns the text between a matched `[` `]` pair into a single node.
use crate::ast::Node;
use crate::error::JPathError;
use crate::grammar;
use once_cell::sync::Lazy;
use std::collections::HashMap;

struct SubscriptRule {
    accepts: fn(&str) -> bool,
    build: fn(&str) -> Result<Node, JPathError>,
}

/// Subscript forms recognized by their leading byte. Anything not claimed
/// here is expanded as a comma-separated list.
static SUBSCRIPT_RULES: Lazy<HashMap<u8, SubscriptRule>> = Lazy::new(|| {
    HashMap::from([
        (
            b'$',
            SubscriptRule {
                accepts: |subscript| subscript.starts_with("$."),
                build: |subscript| Ok(Node::Subpath(subscript.to_string())),
            },
        ),
        (
            b'?',
            SubscriptRule {
                accepts: |_| true,
                build: filter_script,
            },
        ),
        (
            b'(',
            SubscriptRule {
                accepts: |_| true,
                build: script,
            },
        ),
        (
            b'*',
            SubscriptRule {
                accepts: |subscript| subscript == "*",
                build: |_| Ok(Node::Wildcard),
            },
        ),
    ])
});

/// Classifies the text of the subscript whose `[` sits at byte offset `open`.
pub(crate) fn classify(subscript: &str, open: usize) -> Result<Node, JPathError> {
    let Some(lead) = subscript.as_bytes().first() else {
        return Err(JPathError::EmptySubscript { position: open });
    };
    if let Some(rule) = SUBSCRIPT_RULES.get(lead)
        && (rule.accepts)(subscript)
    {
        return (rule.build)(subscript);
    }
    selection_list(subscript)
}

fn filter_script(subscript: &str) -> Result<Node, JPathError> {
    let Some(body) = subscript.strip_prefix("?(") else {
        return Err(JPathError::MalformedFilterPrefix(subscript.to_string()));
    };
    let Some(code) = body.strip_suffix(')') else {
        return Err(JPathError::UnmatchedFilter(subscript.to_string()));
    };
    Ok(Node::FilterScript(code.to_string()))
}

fn script(subscript: &str) -> Result<Node, JPathError> {
    match subscript.strip_prefix('(').and_then(|body| body.strip_suffix(')')) {
        Some(code) => Ok(Node::Script(code.to_string())),
        None => Err(JPathError::UnmatchedScript(subscript.to_string())),
    }
}

/// A lone name or index collapses to `Property`; ranges and unions stay
/// wrapped in `Properties`.
fn selection_list(subscript: &str) -> Result<Node, JPathError> {
    let Some(selections) = grammar::expand_list(subscript)? else {
        return Err(JPathError::InvalidSubscript(subscript.to_string()));
    };
    let node = match <[_; 1]>::try_from(selections) {
        Ok([single]) => match single.into_key() {
            Ok(key) => Node::Property(key),
            Err(range) => Node::Properties(vec![range]),
        },
        Err(selections) => Node::Properties(selections),
    };
    Ok(node)
}
