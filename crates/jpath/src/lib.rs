//! JSONPath expression normalizer.
//!
//! [`normalize`] compiles a JSONPath-style expression such as
//! `$..book[?(@.isbn)].title` into the ordered [`Node`] sequence a
//! tree-walking evaluator applies left to right. Script, filter and subpath
//! payloads are delimited and handed over verbatim; evaluating them is the
//! evaluator's business.

pub mod ast;
pub mod error;
mod grammar;
mod matcher;
mod parser;
mod subscript;

// --- Public API ---
pub use ast::{Key, Node, NormalizedPath, Range, Selection};
pub use error::JPathError;
pub use parser::normalize;
