use thiserror::Error;

/// Every way a path expression can be rejected. Positions are byte offsets
/// into the expression passed to [`crate::normalize`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JPathError {
    #[error("Empty subscript at offset {position}.")]
    EmptySubscript { position: usize },

    #[error("Incomplete path: expression ends with \".\" at offset {position}.")]
    IncompletePath { position: usize },

    #[error("Invalid syntax \"...\" at offset {position}.")]
    TripleDot { position: usize },

    #[error("Subscript starts with \"(\" but does not end with \")\": {0}")]
    UnmatchedScript(String),

    #[error("Subscript starts with \"?(\" but does not end with \")\": {0}")]
    UnmatchedFilter(String),

    #[error("Subscript starts with \"?\" but the second character is not \"(\": {0}")]
    MalformedFilterPrefix(String),

    #[error("Closing bracket \"]\" not found for \"[\" at offset {position}.")]
    UnmatchedBracket { position: usize },

    #[error("Unmatched quote {quote} at offset {position}.")]
    UnmatchedQuote { quote: char, position: usize },

    #[error("Invalid character \"{character}\" in {subscript}.")]
    InvalidCharacter { character: char, subscript: String },

    #[error("Invalid subscript: {0}")]
    InvalidSubscript(String),
}

impl JPathError {
    /// Stable machine-readable code for the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptySubscript { .. } => "subscript.empty",
            Self::IncompletePath { .. } => "path.incomplete",
            Self::TripleDot { .. } => "path.triple_dot",
            Self::UnmatchedScript(_) => "subscript.unmatched_script",
            Self::UnmatchedFilter(_) => "subscript.unmatched_filter",
            Self::MalformedFilterPrefix(_) => "subscript.malformed_filter",
            Self::UnmatchedBracket { .. } => "subscript.unmatched_bracket",
            Self::UnmatchedQuote { quote: '\'', .. } => "subscript.unmatched_single_quote",
            Self::UnmatchedQuote { .. } => "subscript.unmatched_double_quote",
            Self::InvalidCharacter { .. } => "subscript.invalid_char",
            Self::InvalidSubscript(_) => "subscript.invalid",
        }
    }
}
