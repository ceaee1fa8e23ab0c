//! JSONPath normalizer: the `pathnorm-jpath` library plus the reporting
//! layer behind the `pathnorm` binary.

pub mod cli;
pub mod error;

pub use cli::{Cli, OutputFormat, Report, run};
pub use error::CliError;
pub use pathnorm_jpath::{JPathError, Key, Node, NormalizedPath, Range, Selection, normalize};
