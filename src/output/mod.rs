//! Rendering of command results.
//!
//! Three interchangeable renderers share one closed set of result records:
//!
//! - `table`: box-drawn tables and status lines, styled on terminals
//! - `plain`: tab-separated records for scripts
//! - `json`: one pretty-printed document per invocation

mod json;
mod model;
mod plain;
mod style;
mod table;

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use crate::github::ReviewError;

pub use json::write_json;
pub use model::{
    Comment, CommentGroup, CommentsResult, ReviewResult, ViewComment, ViewResult, ViewThread,
};
pub use plain::write_plain;
pub use style::{Style, color_enabled};
pub use table::write_table;

/// Supported output formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable tables.
    #[default]
    Table,
    /// Tab-separated values.
    Plain,
    /// A JSON document.
    Json,
}

impl FromStr for OutputFormat {
    type Err = ReviewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "plain" => Ok(Self::Plain),
            "json" => Ok(Self::Json),
            _ => Err(ReviewError::UnsupportedFormat {
                format: s.to_owned(),
            }),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Table => write!(f, "table"),
            Self::Plain => write!(f, "plain"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Renders `result` in `format`; `style` only affects tables.
///
/// # Errors
///
/// Returns [`ReviewError::Io`] when writing fails.
pub fn render<W: Write>(
    writer: &mut W,
    result: &ReviewResult,
    format: OutputFormat,
    style: Style,
) -> Result<(), ReviewError> {
    match format {
        OutputFormat::Table => write_table(writer, result, style),
        OutputFormat::Plain => write_plain(writer, result),
        OutputFormat::Json => write_json(writer, result),
    }
}

/// Folds line breaks and tabs into single spaces.
fn single_line(text: &str) -> String {
    text.replace("\r\n", " ").replace(['\n', '\t'], " ")
}

fn io_error(error: &std::io::Error) -> ReviewError {
    ReviewError::Io {
        message: error.to_string(),
    }
}
