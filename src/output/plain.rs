//! Tab-separated renderer for scripts.
//!
//! One line per comment or thread comment, fields in a fixed order, nothing
//! truncated. Embedded newlines are folded to spaces so each record stays on
//! one line.

use std::io::Write;

use crate::github::ReviewError;

use super::model::{CommentsResult, ReviewResult, ViewResult};
use super::{io_error, single_line};

/// Writes `result` as tab-separated records.
///
/// # Errors
///
/// Returns [`ReviewError::Io`] when writing fails.
pub fn write_plain<W: Write>(writer: &mut W, result: &ReviewResult) -> Result<(), ReviewError> {
    let line = match result {
        ReviewResult::Comments(comments) => return write_comments(writer, comments),
        ReviewResult::View(view) => return write_view(writer, view),
        ReviewResult::Added { path, line } => format!("added\t{path}\t{line}"),
        ReviewResult::Edited { comment_id } => format!("edited\t{comment_id}"),
        ReviewResult::Deleted { comment_id } => format!("deleted\t{comment_id}"),
        ReviewResult::Submitted { verdict } => format!("submitted\t{verdict}"),
        ReviewResult::Discarded { review_id } => format!("discarded\t{review_id}"),
        ReviewResult::NoOp { message } => format!("noop\t{message}"),
    };
    writeln!(writer, "{line}").map_err(|e| io_error(&e))
}

fn write_comments<W: Write>(writer: &mut W, result: &CommentsResult) -> Result<(), ReviewError> {
    for group in &result.groups {
        if let Some(author) = &group.author {
            writeln!(writer, "@{author}").map_err(|e| io_error(&e))?;
        }
        let indent = if group.author.is_some() { "\t" } else { "" };
        for comment in &group.comments {
            let mut fields = vec![comment.state.to_string()];
            if result.include_ids {
                fields.push(comment.id.clone());
            }
            if let Some(location) = comment.location() {
                fields.push(location);
            }
            fields.push(single_line(&comment.body));
            if group.author.is_none() && !comment.author.is_empty() {
                fields.push(comment.author.clone());
            }
            writeln!(writer, "{indent}{}", fields.join("\t")).map_err(|e| io_error(&e))?;
        }
    }
    Ok(())
}

fn write_view<W: Write>(writer: &mut W, result: &ViewResult) -> Result<(), ReviewError> {
    for thread in &result.threads {
        let header = if result.include_ids {
            format!("{}\t{}\t{}", thread.id, thread.status(), thread.location())
        } else {
            format!("{}\t{}", thread.status(), thread.location())
        };
        writeln!(writer, "{header}").map_err(|e| io_error(&e))?;

        for comment in &thread.comments {
            let body = single_line(&comment.body);
            let row = if result.include_ids {
                format!("\t{}\t{}\t{body}", comment.id, comment.author)
            } else {
                format!("\t{}\t{body}", comment.author)
            };
            writeln!(writer, "{row}").map_err(|e| io_error(&e))?;
        }
    }
    Ok(())
}
