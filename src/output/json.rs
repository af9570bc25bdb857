//! JSON renderer.
//!
//! Each invocation writes one pretty-printed document followed by a newline.
//! Empty identifiers, paths and zero lines are omitted rather than emitted as
//! `null`, and bodies are written verbatim.

use std::io::Write;

use serde::Serialize;

use crate::github::{CommentState, ReviewError};

use super::io_error;
use super::model::{CommentsResult, ReviewResult, ViewResult};

#[derive(Debug, Serialize)]
struct JsonComments<'a> {
    pr: &'a str,
    groups: Vec<JsonGroup<'a>>,
}

#[derive(Debug, Serialize)]
struct JsonGroup<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    author: Option<&'a str>,
    comments: Vec<JsonComment<'a>>,
}

#[derive(Debug, Serialize)]
struct JsonComment<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a str>,
    state: CommentState,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    line: Option<u32>,
    body: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    author: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct JsonView<'a> {
    pr: &'a str,
    threads: Vec<JsonThread<'a>>,
}

#[derive(Debug, Serialize)]
struct JsonThread<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a str>,
    path: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    line: Option<u32>,
    resolved: bool,
    comments: Vec<JsonThreadComment<'a>>,
}

#[derive(Debug, Serialize)]
struct JsonThreadComment<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a str>,
    author: &'a str,
    body: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
enum JsonAction<'a> {
    Added { path: &'a str, line: u32 },
    Edited { comment_id: &'a str },
    Deleted { comment_id: &'a str },
    Submitted { verdict: &'a str },
    Discarded { review_id: &'a str },
    Noop { message: &'a str },
}

fn non_empty(value: &str) -> Option<&str> {
    (!value.is_empty()).then_some(value)
}

const fn non_zero(line: u32) -> Option<u32> {
    if line > 0 { Some(line) } else { None }
}

fn visible_id(id: &str, include_ids: bool) -> Option<&str> {
    if include_ids { non_empty(id) } else { None }
}

fn comments_document(result: &CommentsResult) -> JsonComments<'_> {
    JsonComments {
        pr: &result.pr,
        groups: result
            .groups
            .iter()
            .map(|group| JsonGroup {
                author: group.author.as_deref().and_then(non_empty),
                comments: group
                    .comments
                    .iter()
                    .map(|comment| JsonComment {
                        id: visible_id(&comment.id, result.include_ids),
                        state: comment.state,
                        path: non_empty(&comment.path),
                        line: non_zero(comment.line),
                        body: &comment.body,
                        author: group
                            .author
                            .is_none()
                            .then(|| non_empty(&comment.author))
                            .flatten(),
                    })
                    .collect(),
            })
            .collect(),
    }
}

fn view_document(result: &ViewResult) -> JsonView<'_> {
    JsonView {
        pr: &result.pr,
        threads: result
            .threads
            .iter()
            .map(|thread| JsonThread {
                id: visible_id(&thread.id, result.include_ids),
                path: &thread.path,
                line: non_zero(thread.line),
                resolved: thread.resolved,
                comments: thread
                    .comments
                    .iter()
                    .map(|comment| JsonThreadComment {
                        id: visible_id(&comment.id, result.include_ids),
                        author: &comment.author,
                        body: &comment.body,
                    })
                    .collect(),
            })
            .collect(),
    }
}

fn write_document<W: Write, T: Serialize>(writer: &mut W, document: &T) -> Result<(), ReviewError> {
    serde_json::to_writer_pretty(&mut *writer, document).map_err(|e| ReviewError::Io {
        message: format!("JSON serialization failed: {e}"),
    })?;
    writeln!(writer).map_err(|e| io_error(&e))
}

/// Writes `result` as a single JSON document.
///
/// # Errors
///
/// Returns [`ReviewError::Io`] when serialization or writing fails.
pub fn write_json<W: Write>(writer: &mut W, result: &ReviewResult) -> Result<(), ReviewError> {
    match result {
        ReviewResult::Comments(comments) => write_document(writer, &comments_document(comments)),
        ReviewResult::View(view) => write_document(writer, &view_document(view)),
        ReviewResult::Added { path, line } => write_document(
            writer,
            &JsonAction::Added {
                path,
                line: *line,
            },
        ),
        ReviewResult::Edited { comment_id } => {
            write_document(writer, &JsonAction::Edited { comment_id })
        }
        ReviewResult::Deleted { comment_id } => {
            write_document(writer, &JsonAction::Deleted { comment_id })
        }
        ReviewResult::Submitted { verdict } => {
            write_document(writer, &JsonAction::Submitted { verdict })
        }
        ReviewResult::Discarded { review_id } => {
            write_document(writer, &JsonAction::Discarded { review_id })
        }
        ReviewResult::NoOp { message } => write_document(writer, &JsonAction::Noop { message }),
    }
}
