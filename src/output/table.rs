//! Human-readable table renderer.
//!
//! Comment listings become box-drawn tables, one per author group. Threads
//! render as a status header followed by indented comments. Long bodies and
//! paths are shortened here and nowhere else.

use std::io::Write;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::github::ReviewError;

use super::model::{CommentGroup, CommentsResult, ReviewResult, ViewResult};
use super::style::Style;
use super::{io_error, single_line};

const BODY_PREVIEW_WIDTH: usize = 40;
const PATH_WIDTH: usize = 20;
const PATH_TAIL_WIDTH: usize = 17;
const THREAD_BODY_WIDTH: usize = 60;
const THREAD_BODY_WIDTH_WITH_IDS: usize = 50;
const ELLIPSIS: &str = "...";
const GLOBAL_LOCATION: &str = "(global)";

/// Writes `result` as styled or unstyled tables and status lines.
///
/// # Errors
///
/// Returns [`ReviewError::Io`] when writing fails.
pub fn write_table<W: Write>(
    writer: &mut W,
    result: &ReviewResult,
    style: Style,
) -> Result<(), ReviewError> {
    match result {
        ReviewResult::Comments(comments) => write_comments(writer, comments, style),
        ReviewResult::View(view) => write_view(writer, view, style),
        ReviewResult::Added { path, line } => {
            success_line(writer, style, &format!("✓ Added comment at {path}:{line}"))
        }
        ReviewResult::Edited { comment_id } => {
            success_line(writer, style, &format!("✓ Updated comment {comment_id}"))
        }
        ReviewResult::Deleted { comment_id } => {
            success_line(writer, style, &format!("✓ Deleted comment {comment_id}"))
        }
        ReviewResult::Submitted { verdict } => {
            success_line(writer, style, &format!("✓ Submitted review ({verdict})"))
        }
        ReviewResult::Discarded { review_id } => success_line(
            writer,
            style,
            &format!("✓ Discarded pending review {review_id}"),
        ),
        ReviewResult::NoOp { message } => {
            writeln!(writer, "{}", style.dim(message)).map_err(|e| io_error(&e))
        }
    }
}

fn success_line<W: Write>(writer: &mut W, style: Style, message: &str) -> Result<(), ReviewError> {
    writeln!(writer, "{}", style.success(message)).map_err(|e| io_error(&e))
}

fn write_comments<W: Write>(
    writer: &mut W,
    result: &CommentsResult,
    style: Style,
) -> Result<(), ReviewError> {
    for (index, group) in result.groups.iter().enumerate() {
        if index > 0 {
            writeln!(writer).map_err(|e| io_error(&e))?;
        }
        if let Some(author) = &group.author {
            let header = format!("@{author} ({} comments)", group.comments.len());
            writeln!(writer, "{}", style.author(&header)).map_err(|e| io_error(&e))?;
        }
        let table = group_table(group, result.include_ids);
        write!(writer, "{}", table.render(style)).map_err(|e| io_error(&e))?;
    }
    Ok(())
}

fn group_table(group: &CommentGroup, include_ids: bool) -> Table {
    let flat = group.author.is_none();
    let mut headers = Vec::new();
    if include_ids {
        headers.push("ID".to_owned());
    }
    headers.extend(["State", "Location", "Body"].map(str::to_owned));
    if flat {
        headers.push("Author".to_owned());
    }

    let rows = group
        .comments
        .iter()
        .map(|comment| {
            let mut row = Vec::with_capacity(headers.len());
            if include_ids {
                row.push(comment.id.clone());
            }
            row.push(comment.state.to_string());
            row.push(table_location(&comment.path, comment.line));
            row.push(truncate_with_ellipsis(
                &single_line(&comment.body),
                BODY_PREVIEW_WIDTH,
            ));
            if flat {
                row.push(comment.author.clone());
            }
            row
        })
        .collect();

    Table { headers, rows }
}

fn table_location(path: &str, line: u32) -> String {
    if path.is_empty() {
        return GLOBAL_LOCATION.to_owned();
    }
    let short = shorten_path(path);
    if line > 0 {
        format!("{short}:{line}")
    } else {
        short
    }
}

fn write_view<W: Write>(
    writer: &mut W,
    result: &ViewResult,
    style: Style,
) -> Result<(), ReviewError> {
    for (index, thread) in result.threads.iter().enumerate() {
        if index > 0 {
            writeln!(writer).map_err(|e| io_error(&e))?;
        }
        let mut header = format!("[{}] {}", thread.status(), thread.location());
        if result.include_ids {
            header.push_str(&format!(" ({})", thread.id));
        }
        let painted = if thread.resolved {
            style.dim(&header)
        } else {
            style.author(&header)
        };
        writeln!(writer, "{painted}").map_err(|e| io_error(&e))?;

        for comment in &thread.comments {
            let body = single_line(&comment.body);
            let line = if result.include_ids {
                format!(
                    "  [{}] @{}: {}",
                    comment.id,
                    comment.author,
                    truncate_with_ellipsis(&body, THREAD_BODY_WIDTH_WITH_IDS)
                )
            } else {
                format!(
                    "  @{}: {}",
                    comment.author,
                    truncate_with_ellipsis(&body, THREAD_BODY_WIDTH)
                )
            };
            writeln!(writer, "{line}").map_err(|e| io_error(&e))?;
        }
    }
    Ok(())
}

/// Keeps at most `max_width` columns and appends `...` when anything was cut.
fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_owned();
    }
    let mut kept = String::new();
    let mut width = 0;
    for ch in text.chars() {
        let char_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if width + char_width > max_width {
            break;
        }
        kept.push(ch);
        width += char_width;
    }
    format!("{kept}{ELLIPSIS}")
}

/// Shortens long paths to `...` plus their trailing columns.
fn shorten_path(path: &str) -> String {
    if path.width() <= PATH_WIDTH {
        return path.to_owned();
    }
    let mut tail: Vec<char> = Vec::new();
    let mut width = 0;
    for ch in path.chars().rev() {
        let char_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if width + char_width > PATH_TAIL_WIDTH {
            break;
        }
        tail.push(ch);
        width += char_width;
    }
    let suffix: String = tail.into_iter().rev().collect();
    format!("{ELLIPSIS}{suffix}")
}

struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    fn column_widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|cell| cell.width()).collect();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.width());
            }
        }
        widths
    }

    fn render(&self, style: Style) -> String {
        let widths = self.column_widths();
        let rule = |left: &str, join: &str, right: &str| {
            let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
            style.border(&format!("{left}{}{right}", segments.join(join)))
        };
        let bar = style.border("│");

        let mut out = String::new();
        out.push_str(&rule("┌", "┬", "┐"));
        out.push('\n');
        out.push_str(&render_row(&self.headers, &widths, &bar, |cell| {
            style.header(cell)
        }));
        out.push_str(&rule("├", "┼", "┤"));
        out.push('\n');
        let mut even = true;
        for row in &self.rows {
            out.push_str(&render_row(row, &widths, &bar, |cell| style.row(cell, even)));
            even = !even;
        }
        out.push_str(&rule("└", "┴", "┘"));
        out.push('\n');
        out
    }
}

fn render_row(
    cells: &[String],
    widths: &[usize],
    bar: &str,
    paint: impl Fn(&str) -> String,
) -> String {
    let mut line = String::from(bar);
    for (cell, width) in cells.iter().zip(widths) {
        let padding = " ".repeat(width.saturating_sub(cell.width()));
        line.push_str(&paint(&format!(" {cell}{padding} ")));
        line.push_str(bar);
    }
    line.push('\n');
    line
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{shorten_path, truncate_with_ellipsis, write_table};
    use crate::github::CommentState;
    use crate::output::model::{
        Comment, CommentGroup, CommentsResult, ReviewResult, ViewComment, ViewResult, ViewThread,
    };
    use crate::output::style::Style;

    fn render(result: &ReviewResult) -> String {
        let mut buffer = Vec::new();
        write_table(&mut buffer, result, Style::plain()).expect("table should render");
        String::from_utf8(buffer).expect("table should be UTF-8")
    }

    fn comment(path: &str, body: &str) -> Comment {
        Comment {
            id: "PRRC_1".to_owned(),
            path: path.to_owned(),
            line: 12,
            body: body.to_owned(),
            state: CommentState::Pending,
            author: "alice".to_owned(),
        }
    }

    fn thread(resolved: bool) -> ViewThread {
        ViewThread {
            id: "PRRT_9".to_owned(),
            path: "src/lib.rs".to_owned(),
            line: 4,
            resolved,
            comments: vec![ViewComment {
                id: "PRRC_3".to_owned(),
                author: "bob".to_owned(),
                body: "first line\nsecond line".to_owned(),
            }],
        }
    }

    #[rstest]
    fn grouped_comments_show_author_header_and_columns() {
        let output = render(&ReviewResult::Comments(CommentsResult {
            pr: "octo/cat#1".to_owned(),
            groups: vec![CommentGroup {
                author: Some("alice".to_owned()),
                comments: vec![comment("src/lib.rs", "Use a guard")],
            }],
            include_ids: false,
        }));

        assert!(output.starts_with("@alice (1 comments)\n┌"), "{output}");
        assert!(output.contains("│ State   │ Location "), "{output}");
        assert!(output.contains("│ pending │ src/lib.rs:12 │"), "{output}");
        assert!(!output.contains("PRRC_1"));
        assert!(!output.contains("Author"));
    }

    #[rstest]
    fn flat_comments_add_author_column_and_ids() {
        let output = render(&ReviewResult::Comments(CommentsResult {
            pr: "octo/cat#1".to_owned(),
            groups: vec![CommentGroup {
                author: None,
                comments: vec![comment("", "Looks fine")],
            }],
            include_ids: true,
        }));

        assert!(output.starts_with('┌'), "{output}");
        assert!(output.contains("│ ID "), "{output}");
        assert!(output.contains("PRRC_1"));
        assert!(output.contains("(global)"));
        assert!(output.contains("│ Author │"), "{output}");
    }

    #[rstest]
    fn long_bodies_are_previewed() {
        let body = "x".repeat(50);
        let output = render(&ReviewResult::Comments(CommentsResult {
            pr: String::new(),
            groups: vec![CommentGroup {
                author: None,
                comments: vec![comment("a.rs", &body)],
            }],
            include_ids: false,
        }));

        assert!(output.contains(&format!("{}...", "x".repeat(40))));
        assert!(!output.contains(&"x".repeat(41)));
    }

    #[rstest]
    fn unresolved_threads_are_marked_distinctly() {
        let output = render(&ReviewResult::View(ViewResult {
            pr: "octo/cat#1".to_owned(),
            threads: vec![thread(false), thread(true)],
            include_ids: false,
        }));

        assert_eq!(
            output,
            "[unresolved] src/lib.rs:4\n  @bob: first line second line\n\n\
             [resolved] src/lib.rs:4\n  @bob: first line second line\n"
        );
    }

    #[rstest]
    fn view_with_ids_shows_thread_and_comment_ids() {
        let output = render(&ReviewResult::View(ViewResult {
            pr: String::new(),
            threads: vec![thread(false)],
            include_ids: true,
        }));

        assert!(output.starts_with("[unresolved] src/lib.rs:4 (PRRT_9)\n"));
        assert!(output.contains("  [PRRC_3] @bob: "));
    }

    #[rstest]
    #[case(ReviewResult::Added { path: "a.rs".to_owned(), line: 3 }, "✓ Added comment at a.rs:3\n")]
    #[case(ReviewResult::Edited { comment_id: "PRRC_1".to_owned() }, "✓ Updated comment PRRC_1\n")]
    #[case(ReviewResult::Deleted { comment_id: "PRRC_1".to_owned() }, "✓ Deleted comment PRRC_1\n")]
    #[case(ReviewResult::Submitted { verdict: "approve".to_owned() }, "✓ Submitted review (approve)\n")]
    #[case(ReviewResult::Discarded { review_id: "PRR_1".to_owned() }, "✓ Discarded pending review PRR_1\n")]
    #[case(ReviewResult::NoOp { message: "nothing to do".to_owned() }, "nothing to do\n")]
    fn action_results_render_status_lines(#[case] result: ReviewResult, #[case] expected: &str) {
        assert_eq!(render(&result), expected);
    }

    #[rstest]
    fn styled_success_is_coloured() {
        let mut buffer = Vec::new();
        write_table(
            &mut buffer,
            &ReviewResult::Edited {
                comment_id: "PRRC_1".to_owned(),
            },
            Style::styled(),
        )
        .expect("table should render");

        let output = String::from_utf8(buffer).expect("output should be UTF-8");
        assert!(output.contains("\u{1b}["));
    }

    #[rstest]
    #[case("short", 10, "short")]
    #[case("abcdefghij", 4, "abcd...")]
    #[case("你好世界", 5, "你好...")]
    fn truncation_counts_columns(#[case] text: &str, #[case] width: usize, #[case] expected: &str) {
        assert_eq!(truncate_with_ellipsis(text, width), expected);
    }

    #[rstest]
    #[case("src/lib.rs", "src/lib.rs")]
    #[case("crates/core/src/deeply/nested.rs", ".../deeply/nested.rs")]
    fn long_paths_keep_their_tail(#[case] path: &str, #[case] expected: &str) {
        assert_eq!(shorten_path(path), expected);
    }
}
