//! Filtering, tail limiting, and author grouping for listed comments.
//!
//! The pipeline runs in a fixed order: [`CommentFilter::apply`], then
//! [`tail`], then [`Grouping::group`]. Each step is a pure function over the
//! comments it is handed.

use std::collections::BTreeMap;

use crate::output::{Comment, CommentGroup};

/// Criteria a comment must satisfy to be listed.
///
/// Requested states are OR-ed together; the state and author predicates are
/// AND-ed. Both comparisons ignore ASCII case.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentFilter {
    /// Accepted state names; empty accepts every state.
    pub states: Vec<String>,
    /// Required author login; `None` or blank accepts every author.
    pub author: Option<String>,
}

impl CommentFilter {
    /// Builds a filter from raw flag values, dropping blank entries.
    #[must_use]
    pub fn new(states: &[String], author: Option<&str>) -> Self {
        Self {
            states: states
                .iter()
                .map(|state| state.trim())
                .filter(|state| !state.is_empty())
                .map(str::to_owned)
                .collect(),
            author: author
                .map(str::trim)
                .filter(|login| !login.is_empty())
                .map(str::to_owned),
        }
    }

    /// Returns `true` when `comment` satisfies every criterion.
    #[must_use]
    pub fn matches(&self, comment: &Comment) -> bool {
        self.matches_state(comment) && self.matches_author(comment)
    }

    fn matches_state(&self, comment: &Comment) -> bool {
        self.states.is_empty()
            || self
                .states
                .iter()
                .any(|state| state.eq_ignore_ascii_case(comment.state.as_str()))
    }

    fn matches_author(&self, comment: &Comment) -> bool {
        self.author
            .as_deref()
            .is_none_or(|login| login.eq_ignore_ascii_case(&comment.author))
    }

    /// Keeps the comments that match, preserving their order.
    #[must_use]
    pub fn apply(&self, comments: Vec<Comment>) -> Vec<Comment> {
        comments
            .into_iter()
            .filter(|comment| self.matches(comment))
            .collect()
    }
}

/// Keeps the last `count` comments; `None` or zero keeps everything.
#[must_use]
pub fn tail(mut comments: Vec<Comment>, count: Option<usize>) -> Vec<Comment> {
    match count {
        Some(limit) if limit > 0 && comments.len() > limit => {
            comments.split_off(comments.len() - limit)
        }
        _ => comments,
    }
}

/// How listed comments are partitioned for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grouping {
    /// One labelled group per author, authors in ascending order.
    ByAuthor,
    /// A single unlabelled group in source order.
    Flat,
}

impl Grouping {
    /// Selects flat output when `flat` is set.
    #[must_use]
    pub const fn from_flat(flat: bool) -> Self {
        if flat { Self::Flat } else { Self::ByAuthor }
    }

    /// Partitions `comments` into render groups.
    ///
    /// Flat mode always yields exactly one group, even for an empty list.
    /// Comments without an author are gathered in an unlabelled group, which
    /// sorts first.
    #[must_use]
    pub fn group(self, comments: Vec<Comment>) -> Vec<CommentGroup> {
        match self {
            Self::Flat => vec![CommentGroup {
                author: None,
                comments,
            }],
            Self::ByAuthor => {
                let mut by_author: BTreeMap<String, Vec<Comment>> = BTreeMap::new();
                for comment in comments {
                    by_author
                        .entry(comment.author.clone())
                        .or_default()
                        .push(comment);
                }
                by_author
                    .into_iter()
                    .map(|(author, grouped)| CommentGroup {
                        author: (!author.is_empty()).then_some(author),
                        comments: grouped,
                    })
                    .collect()
            }
        }
    }
}
