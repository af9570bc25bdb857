//! Local precondition checks run before any request is sent.

use crate::github::error::ReviewError;

/// Node kinds whose identifiers carry a well-known prefix.
#[derive(Debug, Clone, Copy)]
pub(super) enum NodeKind {
    Review,
    Comment,
}

impl NodeKind {
    const fn prefix(self) -> &'static str {
        match self {
            Self::Review => "PRR_",
            Self::Comment => "PRRC_",
        }
    }

    const fn label(self) -> &'static str {
        match self {
            Self::Review => "review",
            Self::Comment => "comment",
        }
    }
}

/// Returns the trimmed value, or a validation error naming `field`.
pub(super) fn required<'a>(value: &'a str, field: &str) -> Result<&'a str, ReviewError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ReviewError::Validation {
            message: format!("{field} required"),
        });
    }
    Ok(trimmed)
}

/// Checks presence and the prefix convention of a node identifier.
pub(super) fn node_id(value: &str, kind: NodeKind) -> Result<&str, ReviewError> {
    let trimmed = required(value, &format!("{} ID", kind.label()))?;
    if !trimmed.starts_with(kind.prefix()) {
        return Err(ReviewError::Validation {
            message: format!(
                "invalid {} ID {trimmed:?}: expected GraphQL node ID",
                kind.label()
            ),
        });
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{NodeKind, node_id, required};
    use crate::github::error::ReviewError;

    #[rstest]
    fn required_trims() {
        assert_eq!(required("  body  ", "body"), Ok("body"));
    }

    #[rstest]
    #[case("", NodeKind::Review, "review ID required")]
    #[case("  ", NodeKind::Comment, "comment ID required")]
    #[case("PRRC_1", NodeKind::Review, "invalid review ID \"PRRC_1\": expected GraphQL node ID")]
    #[case("PRR_1", NodeKind::Comment, "invalid comment ID \"PRR_1\": expected GraphQL node ID")]
    #[case("12345", NodeKind::Comment, "invalid comment ID \"12345\": expected GraphQL node ID")]
    fn node_id_rejects_malformed(
        #[case] value: &str,
        #[case] kind: NodeKind,
        #[case] expected: &str,
    ) {
        assert_eq!(
            node_id(value, kind),
            Err(ReviewError::Validation {
                message: expected.to_owned(),
            })
        );
    }

    #[rstest]
    #[case(" PRR_kw123 ", NodeKind::Review, "PRR_kw123")]
    #[case("PRRC_abc", NodeKind::Comment, "PRRC_abc")]
    fn node_id_accepts_prefixed(
        #[case] value: &str,
        #[case] kind: NodeKind,
        #[case] expected: &str,
    ) {
        assert_eq!(node_id(value, kind), Ok(expected));
    }
}
