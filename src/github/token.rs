//! Personal access token wrapper.

use super::error::ReviewError;

/// Personal access token wrapper enforcing presence.
#[derive(Clone, PartialEq, Eq)]
pub struct PersonalAccessToken(String);

impl PersonalAccessToken {
    /// Validates that the token is non-empty and trims whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::MissingToken`] when the supplied string is blank.
    pub fn new(token: impl AsRef<str>) -> Result<Self, ReviewError> {
        let trimmed = token.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ReviewError::MissingToken);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the token value.
    #[must_use]
    pub const fn value(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for PersonalAccessToken {
    fn as_ref(&self) -> &str {
        self.value()
    }
}

impl std::fmt::Debug for PersonalAccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PersonalAccessToken(***)")
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::PersonalAccessToken;
    use crate::github::error::ReviewError;

    #[rstest]
    fn trims_surrounding_whitespace() {
        let token = PersonalAccessToken::new("  ghp_example \n").expect("token should be valid");

        assert_eq!(token.value(), "ghp_example");
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn rejects_blank_tokens(#[case] raw: &str) {
        assert_eq!(
            PersonalAccessToken::new(raw),
            Err(ReviewError::MissingToken)
        );
    }

    #[rstest]
    fn debug_output_hides_value() {
        let token = PersonalAccessToken::new("secret").expect("token should be valid");

        assert!(!format!("{token:?}").contains("secret"));
    }
}
