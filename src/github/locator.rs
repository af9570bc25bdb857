//! Pull request reference parsing and repository resolution.
//!
//! A pull request can be named by a bare number (`123`), a hash-prefixed
//! number (`#123`), or a full URL (`https://github.com/owner/repo/pull/123`).
//! URLs carry their own repository; bare numbers take the repository from the
//! `--repo` flag or from the ambient git checkout.

use std::fmt;

use url::Url;

use super::error::ReviewError;

/// Repository owner wrapper to avoid stringly typed parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryOwner(String);

impl RepositoryOwner {
    pub(crate) fn new(value: &str) -> Result<Self, ReviewError> {
        if value.is_empty() {
            return Err(ReviewError::RepositoryResolution {
                message: "repository owner is empty".to_owned(),
            });
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the owner value.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Repository name wrapper to prevent parameter mix-ups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryName(String);

impl RepositoryName {
    pub(crate) fn new(value: &str) -> Result<Self, ReviewError> {
        if value.is_empty() {
            return Err(ReviewError::RepositoryResolution {
                message: "repository name is empty".to_owned(),
            });
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the repository name.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Pull request number, always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PullRequestNumber(u64);

impl PullRequestNumber {
    /// Wraps a pull request number.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::InvalidReference`] when `value` is zero.
    pub fn new(value: u64) -> Result<Self, ReviewError> {
        if value == 0 {
            return Err(not_positive());
        }
        Ok(Self(value))
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PullRequestNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An `owner/name` repository pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositorySlug {
    owner: RepositoryOwner,
    name: RepositoryName,
}

impl RepositorySlug {
    /// Builds a slug from separate owner and name parts.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::RepositoryResolution`] when either part is empty.
    pub fn new(owner: &str, name: &str) -> Result<Self, ReviewError> {
        Ok(Self {
            owner: RepositoryOwner::new(owner)?,
            name: RepositoryName::new(name)?,
        })
    }

    /// Parses an `owner/name` string.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::RepositoryResolution`] unless the input has
    /// exactly two non-empty `/`-separated parts.
    pub fn parse(input: &str) -> Result<Self, ReviewError> {
        let invalid = || ReviewError::RepositoryResolution {
            message: format!("invalid repository {input:?}: expected OWNER/REPO"),
        };
        let trimmed = input.trim();
        let (owner, name) = trimmed.split_once('/').ok_or_else(invalid)?;
        if name.contains('/') {
            return Err(invalid());
        }
        Self::new(owner, name).map_err(|_| invalid())
    }

    /// Repository owner.
    #[must_use]
    pub const fn owner(&self) -> &RepositoryOwner {
        &self.owner
    }

    /// Repository name.
    #[must_use]
    pub const fn name(&self) -> &RepositoryName {
        &self.name
    }
}

impl fmt::Display for RepositorySlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner.as_str(), self.name.as_str())
    }
}

/// Result of parsing a pull request argument before repository resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestArgument {
    /// The pull request number.
    pub number: PullRequestNumber,
    /// Repository embedded in a URL argument, if any.
    pub repository: Option<RepositorySlug>,
}

/// Supplies the repository of the current working directory.
#[cfg_attr(test, mockall::automock)]
pub trait RepositoryContext {
    /// Returns the repository the user is working in.
    ///
    /// # Errors
    ///
    /// Returns an error when no repository can be determined.
    fn current_repository(&self) -> Result<RepositorySlug, ReviewError>;
}

/// A fully qualified pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestReference {
    repository: RepositorySlug,
    number: PullRequestNumber,
}

impl PullRequestReference {
    /// Combines a number with an explicit or ambient repository.
    ///
    /// An empty or absent `repository` falls back to `context`.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::InvalidReference`] when `number` is zero and
    /// [`ReviewError::RepositoryResolution`] when the repository is malformed
    /// or cannot be determined.
    pub fn build(
        number: u64,
        repository: Option<&str>,
        context: &dyn RepositoryContext,
    ) -> Result<Self, ReviewError> {
        let pr_number = PullRequestNumber::new(number)?;
        let slug = match repository.map(str::trim).filter(|repo| !repo.is_empty()) {
            Some(repo) => RepositorySlug::parse(repo)?,
            None => ambient_repository(context)?,
        };
        Ok(Self {
            repository: slug,
            number: pr_number,
        })
    }

    /// Resolves a raw pull request argument.
    ///
    /// A repository embedded in a URL wins over `explicit_repository`, which
    /// in turn wins over the ambient `context`.
    ///
    /// # Errors
    ///
    /// Propagates failures from [`parse_reference`] and [`Self::build`].
    pub fn resolve(
        argument: &str,
        explicit_repository: Option<&str>,
        context: &dyn RepositoryContext,
    ) -> Result<Self, ReviewError> {
        let parsed = parse_reference(argument)?;
        if let Some(repository) = parsed.repository {
            return Ok(Self {
                repository,
                number: parsed.number,
            });
        }
        Self::build(parsed.number.get(), explicit_repository, context)
    }

    /// Repository containing the pull request.
    #[must_use]
    pub const fn repository(&self) -> &RepositorySlug {
        &self.repository
    }

    /// Repository owner.
    #[must_use]
    pub const fn owner(&self) -> &RepositoryOwner {
        self.repository.owner()
    }

    /// Repository name.
    #[must_use]
    pub const fn name(&self) -> &RepositoryName {
        self.repository.name()
    }

    /// Pull request number.
    #[must_use]
    pub const fn number(&self) -> PullRequestNumber {
        self.number
    }
}

impl fmt::Display for PullRequestReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.repository, self.number)
    }
}

/// Parses a pull request argument into a number and an optional repository.
///
/// # Errors
///
/// Returns [`ReviewError::InvalidReference`] for empty, non-numeric, or
/// non-positive input.
pub fn parse_reference(argument: &str) -> Result<PullRequestArgument, ReviewError> {
    let trimmed = argument.trim();

    if let Some(parsed) = parse_pull_request_url(trimmed) {
        return parsed;
    }

    let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
    let value = digits
        .parse::<i64>()
        .map_err(|_| ReviewError::InvalidReference {
            message: format!("invalid PR reference {trimmed:?}: expected number or URL"),
        })?;
    let positive = u64::try_from(value).map_err(|_| not_positive())?;

    Ok(PullRequestArgument {
        number: PullRequestNumber::new(positive)?,
        repository: None,
    })
}

/// Recognises `[scheme://][www.]github.com/<owner>/<repo>/pull/<n>`.
///
/// Returns `None` when the input is not a GitHub pull request URL so the
/// caller can try the numeric forms.
fn parse_pull_request_url(input: &str) -> Option<Result<PullRequestArgument, ReviewError>> {
    let lowered = input.to_ascii_lowercase();
    let candidate = if lowered.starts_with("github.com/") || lowered.starts_with("www.github.com/")
    {
        format!("https://{input}")
    } else {
        input.to_owned()
    };

    let parsed = Url::parse(&candidate).ok()?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return None;
    }
    let host = parsed.host_str()?;
    if host != "github.com" && host != "www.github.com" {
        return None;
    }

    let mut segments = parsed.path_segments()?;
    let owner = segments.next().filter(|segment| !segment.is_empty())?;
    let repository = segments.next().filter(|segment| !segment.is_empty())?;
    if segments.next()? != "pull" {
        return None;
    }
    let number_segment = segments.next()?;
    let digits: String = number_segment
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    if digits.is_empty() {
        return None;
    }

    Some(url_argument(owner, repository, &digits))
}

fn url_argument(
    owner: &str,
    repository: &str,
    digits: &str,
) -> Result<PullRequestArgument, ReviewError> {
    let value = digits
        .parse::<u64>()
        .map_err(|_| ReviewError::InvalidReference {
            message: format!("invalid PR number {digits:?} in URL"),
        })?;
    Ok(PullRequestArgument {
        number: PullRequestNumber::new(value)?,
        repository: Some(RepositorySlug::new(owner, repository)?),
    })
}

fn ambient_repository(context: &dyn RepositoryContext) -> Result<RepositorySlug, ReviewError> {
    context
        .current_repository()
        .map_err(|error| ReviewError::RepositoryResolution {
            message: format!("could not determine repository: {error} (use -R owner/repo)"),
        })
}

fn not_positive() -> ReviewError {
    ReviewError::InvalidReference {
        message: "PR number must be positive".to_owned(),
    }
}
