//! Canned comment bodies selectable with `add --template`.

const TEMPLATES: [(&str, &str); 4] = [
    (
        "naming",
        "**Naming Convention**\n\nConsider using a more descriptive name that follows the project's naming conventions.",
    ),
    (
        "perf",
        "**Performance**\n\nThis implementation may have performance implications at scale. Consider optimizing.",
    ),
    (
        "security",
        "**Security Concern**\n\nThis code may have security implications. Please review for potential vulnerabilities.",
    ),
    (
        "style",
        "**Style Guide**\n\nThis code doesn't follow the project's style guide. Please update to match conventions.",
    ),
];

/// Returns the body registered under `name`.
#[must_use]
pub fn get(name: &str) -> Option<&'static str> {
    TEMPLATES
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, body)| *body)
}

/// Template names in ascending order.
#[must_use]
pub fn names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = TEMPLATES.iter().map(|(name, _)| *name).collect();
    names.sort_unstable();
    names
}
