//! Argument and validation failures of the `gh-review` binary.
//!
//! Every case here fails before authentication, so no token or network is
//! needed.

use std::process::{Command, Output};

use rstest::{fixture, rstest};
use tempfile::TempDir;

struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_gh-review"))
            .args(args)
            .current_dir(self.dir.path())
            .env("HOME", self.dir.path())
            .env("XDG_CONFIG_HOME", self.dir.path())
            .env_remove("GH_TOKEN")
            .env_remove("GITHUB_TOKEN")
            .env_remove("GH_REVIEW_TOKEN")
            .env_remove("GH_REVIEW_FORMAT")
            .env_remove("GH_REVIEW_API_URL")
            .env_remove("GH_REVIEW_REMOTE")
            .output()
            .expect("binary should run")
    }
}

#[fixture]
fn sandbox() -> Sandbox {
    Sandbox {
        dir: TempDir::new().expect("temp dir should be created"),
    }
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[rstest]
#[case(
    &["add", "7", "-R", "octo/cat", "-p", "src/lib.rs", "-l", "3"],
    "body is required (use -b or -t)"
)]
#[case(
    &["add", "7", "-R", "octo/cat", "-p", "src/lib.rs", "-l", "3", "-t", "docs"],
    "unknown template \"docs\" (available: [naming perf security style])"
)]
#[case(
    &["submit", "7", "-R", "octo/cat", "-v", "maybe"],
    "invalid verdict \"maybe\": use approve, comment, or request_changes"
)]
#[case(
    &["comments", "7", "-R", "octo/cat", "-f", "yaml"],
    "unsupported output format: yaml (use table, plain, or json)"
)]
#[case(
    &["view", "abc", "-R", "octo/cat"],
    "invalid PR reference \"abc\": expected number or URL"
)]
#[case(&["view", "0", "-R", "octo/cat"], "PR number must be positive")]
#[case(
    &["view", "7"],
    "could not determine repository: not inside a Git repository (use -R owner/repo)"
)]
fn fails_before_contacting_github(
    sandbox: Sandbox,
    #[case] args: &[&str],
    #[case] message: &str,
) {
    let output = sandbox.run(args);

    assert_eq!(output.status.code(), Some(1), "stderr: {}", stderr(&output));
    assert!(
        stderr(&output).contains(message),
        "expected {message:?} in stderr: {}",
        stderr(&output)
    );
    assert!(output.stdout.is_empty(), "stdout should stay clean");
}

#[rstest]
fn missing_required_flag_exits_with_failure(sandbox: Sandbox) {
    let output = sandbox.run(&["edit", "7", "-R", "octo/cat", "-b", "text"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("--comment"), "{}", stderr(&output));
}

#[rstest]
fn help_lists_subcommands(sandbox: Sandbox) {
    let output = sandbox.run(&["--help"]);

    assert!(output.status.success());
    let text = String::from_utf8_lossy(&output.stdout);
    for command in ["add", "comments", "delete", "discard", "edit", "submit", "view"] {
        assert!(text.contains(command), "help should list {command}: {text}");
    }
}

#[rstest]
fn comments_help_lists_only_matchable_states(sandbox: Sandbox) {
    let output = sandbox.run(&["comments", "--help"]);

    assert!(output.status.success());
    let text = String::from_utf8_lossy(&output.stdout);
    for state in ["pending", "changes_requested", "submitted", "discussion"] {
        assert!(text.contains(state), "help should list {state}: {text}");
    }
    assert!(!text.contains("dismissed"), "{text}");
}

#[rstest]
fn configured_format_is_validated(sandbox: Sandbox) {
    std::fs::write(sandbox.dir.path().join(".gh-review.toml"), "format = \"xml\"\n")
        .expect("config should be written");

    let output = sandbox.run(&["view", "7", "-R", "octo/cat"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(
        stderr(&output).contains("unsupported output format: xml"),
        "{}",
        stderr(&output)
    );
}
