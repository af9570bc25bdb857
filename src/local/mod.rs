//! Local Git repository discovery.
//!
//! When a pull request is given as a bare number and no `--repo` flag is
//! present, the repository comes from a remote of the checkout the command
//! runs in.
//!
//! # Example
//!
//! ```no_run
//! use gh_review::local::GitRemoteContext;
//!
//! let context = GitRemoteContext::new(".", "origin");
//! match context.discover() {
//!     Ok(origin) => tracing::info!(repository = %origin.slug(), "found repository"),
//!     Err(error) => tracing::warn!(%error, "discovery failed"),
//! }
//! ```

mod discovery;
mod error;
mod remote;

pub use discovery::GitRemoteContext;
pub use error::LocalDiscoveryError;
pub use remote::{RemoteOrigin, parse_remote_url};
