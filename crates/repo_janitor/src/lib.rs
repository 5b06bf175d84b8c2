//! Repository janitor for a single GitHub organization.
//!
//! This crate lists the repositories of an organization, searches them by keyword,
//! finds repositories with malformed names and deletes repositories one at a time.
//! It can be used programmatically or through the `repo-janitor` binary.

pub mod cli;
pub mod config;
pub mod errors;
pub mod janitor;
pub mod request;

pub use config::JanitorConfig;
pub use errors::Error;
pub use janitor::RepositoryJanitor;
pub use request::{Operation, OperationRequest};

/// Environment variable holding the log filter directives.
pub const LOG_FILTER_ENV: &str = "REPO_JANITOR_LOG";

/// Initialize logging for janitor operations.
///
/// Logs go to stderr so that stdout only carries operation output. The filter is read
/// from `REPO_JANITOR_LOG`; without it only errors are shown.
pub fn init_logging() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_env(LOG_FILTER_ENV))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
