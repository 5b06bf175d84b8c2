use std::io;

use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur while running a janitor operation.
///
/// Nothing is recovered internally: every variant travels up to the binary, which
/// prints it and exits with a failure status.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid command-line arguments were provided.
    ///
    /// Returned before any request is sent to GitHub, e.g. when an operation is
    /// missing the flag it depends on.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// A GitHub API call failed.
    ///
    /// Repositories deleted before the failing call stay deleted.
    #[error(transparent)]
    GitHub(#[from] github_client::Error),

    /// Writing the operation output failed, typically because of a broken pipe.
    #[error("Failed to write operation output.")]
    Output(#[from] io::Error),
}
