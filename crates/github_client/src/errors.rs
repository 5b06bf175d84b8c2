//! Error types for GitHub client operations.
//!
//! This module defines the error types that can occur when interacting with the GitHub API
//! through the github_client crate. Failures reported by octocrab are kept as the error
//! source so callers can print the full chain.

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur during GitHub client operations.
///
/// ## Examples
///
/// ```rust,ignore
/// use github_client::Error;
///
/// match client.delete_repository("my-org", "my-repo").await {
///     Ok(()) => println!("Repository deleted"),
///     Err(Error::NotFound(name)) => eprintln!("No such repository: {}", name),
///     Err(err) => eprintln!("Other error: {}", err),
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A GitHub API request failed.
    ///
    /// `message` describes the operation that was being attempted. The octocrab error
    /// that caused the failure is available through `source()`.
    #[error("{message}: {source}")]
    Api {
        message: String,
        #[source]
        source: octocrab::Error,
    },

    /// GitHub client initialization failure.
    ///
    /// The contained string provides specific details about the failure.
    #[error("Failed to authenticate or initialize GitHub client: {0}")]
    AuthError(String),

    /// The GitHub API returned a response in an unexpected format.
    #[error("Invalid response format")]
    InvalidResponse,

    /// The requested resource was not found.
    ///
    /// GitHub answers 404 both for resources that do not exist and for resources the
    /// current credentials are not allowed to see.
    #[error("Resource not found: {0}")]
    NotFound(String),
}

impl Error {
    /// Wraps an octocrab error, mapping a 404 answer to [`Error::NotFound`].
    pub(crate) fn from_octocrab(message: &str, resource: &str, source: octocrab::Error) -> Self {
        if let octocrab::Error::GitHub { source: ref gh, .. } = source {
            if gh.status_code == http::StatusCode::NOT_FOUND {
                return Error::NotFound(resource.to_string());
            }
        }

        Error::Api {
            message: message.to_string(),
            source,
        }
    }
}
