//! Crate for interacting with the GitHub REST API.
//!
//! This crate provides a client for listing, searching and deleting the repositories of
//! an organization, authenticated with a personal access token.

use async_trait::async_trait;
use http::header::{HeaderMap, HeaderValue, ACCEPT};
use octocrab::{Octocrab, Page, Result as OctocrabResult};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::{debug, error, info, instrument};

pub mod errors;
pub use errors::Error;

pub mod models;
pub use models::{PageCursor, Repository, RepositoryPage};

// Reference the tests module in the separate file
#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// The largest page size the GitHub REST API accepts.
pub const MAX_PER_PAGE: u8 = 100;

/// Media type that asks the search API to include text-match metadata.
const TEXT_MATCH_MEDIA_TYPE: &str = "application/vnd.github.text-match+json";

/// A client for interacting with the GitHub API.
#[derive(Debug)]
pub struct GitHubClient {
    client: Octocrab,
}

impl GitHubClient {
    /// Creates a new `GitHubClient` wrapping an existing `Octocrab` instance.
    pub fn new(client: Octocrab) -> Self {
        Self { client }
    }
}

#[derive(Debug, Serialize)]
struct SearchParams<'a> {
    q: &'a str,
    per_page: u8,
    page: u32,
}

#[async_trait]
impl RepositoryClient for GitHubClient {
    #[instrument(skip(self), fields(org_name = %org_name, page = page))]
    async fn list_org_repositories(
        &self,
        org_name: &str,
        page: u32,
        per_page: u8,
    ) -> Result<RepositoryPage, Error> {
        debug!(
            org_name = org_name,
            page = page,
            "Fetching page {} of organization repositories",
            page
        );

        let result = self
            .client
            .orgs(org_name)
            .list_repos()
            .per_page(per_page)
            .page(page)
            .send()
            .await;

        match result {
            Ok(repos) => {
                let page_result = RepositoryPage::from(repos);
                debug!(
                    org_name = org_name,
                    page = page,
                    count = page_result.repositories.len(),
                    next = ?page_result.cursor.next,
                    last = ?page_result.cursor.last,
                    "Retrieved repositories"
                );
                Ok(page_result)
            }
            Err(e) => {
                error!(
                    org_name = org_name,
                    page = page,
                    "Failed to list organization repositories"
                );
                log_octocrab_error("Failed to list organization repositories", &e);
                Err(Error::from_octocrab(
                    "Failed to list organization repositories",
                    org_name,
                    e,
                ))
            }
        }
    }

    #[instrument(skip(self), fields(query = %query, page = page))]
    async fn search_repositories(
        &self,
        query: &str,
        page: u32,
        per_page: u8,
    ) -> Result<RepositoryPage, Error> {
        debug!(query = query, page = page, "Searching repositories");

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(TEXT_MATCH_MEDIA_TYPE));

        let params = SearchParams {
            q: query,
            per_page,
            page,
        };

        // The search builder in octocrab has no way to set the media type, so the
        // endpoint is called directly.
        let result: OctocrabResult<Page<octocrab::models::Repository>> = self
            .client
            .get_with_headers("/search/repositories", Some(&params), Some(headers))
            .await;

        match result {
            Ok(repos) => {
                let page_result = RepositoryPage::from(repos);
                debug!(
                    query = query,
                    page = page,
                    count = page_result.repositories.len(),
                    next = ?page_result.cursor.next,
                    "Retrieved search results"
                );
                Ok(page_result)
            }
            Err(e) => {
                error!(query = query, page = page, "Failed to search repositories");
                log_octocrab_error("Failed to search repositories", &e);
                Err(Error::from_octocrab("Failed to search repositories", query, e))
            }
        }
    }

    #[instrument(skip(self), fields(owner = %owner, repo = %repo))]
    async fn delete_repository(&self, owner: &str, repo: &str) -> Result<(), Error> {
        match self.client.repos(owner, repo).delete().await {
            Ok(()) => {
                info!(owner = owner, repo = repo, "Deleted repository");
                Ok(())
            }
            Err(e) => {
                error!(owner = owner, repo = repo, "Failed to delete repository");
                log_octocrab_error("Failed to delete repository", &e);
                Err(Error::from_octocrab(
                    "Failed to delete repository",
                    &format!("{}/{}", owner, repo),
                    e,
                ))
            }
        }
    }
}

/// Trait for the repository operations of an organization.
///
/// Every call maps to exactly one GitHub API request; pagination is left to the caller,
/// which decides which page to ask for next from the returned [`PageCursor`].
#[async_trait]
pub trait RepositoryClient: Send + Sync {
    /// Fetches one page of the repositories owned by an organization.
    ///
    /// # Arguments
    ///
    /// * `org_name` - The name of the organization.
    /// * `page` - The 1-based page number to fetch.
    /// * `per_page` - The page size, at most [`MAX_PER_PAGE`].
    ///
    /// # Errors
    /// Returns `Error::NotFound` if the organization does not exist, or `Error::Api`
    /// for any other failure.
    async fn list_org_repositories(
        &self,
        org_name: &str,
        page: u32,
        per_page: u8,
    ) -> Result<RepositoryPage, Error>;

    /// Fetches one page of repository search results.
    ///
    /// The query uses GitHub's search syntax, e.g. `org:my-org keyword`. Text-match
    /// metadata is requested with the results.
    ///
    /// # Errors
    /// Returns `Error::Api` if the search request fails.
    async fn search_repositories(
        &self,
        query: &str,
        page: u32,
        per_page: u8,
    ) -> Result<RepositoryPage, Error>;

    /// Deletes a repository.
    ///
    /// # Errors
    /// Returns `Error::NotFound` if the repository does not exist or is not visible to
    /// the token, or `Error::Api` for any other failure.
    async fn delete_repository(&self, owner: &str, repo: &str) -> Result<(), Error>;
}

/// Creates an `Octocrab` client authenticated with a personal access token.
///
/// When no token is given the client is built without credentials. GitHub then
/// applies the anonymous rate limit and rejects every write.
///
/// # Example
///
/// ```rust,no_run
/// use github_client::{create_token_client, Error, GitHubClient};
/// use secrecy::SecretString;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Error> {
///     let token = SecretString::from("ghp_example".to_string());
///     let client = GitHubClient::new(create_token_client(Some(&token))?);
///
///     // Use `client` to perform API operations
///     Ok(())
/// }
/// ```
#[instrument(skip(token))]
pub fn create_token_client(token: Option<&SecretString>) -> Result<Octocrab, Error> {
    let builder = Octocrab::builder();
    let builder = match token {
        Some(token) => builder.personal_token(token.expose_secret().to_string()),
        None => builder,
    };

    builder.build().map_err(|e| {
        error!(error = %e, "Failed to build Octocrab client");
        Error::AuthError(format!("Failed to build the GitHub client. Error was: {}", e))
    })
}

fn log_octocrab_error(message: &str, e: &octocrab::Error) {
    match e {
        octocrab::Error::GitHub { source, backtrace } => error!(
            error_message = source.message,
            status_code = source.status_code.as_u16(),
            backtrace = backtrace.to_string(),
            "{}. Received an error from GitHub",
            message
        ),
        octocrab::Error::UriParse { source, backtrace } => error!(
            error_message = source.to_string(),
            backtrace = backtrace.to_string(),
            "{}. Failed to parse URI.",
            message
        ),
        octocrab::Error::Uri { source, backtrace } => error!(
            error_message = source.to_string(),
            backtrace = backtrace.to_string(),
            "{}, Failed to parse URI.",
            message
        ),
        octocrab::Error::InvalidHeaderValue { source, backtrace } => error!(
            error_message = source.to_string(),
            backtrace = backtrace.to_string(),
            "{}. One of the header values was invalid.",
            message
        ),
        octocrab::Error::Serde { source, backtrace } => error!(
            error_message = source.to_string(),
            backtrace = backtrace.to_string(),
            "{}. The response could not be deserialized.",
            message
        ),
        _ => error!(error_message = e.to_string(), "{}", message),
    };
}
