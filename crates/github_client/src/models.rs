//! # Models
//!
//! This module contains the data models returned by the GitHub client.
//!
//! Octocrab's response types are converted into these smaller types so that callers only
//! see the fields they use, and so that tests can build them without a live API.

use http::Uri;
use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "models_tests.rs"]
mod tests;

/// Represents a GitHub repository.
///
/// # Examples
///
/// ```rust
/// use github_client::models::Repository;
///
/// let repo = Repository::new("my-repo", Some("my-org/my-repo".to_string()));
///
/// println!("Repository: {}", repo.name());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Repository {
    /// The name of the repository
    name: String,
    /// The full name of the repository (owner/name)
    #[serde(default)]
    full_name: Option<String>,
}

impl Repository {
    /// Creates a new Repository instance.
    pub fn new(name: impl Into<String>, full_name: Option<String>) -> Self {
        Self {
            name: name.into(),
            full_name,
        }
    }

    /// Returns the name of the repository (without owner).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the full name of the repository, falling back to the bare name.
    pub fn full_name(&self) -> &str {
        self.full_name.as_deref().unwrap_or(&self.name)
    }
}

impl From<octocrab::models::Repository> for Repository {
    fn from(value: octocrab::models::Repository) -> Self {
        Self {
            name: value.name,
            full_name: value.full_name,
        }
    }
}

/// Pagination state for a page of results.
///
/// GitHub reports pagination through the `Link` response header. Each relation that is
/// present is reduced to the page number it points at; a relation that GitHub left out
/// is `None`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PageCursor {
    /// The page after this one
    pub next: Option<u32>,
    /// The page before this one
    pub prev: Option<u32>,
    /// The final page of the result set
    pub last: Option<u32>,
}

impl PageCursor {
    /// Builds a cursor from the link URIs of a response.
    pub fn from_links(next: Option<&Uri>, prev: Option<&Uri>, last: Option<&Uri>) -> Self {
        Self {
            next: next.and_then(page_number),
            prev: prev.and_then(page_number),
            last: last.and_then(page_number),
        }
    }

    /// Builds a cursor from an octocrab page.
    pub fn from_page<T>(page: &octocrab::Page<T>) -> Self {
        Self::from_links(page.next.as_ref(), page.prev.as_ref(), page.last.as_ref())
    }
}

/// Extracts the `page` query parameter from a pagination link.
///
/// Returns `None` when the link has no query, no `page` parameter, or a `page` value
/// that is not a positive number.
pub fn page_number(uri: &Uri) -> Option<u32> {
    let query = uri.query()?;
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "page")
        .and_then(|(_, value)| value.parse::<u32>().ok())
        .filter(|page| *page > 0)
}

/// A single page of repositories together with its pagination state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RepositoryPage {
    /// The repositories on this page, in the order GitHub returned them
    pub repositories: Vec<Repository>,
    /// Where the surrounding pages are
    pub cursor: PageCursor,
}

impl From<octocrab::Page<octocrab::models::Repository>> for RepositoryPage {
    fn from(page: octocrab::Page<octocrab::models::Repository>) -> Self {
        let cursor = PageCursor::from_page(&page);
        Self {
            repositories: page.items.into_iter().map(Repository::from).collect(),
            cursor,
        }
    }
}
