//! Configuration for janitor operations.
//!
//! The values here used to be hard-coded; they are now passed explicitly into every
//! operation through [`JanitorConfig`].

use std::time::Duration;

use crate::errors::Error;

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// Organization whose repositories are managed when none is configured.
pub const DEFAULT_ORGANIZATION: &str = "redhat-appstudio-appdata";

/// Pause after every deletion, in milliseconds.
pub const DEFAULT_DELETE_DELAY_MS: u64 = 100;

/// Upper bound on the page fetches made by the invalid-repository scan.
pub const DEFAULT_MAX_INVALID_PAGES: u32 = 40;

/// First character of the names produced by the broken provisioning flow.
pub const INVALID_NAME_MARKER: char = '-';

/// Settings shared by all janitor operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JanitorConfig {
    /// Organization that owns the repositories
    pub organization: String,
    /// Page size for list and search requests
    pub per_page: u8,
    /// Pause after every successful deletion
    pub delete_delay: Duration,
    /// Maximum number of pages fetched while looking for invalid repositories
    pub max_invalid_pages: u32,
    /// Names starting with this character are considered invalid
    pub invalid_name_marker: char,
}

impl Default for JanitorConfig {
    fn default() -> Self {
        Self {
            organization: DEFAULT_ORGANIZATION.to_string(),
            per_page: github_client::MAX_PER_PAGE,
            delete_delay: Duration::from_millis(DEFAULT_DELETE_DELAY_MS),
            max_invalid_pages: DEFAULT_MAX_INVALID_PAGES,
            invalid_name_marker: INVALID_NAME_MARKER,
        }
    }
}

impl JanitorConfig {
    /// Creates a configuration for the given organization with default settings.
    pub fn for_organization(organization: impl Into<String>) -> Self {
        Self {
            organization: organization.into(),
            ..Default::default()
        }
    }

    /// Checks that the settings can drive an operation.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArguments` if the organization is blank, the page size is
    /// outside `1..=100`, or the invalid scan is allowed no pages at all.
    pub fn validate(&self) -> Result<(), Error> {
        if self.organization.trim().is_empty() {
            return Err(Error::InvalidArguments(
                "The organization name must not be empty".to_string(),
            ));
        }

        if self.per_page == 0 || self.per_page > github_client::MAX_PER_PAGE {
            return Err(Error::InvalidArguments(format!(
                "The page size must be between 1 and {}",
                github_client::MAX_PER_PAGE
            )));
        }

        if self.max_invalid_pages == 0 {
            return Err(Error::InvalidArguments(
                "'--max-invalid-pages' must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Returns true if the repository name carries the invalid marker as first character.
    pub fn is_invalid_name(&self, name: &str) -> bool {
        name.starts_with(self.invalid_name_marker)
    }
}
