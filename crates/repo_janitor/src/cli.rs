//! Command-line arguments for the `repo-janitor` binary.

use std::time::Duration;

use clap::Parser;
use secrecy::SecretString;

use crate::config::{
    JanitorConfig, DEFAULT_DELETE_DELAY_MS, DEFAULT_MAX_INVALID_PAGES, DEFAULT_ORGANIZATION,
};
use crate::errors::Error;
use crate::request::{Operation, OperationRequest};

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;

/// Repo Janitor: list, search and delete the repositories of a GitHub organization
#[derive(Parser, Debug)]
#[command(name = "repo-janitor")]
#[command(about = "List, search and delete the repositories of a GitHub organization", long_about = None)]
pub struct Args {
    /// The operation to perform
    #[arg(long, value_enum)]
    pub operation: Operation,

    /// The keyword(s) to match repositories on (required by delete-by-keyword)
    #[arg(long)]
    pub keyword: Option<String>,

    /// The name of a repository (required by delete)
    #[arg(long)]
    pub repo: Option<String>,

    /// The organization that owns the repositories
    #[arg(long, env = "GITHUB_ORG", default_value = DEFAULT_ORGANIZATION)]
    pub org: String,

    /// Personal access token used to call the GitHub API
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Pause after every deletion, in milliseconds
    #[arg(long, default_value_t = DEFAULT_DELETE_DELAY_MS)]
    pub delete_delay_ms: u64,

    /// Maximum number of pages scanned by delete-invalid
    #[arg(long, default_value_t = DEFAULT_MAX_INVALID_PAGES)]
    pub max_invalid_pages: u32,
}

impl Args {
    /// Validates the operation flags into a request.
    pub fn request(&self) -> Result<OperationRequest, Error> {
        OperationRequest::new(
            self.operation,
            self.keyword.as_deref(),
            self.repo.as_deref(),
        )
    }

    /// Builds and validates the janitor configuration.
    pub fn config(&self) -> Result<JanitorConfig, Error> {
        let config = JanitorConfig {
            organization: self.org.clone(),
            delete_delay: Duration::from_millis(self.delete_delay_ms),
            max_invalid_pages: self.max_invalid_pages,
            ..Default::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// The API token, if a non-empty one was supplied.
    pub fn token(&self) -> Option<SecretString> {
        self.token
            .as_deref()
            .filter(|token| !token.is_empty())
            .map(|token| SecretString::from(token.to_string()))
    }
}
