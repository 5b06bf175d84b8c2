//! Repository traversal and cleanup operations.
//!
//! Every operation is a single sequential pass: page through the organization (or a
//! search), filter in memory, then delete one repository at a time.

use std::collections::BTreeSet;
use std::io::Write;

use github_client::{Repository, RepositoryClient};
use tracing::{debug, info, warn};

use crate::config::JanitorConfig;
use crate::errors::Error;
use crate::request::OperationRequest;

#[cfg(test)]
#[path = "janitor_tests.rs"]
mod tests;

/// Repository operations for a single organization.
pub struct RepositoryJanitor<C> {
    client: C,
    config: JanitorConfig,
}

impl<C: RepositoryClient> RepositoryJanitor<C> {
    /// Create a new janitor instance.
    ///
    /// # Arguments
    ///
    /// * `client` - GitHub client used for every API call
    /// * `config` - Organization and pacing settings
    pub fn new(client: C, config: JanitorConfig) -> Self {
        Self { client, config }
    }

    /// The settings this janitor runs with.
    pub fn config(&self) -> &JanitorConfig {
        &self.config
    }

    /// Runs a validated request, writing its output to `out`.
    ///
    /// `list-all` writes one repository name per line; delete operations write one
    /// line per deletion attempt.
    pub async fn execute<W: Write + Send>(
        &self,
        request: &OperationRequest,
        out: &mut W,
    ) -> Result<(), Error> {
        info!(
            org = self.config.organization,
            operation = %request.operation(),
            "Running operation"
        );

        match request {
            OperationRequest::DeleteByKeyword { keyword } => {
                let repos = self.search_repositories_by_keyword(keyword).await?;
                self.delete_repositories(&repository_names(&repos), out)
                    .await
            }
            OperationRequest::DeleteInvalid => {
                let repos = self.find_invalid_repositories().await?;
                self.delete_repositories(&repository_names(&repos), out)
                    .await
            }
            OperationRequest::ListAll => {
                let repos = self.list_all_repositories().await?;
                for repo in &repos {
                    writeln!(out, "{}", repo.name())?;
                }
                Ok(())
            }
            OperationRequest::Delete { repo } => self.delete_repository(repo, out).await,
        }
    }

    /// Lists every repository in the organization.
    ///
    /// Pages are fetched from page 1 onwards until a page arrives without a `next`
    /// link. Any failed fetch aborts the listing.
    pub async fn list_all_repositories(&self) -> Result<Vec<Repository>, Error> {
        let org = &self.config.organization;
        let mut all_repos = Vec::new();
        let mut page = 1u32;

        loop {
            let result = self
                .client
                .list_org_repositories(org, page, self.config.per_page)
                .await?;

            debug!(
                org = org,
                page = page,
                count = result.repositories.len(),
                "Retrieved {} repositories on page {}",
                result.repositories.len(),
                page
            );

            all_repos.extend(result.repositories);

            match result.cursor.next {
                Some(next) => page = next,
                None => break,
            }
        }

        info!(
            org = org,
            count = all_repos.len(),
            "Listed organization repositories"
        );

        Ok(all_repos)
    }

    /// Finds repositories whose name starts with the invalid marker.
    ///
    /// The scan reads page 1, jumps to the last page and then walks backwards, on the
    /// assumption that GitHub lists the oldest repositories first and the broken names
    /// are recent. It stops when the next page is unknown, when it would revisit a page
    /// already read, or after `max_invalid_pages` fetches. It does not guarantee that
    /// every invalid repository is found.
    pub async fn find_invalid_repositories(&self) -> Result<Vec<Repository>, Error> {
        let org = &self.config.organization;
        let mut invalid_repos = Vec::new();
        let mut visited = BTreeSet::new();
        let mut page = 1u32;

        info!(
            org = org,
            max_pages = self.config.max_invalid_pages,
            "Searching for invalid repositories"
        );

        loop {
            let result = self
                .client
                .list_org_repositories(org, page, self.config.per_page)
                .await?;
            visited.insert(page);

            for repo in result.repositories {
                if self.config.is_invalid_name(repo.name()) {
                    debug!(org = org, repo_name = repo.name(), "Found invalid repository");
                    invalid_repos.push(repo);
                }
            }

            if visited.len() as u32 >= self.config.max_invalid_pages {
                debug!(org = org, pages = visited.len(), "Reached the page limit");
                break;
            }

            let next = if visited.len() == 1 {
                result.cursor.last
            } else {
                result.cursor.prev
            };

            match next {
                Some(next) if !visited.contains(&next) => page = next,
                _ => break,
            }
        }

        info!(
            org = org,
            pages = visited.len(),
            count = invalid_repos.len(),
            "Finished invalid repository scan"
        );

        Ok(invalid_repos)
    }

    /// Searches the organization for repositories matching a keyword.
    ///
    /// The query is `org:<organization> <keyword>`. Pages are followed until one
    /// arrives without a `next` link.
    pub async fn search_repositories_by_keyword(
        &self,
        keyword: &str,
    ) -> Result<Vec<Repository>, Error> {
        let query = format!("org:{} {}", self.config.organization, keyword);
        let mut all_repos = Vec::new();
        let mut page = 1u32;

        loop {
            let result = self
                .client
                .search_repositories(&query, page, self.config.per_page)
                .await?;

            all_repos.extend(result.repositories);

            match result.cursor.next {
                Some(next) => page = next,
                None => break,
            }
        }

        info!(
            org = self.config.organization,
            keyword = keyword,
            count = all_repos.len(),
            "Found repositories matching keyword"
        );

        Ok(all_repos)
    }

    /// Deletes the named repositories in order.
    ///
    /// Stops at the first failure. Repositories deleted before it stay deleted and the
    /// remaining ones are not attempted.
    pub async fn delete_repositories<W: Write + Send>(
        &self,
        repo_names: &[String],
        out: &mut W,
    ) -> Result<(), Error> {
        for (index, repo_name) in repo_names.iter().enumerate() {
            if let Err(err) = self.delete_repository(repo_name, out).await {
                warn!(
                    org = self.config.organization,
                    repo_name = repo_name,
                    deleted = index,
                    remaining = repo_names.len() - index,
                    "Stopping deletion after failure"
                );
                return Err(err);
            }
        }

        info!(
            org = self.config.organization,
            deleted_count = repo_names.len(),
            "Deletion completed"
        );

        Ok(())
    }

    /// Deletes a single repository, then pauses for the configured delay.
    pub async fn delete_repository<W: Write + Send>(
        &self,
        repo_name: &str,
        out: &mut W,
    ) -> Result<(), Error> {
        writeln!(out, "Deleting repo: {}", repo_name)?;

        self.client
            .delete_repository(&self.config.organization, repo_name)
            .await?;

        tokio::time::sleep(self.config.delete_delay).await;
        Ok(())
    }
}

fn repository_names(repos: &[Repository]) -> Vec<String> {
    repos.iter().map(|repo| repo.name().to_string()).collect()
}
