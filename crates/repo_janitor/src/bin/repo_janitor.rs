//! Manage the repositories of a GitHub organization.
//!
//! Usage:
//!   repo-janitor --operation list-all
//!   repo-janitor --operation delete --repo <name>
//!   repo-janitor --operation delete-by-keyword --keyword <keyword>
//!   repo-janitor --operation delete-invalid
//!
//! Environment variables:
//! - GITHUB_TOKEN: personal access token used for every API call
//! - GITHUB_ORG: organization to operate on (default: redhat-appstudio-appdata)
//! - REPO_JANITOR_LOG: log filter, e.g. `info` or `repo_janitor=debug`

use anyhow::Context;
use clap::Parser;
use github_client::{create_token_client, GitHubClient};
use repo_janitor::cli::Args;
use repo_janitor::RepositoryJanitor;
use tracing::{error, warn};

#[tokio::main]
async fn main() {
    repo_janitor::init_logging();

    let args = Args::parse();
    if let Err(e) = run(args).await {
        error!("Error: {e:#}");
        eprintln!("{e:#}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    // Flags are validated before any client is built.
    let request = args.request().context("usage")?;
    let config = args.config().context("usage")?;

    let token = args.token();
    if token.is_none() {
        warn!("GITHUB_TOKEN is not set, continuing without authentication");
        eprintln!("GITHUB_TOKEN must be set as an environment variable");
    }

    let octocrab = create_token_client(token.as_ref())?;
    let janitor = RepositoryJanitor::new(GitHubClient::new(octocrab), config);

    janitor
        .execute(&request, &mut std::io::stdout())
        .await
        .with_context(|| format!("operation '{}' failed", request.operation()))?;

    Ok(())
}
