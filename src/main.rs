use anyhow::Context;
use clap::Parser;
use colored::*;
use public_projects_updater::cli::Cli;
use public_projects_updater::config::UpdaterConfig;
use public_projects_updater::github::GitHubClient;
use public_projects_updater::updater::{update_readme, UpdateOutcome};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();

    // Logs go to stderr; stdout carries only the status line
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn"))
        )
        .with_writer(std::io::stderr)
        .init();

    let config = UpdaterConfig::from(Cli::parse());
    let path = config.readme_path.display().to_string();

    let client = GitHubClient::new(&config)?;
    let outcome = update_readme(&config, &client)
        .await
        .with_context(|| format!("failed to update public projects in {}", path))?;

    match outcome {
        UpdateOutcome::Updated => {
            println!("{}", format!("Updated {} public projects section", path).green());
        }
        UpdateOutcome::UpToDate => {
            println!("{}", format!("{} already up to date", path).dimmed());
        }
    }

    Ok(())
}
