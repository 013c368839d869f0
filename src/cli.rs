use clap::Parser;

use crate::config::{
    UpdaterConfig, DEFAULT_ACCOUNT, DEFAULT_API_URL, DEFAULT_MAX_PAGES, DEFAULT_README_PATH,
    DEFAULT_TIMEOUT_SECS,
};
use crate::splice::Markers;

#[derive(Parser, Debug)]
#[command(name = "public-projects-updater")]
#[command(about = "Refreshes the public projects section of a README from the GitHub API")]
#[command(version = "0.1.0")]
pub struct Cli {
    /// GitHub account whose public repositories are listed
    #[arg(long, env = "PROFILE_ACCOUNT", default_value = DEFAULT_ACCOUNT)]
    pub account: String,

    /// README file containing the public projects markers
    #[arg(long, env = "README_PATH", default_value = DEFAULT_README_PATH)]
    pub readme: String,

    /// GitHub REST API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Per-request timeout in seconds
    #[arg(long, env = "GITHUB_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Upper bound on listing pages requested
    #[arg(long, env = "GITHUB_MAX_PAGES", default_value_t = DEFAULT_MAX_PAGES)]
    pub max_pages: u32,
}

impl From<Cli> for UpdaterConfig {
    fn from(cli: Cli) -> Self {
        UpdaterConfig {
            account: cli.account,
            readme_path: cli.readme.into(),
            api_url: cli.api_url,
            timeout: std::time::Duration::from_secs(cli.timeout_secs),
            max_pages: cli.max_pages,
            markers: Markers::default(),
            ..Default::default()
        }
    }
}
