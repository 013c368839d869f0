use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Result, UpdaterError};
use crate::splice::Markers;

pub const DEFAULT_ACCOUNT: &str = "sedgar03";
pub const DEFAULT_README_PATH: &str = "README.md";
pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAX_PAGES: u32 = 100;
pub const DEFAULT_USER_AGENT: &str = "profile-readme-updater";

/// Everything one run of the updater needs to know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdaterConfig {
    pub account: String,
    pub readme_path: PathBuf,
    pub api_url: String,
    pub user_agent: String,
    pub timeout: Duration,
    pub max_pages: u32,
    pub markers: Markers,
}

impl Default for UpdaterConfig {
    fn default() -> Self {
        Self {
            account: DEFAULT_ACCOUNT.to_string(),
            readme_path: PathBuf::from(DEFAULT_README_PATH),
            api_url: DEFAULT_API_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_pages: DEFAULT_MAX_PAGES,
            markers: Markers::default(),
        }
    }
}

impl UpdaterConfig {
    pub fn validate(&self) -> Result<()> {
        if self.account.trim().is_empty() {
            return Err(UpdaterError::ConfigError(
                "account name must not be empty".to_string(),
            ));
        }
        if self.max_pages == 0 {
            return Err(UpdaterError::ConfigError(
                "max pages must be at least 1".to_string(),
            ));
        }
        if self.markers.start.is_empty() || self.markers.end.is_empty() {
            return Err(UpdaterError::ConfigError(
                "markers must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
