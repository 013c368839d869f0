use crate::config::UpdaterConfig;
use crate::error::{Result, UpdaterError};
use crate::types::{GitHubRepo, RepositorySummary};
use chrono::DateTime;
use reqwest::header::ACCEPT;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};
use url::Url;

pub const PER_PAGE: u32 = 100;
const ACCEPT_JSON: &str = "application/vnd.github+json";

/// Something that can hand out one page of an account's repository listing.
///
/// Page numbers start at 1. An empty page marks the end of the listing.
#[allow(async_fn_in_trait)]
pub trait RepoPageSource {
    async fn fetch_repos_page(&self, account: &str, page: u32) -> Result<Vec<GitHubRepo>>;
}

pub struct GitHubClient {
    client: Client,
    base_url: Url,
}

impl GitHubClient {
    pub fn new(config: &UpdaterConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()?;

        let base_url = Url::parse(&config.api_url)?;
        if base_url.cannot_be_a_base() {
            return Err(UpdaterError::ConfigError(format!(
                "API URL cannot be used as a base: {}",
                config.api_url
            )));
        }

        Ok(GitHubClient { client, base_url })
    }

    /// Listing endpoint for one page of an account's public repositories.
    pub fn repos_url(&self, account: &str, page: u32) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(["users", account, "repos"]);
        }
        url.query_pairs_mut()
            .clear()
            .append_pair("type", "public")
            .append_pair("sort", "updated")
            .append_pair("per_page", &PER_PAGE.to_string())
            .append_pair("page", &page.to_string());
        url
    }

    async fn check_response(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let rate_limit_remaining = response
            .headers()
            .get("X-RateLimit-Remaining")
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.parse::<u32>().ok());

        let rate_limit_reset = response
            .headers()
            .get("X-RateLimit-Reset")
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.parse::<i64>().ok())
            .and_then(|timestamp| DateTime::from_timestamp(timestamp, 0));

        match status {
            StatusCode::NOT_FOUND => Err(UpdaterError::NotFound(format!(
                "repository listing {}",
                response.url()
            ))),
            StatusCode::FORBIDDEN if rate_limit_remaining == Some(0) => {
                let reset = rate_limit_reset
                    .map(|t| t.to_rfc3339())
                    .unwrap_or_else(|| "unknown".to_string());
                Err(UpdaterError::RateLimitExceeded(format!(
                    "API rate limit exceeded. Reset at: {}",
                    reset
                )))
            }
            status => {
                let error_text = response.text().await.unwrap_or_default();
                Err(UpdaterError::ApiError(format!(
                    "API request failed with status {}: {}",
                    status, error_text
                )))
            }
        }
    }
}

impl RepoPageSource for GitHubClient {
    async fn fetch_repos_page(&self, account: &str, page: u32) -> Result<Vec<GitHubRepo>> {
        let url = self.repos_url(account, page);
        debug!(%url, page, "Requesting repository page");

        let response = self
            .client
            .get(url)
            .header(ACCEPT, ACCEPT_JSON)
            .send()
            .await?;
        let response = Self::check_response(response).await?;

        let body = response.text().await?;
        parse_repos_page(&body)
    }
}

/// Parse one listing page. The page itself must be a JSON array; elements
/// that are not repository objects are skipped.
pub fn parse_repos_page(body: &str) -> Result<Vec<GitHubRepo>> {
    let records: Vec<Value> = serde_json::from_str(body)?;

    let mut repos = Vec::with_capacity(records.len());
    for record in records {
        match GitHubRepo::deserialize(&record) {
            Ok(repo) => repos.push(repo),
            Err(e) => warn!("Skipping malformed repository record: {}", e),
        }
    }
    Ok(repos)
}

/// Fetch every page of `account`'s repositories and keep the public,
/// non-fork ones that are not the self-named profile repository, newest
/// update first.
///
/// At most `max_pages` pages are requested. A listing that is still returning
/// data on the last allowed page is an error.
pub async fn fetch_public_repos<S: RepoPageSource>(
    source: &S,
    account: &str,
    max_pages: u32,
) -> Result<Vec<RepositorySummary>> {
    let mut repos = Vec::new();
    let mut page = 1;

    loop {
        if page > max_pages {
            return Err(UpdaterError::ApiError(format!(
                "repository listing for {} did not end within {} pages",
                account, max_pages
            )));
        }

        let batch = source.fetch_repos_page(account, page).await?;
        if batch.is_empty() {
            debug!(page, "Empty page, listing complete");
            break;
        }

        info!(page, count = batch.len(), "Fetched repository page");
        repos.extend(batch.into_iter().map(RepositorySummary::from));
        page += 1;
    }

    let total = repos.len();
    let mut public = filter_public_repos(repos, account);
    sort_by_updated_desc(&mut public);

    info!(account, total, kept = public.len(), "Filtered repositories");
    Ok(public)
}

/// Drop private repositories, forks, and the repository named after the
/// account itself (compared case-insensitively).
pub fn filter_public_repos(repos: Vec<RepositorySummary>, account: &str) -> Vec<RepositorySummary> {
    let account = account.to_lowercase();
    repos
        .into_iter()
        .filter(|repo| !repo.is_private && !repo.is_fork)
        .filter(|repo| repo.name.to_lowercase() != account)
        .collect()
}

/// Newest `updated_at` first. The timestamps are fixed-width ISO-8601, so
/// string order is chronological. Missing timestamps go last; ties keep
/// their listing order.
pub fn sort_by_updated_desc(repos: &mut [RepositorySummary]) {
    repos.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
}
