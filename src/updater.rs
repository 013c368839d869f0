use std::fs;

use tracing::info;

use crate::config::UpdaterConfig;
use crate::error::Result;
use crate::github::{fetch_public_repos, RepoPageSource};
use crate::render::build_section;
use crate::splice::replace_block;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated,
    UpToDate,
}

/// Regenerate the public projects section of the configured README.
///
/// The file is written only when the regenerated text differs from what is
/// on disk. Missing markers are reported before any request is made.
pub async fn update_readme<S: RepoPageSource>(
    config: &UpdaterConfig,
    source: &S,
) -> Result<UpdateOutcome> {
    config.validate()?;

    let readme = fs::read_to_string(&config.readme_path)?;
    config.markers.locate(&readme)?;

    let repos = fetch_public_repos(source, &config.account, config.max_pages).await?;
    let section = build_section(&repos);
    let updated = replace_block(&readme, &section, &config.markers)?;

    if updated == readme {
        info!(path = %config.readme_path.display(), "README unchanged");
        return Ok(UpdateOutcome::UpToDate);
    }

    fs::write(&config.readme_path, updated)?;
    info!(
        path = %config.readme_path.display(),
        repositories = repos.len(),
        "README public projects section rewritten"
    );
    Ok(UpdateOutcome::Updated)
}
