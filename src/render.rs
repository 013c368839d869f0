use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::types::RepositorySummary;

pub const EMPTY_SECTION: &str =
    "_Auto-generated from public repositories. No public projects yet._";

/// Render repositories as a markdown list, one line each, in the given order.
pub fn build_section(repositories: &[RepositorySummary]) -> String {
    if repositories.is_empty() {
        return EMPTY_SECTION.to_string();
    }

    repositories
        .iter()
        .map(render_line)
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_line(repo: &RepositorySummary) -> String {
    let mut line = format!("- [{}]({})", repo.name, repo.html_url);

    if let Some(description) = &repo.description {
        line.push_str(" - ");
        line.push_str(description);
    }

    let mut meta = vec![format!("stars: {}", repo.stars)];
    if let Some(date) = repo.updated_at.as_deref().and_then(format_updated_date) {
        meta.push(format!("updated: {}", date));
    }
    line.push_str(&format!(" ({})", meta.join(", ")));

    line
}

/// Reduce an ISO-8601 timestamp to its `YYYY-MM-DD` calendar date.
///
/// Offsets are respected: the date is the one local to the timestamp's own
/// offset. Returns `None` for anything that does not parse.
pub fn format_updated_date(timestamp: &str) -> Option<String> {
    let timestamp = timestamp.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(timestamp) {
        return Some(parsed.format("%Y-%m-%d").to_string());
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(parsed.format("%Y-%m-%d").to_string());
    }
    NaiveDate::parse_from_str(timestamp, "%Y-%m-%d")
        .ok()
        .map(|date| date.format("%Y-%m-%d").to_string())
}
