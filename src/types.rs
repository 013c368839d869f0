use serde::{Deserialize, Deserializer};
use serde_json::Value;

// GitHub API response structures.
//
// Every field is optional on the wire and wrong-typed values are read as
// absent, so one odd record never rejects the page it came in.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GitHubRepo {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub html_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub stargazers_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub updated_at: Option<String>,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub private: Option<bool>,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub fork: Option<bool>,
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

/// Non-negative integers, integral floats and numeric strings; anything else
/// is absent.
fn lenient_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u64>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0 && f.fract() == 0.0)
                .map(|f| f as u64)
        }),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    })
}

/// Flags follow JSON truthiness, so a record that says `"private": 1` is
/// still treated as private.
fn lenient_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<bool>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::Bool(b) => Some(b),
        Value::Number(n) => Some(n.as_f64().map_or(true, |f| f != 0.0)),
        Value::String(s) => Some(!s.is_empty()),
        Value::Array(items) => Some(!items.is_empty()),
        Value::Object(fields) => Some(!fields.is_empty()),
    })
}

/// A repository as seen by the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositorySummary {
    pub name: String,
    pub html_url: String,
    /// Trimmed; `None` when absent or blank.
    pub description: Option<String>,
    pub stars: u64,
    /// Raw ISO-8601 timestamp; `None` when absent or empty.
    pub updated_at: Option<String>,
    pub is_private: bool,
    pub is_fork: bool,
}

impl From<GitHubRepo> for RepositorySummary {
    fn from(repo: GitHubRepo) -> Self {
        let description = repo
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        let updated_at = repo.updated_at.filter(|u| !u.is_empty());

        RepositorySummary {
            name: repo.name.unwrap_or_default(),
            html_url: repo.html_url.unwrap_or_default(),
            description,
            stars: repo.stargazers_count.unwrap_or(0),
            updated_at,
            is_private: repo.private.unwrap_or(false),
            is_fork: repo.fork.unwrap_or(false),
        }
    }
}
