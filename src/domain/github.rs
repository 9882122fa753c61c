use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Byte count for one language within a repository, descending by bytes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoLanguageBytes {
    pub name: String,
    pub bytes: i64,
}

/// A repository row of the overview. Field names follow the GitHub API
/// where they pass through unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoSummary {
    pub id: i64,
    pub name: String,
    pub html_url: String,
    pub description: Option<String>,
    /// Primary language, `Other` when GitHub reports none.
    pub language: String,
    pub langs: Vec<String>,
    #[serde(rename = "langBytes")]
    pub lang_bytes: Vec<RepoLanguageBytes>,
    pub stargazers_count: i64,
    pub forks_count: i64,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubOverview {
    pub username: String,
    pub repos: Vec<RepoSummary>,
    /// Primary language -> number of repositories.
    pub languages: BTreeMap<String, u32>,
    /// Language -> total bytes across all repositories.
    #[serde(rename = "languageBytes")]
    pub language_bytes: BTreeMap<String, i64>,
}

impl GithubOverview {
    /// Aggregate per-repo summaries into the overview maps.
    pub fn from_repos(username: impl Into<String>, repos: Vec<RepoSummary>) -> Self {
        let mut languages: BTreeMap<String, u32> = BTreeMap::new();
        let mut language_bytes: BTreeMap<String, i64> = BTreeMap::new();

        for repo in &repos {
            *languages.entry(repo.language.clone()).or_default() += 1;
            for lb in &repo.lang_bytes {
                if lb.bytes == 0 {
                    continue;
                }
                *language_bytes.entry(lb.name.clone()).or_default() += lb.bytes;
            }
        }

        Self {
            username: username.into(),
            repos,
            languages,
            language_bytes,
        }
    }
}
