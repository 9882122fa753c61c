use chrono::{DateTime, Utc};
use futures::future::join_all;
use serde::Deserialize;
use tracing::warn;

use crate::application::errors::AppError;
use crate::domain::github::{GithubOverview, RepoLanguageBytes, RepoSummary};

/// Live endpoint. Tests point this at a local mock server.
pub const API_URL: &str = "https://api.github.com";

const USER_AGENT: &str = "folio-backend";
const REPOS_PER_PAGE: u32 = 100;

/// Repository-overview client for the GitHub REST API.
#[derive(Clone)]
pub struct GithubClient {
    base_url: String,
    username: String,
    token: Option<String>,
}

impl GithubClient {
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        token: Option<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            username: username.into(),
            token: token.filter(|t| !t.is_empty()),
        }
    }

    fn request(&self, client: &reqwest::Client, url: &str) -> reqwest::RequestBuilder {
        let mut request = client
            .get(url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        request
    }

    /// Fetch the user's repositories and enrich each with its language
    /// byte breakdown, fanning the per-repo requests out concurrently.
    pub async fn overview(&self, client: &reqwest::Client) -> Result<GithubOverview, AppError> {
        let url = format!("{}/users/{}/repos", self.base_url, self.username);

        let response = self
            .request(client, &url)
            .query(&[
                ("per_page", REPOS_PER_PAGE.to_string().as_str()),
                ("sort", "updated"),
            ])
            .send()
            .await
            .map_err(|err| AppError::upstream(format!("GitHub request failed: {err}")))?;

        if !response.status().is_success() {
            return Err(AppError::upstream(format!(
                "GitHub returned status {}",
                response.status()
            )));
        }

        let repos: Vec<RepoResponse> = response
            .json()
            .await
            .map_err(|err| AppError::upstream(format!("failed to parse GitHub response: {err}")))?;

        let summaries = join_all(
            repos
                .into_iter()
                .map(|repo| self.summarize(client, repo)),
        )
        .await;

        Ok(GithubOverview::from_repos(self.username.as_str(), summaries))
    }

    async fn summarize(&self, client: &reqwest::Client, repo: RepoResponse) -> RepoSummary {
        let lang_bytes = self.languages(client, &repo.name).await;
        let langs = lang_bytes.iter().map(|lb| lb.name.clone()).collect();

        RepoSummary {
            id: repo.id,
            name: repo.name,
            html_url: repo.html_url,
            description: repo.description,
            language: repo.language.unwrap_or_else(|| "Other".to_string()),
            langs,
            lang_bytes,
            stargazers_count: repo.stargazers_count,
            forks_count: repo.forks_count,
            updated_at: repo.updated_at,
        }
    }

    /// Per-repo language bytes, descending. A failure here degrades that
    /// repo to an empty list instead of failing the whole overview.
    async fn languages(&self, client: &reqwest::Client, repo_name: &str) -> Vec<RepoLanguageBytes> {
        let url = format!("{}/repos/{}/{repo_name}/languages", self.base_url, self.username);

        let response = match self.request(client, &url).send().await {
            Ok(r) => r,
            Err(err) => {
                warn!(repo = repo_name, error = %err, "failed to fetch repo languages");
                return Vec::new();
            }
        };

        if !response.status().is_success() {
            warn!(
                repo = repo_name,
                status = %response.status(),
                "repo languages returned non-success"
            );
            return Vec::new();
        }

        let bytes_by_language: std::collections::HashMap<String, i64> = match response.json().await
        {
            Ok(map) => map,
            Err(err) => {
                warn!(repo = repo_name, error = %err, "failed to parse repo languages");
                return Vec::new();
            }
        };

        let mut entries: Vec<RepoLanguageBytes> = bytes_by_language
            .into_iter()
            .map(|(name, bytes)| RepoLanguageBytes { name, bytes })
            .collect();
        entries.sort_by(|a, b| b.bytes.cmp(&a.bytes).then_with(|| a.name.cmp(&b.name)));
        entries
    }
}

// --- GitHub API types ---

#[derive(Debug, Deserialize)]
struct RepoResponse {
    id: i64,
    name: String,
    html_url: String,
    description: Option<String>,
    language: Option<String>,
    stargazers_count: i64,
    forks_count: i64,
    updated_at: Option<DateTime<Utc>>,
}
