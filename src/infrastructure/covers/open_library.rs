use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

use crate::domain::covers::{CoverCandidate, CoverQuery, CoverSource};
use crate::infrastructure::covers::CoverProvider;

/// Live endpoints. Tests point both at a local mock server.
pub const SEARCH_URL: &str = "https://openlibrary.org";
pub const COVERS_URL: &str = "https://covers.openlibrary.org";

/// Cover lookup against the Open Library search API.
///
/// A search hit yields a cover URL from the numeric cover identifier when
/// present, falling back to the first ISBN. All failures collapse to "no
/// cover found".
pub struct OpenLibrary {
    base_url: String,
    covers_url: String,
}

impl OpenLibrary {
    pub fn new(base_url: impl Into<String>, covers_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            covers_url: covers_url.into(),
        }
    }

    fn query_string(query: &CoverQuery) -> String {
        match &query.author {
            Some(author) => format!("title:{} author:{}", query.title, author),
            None => query.title.clone(),
        }
    }

    async fn first_doc(&self, client: &reqwest::Client, query: &CoverQuery) -> Option<SearchDoc> {
        let url = format!("{}/search.json", self.base_url);
        let q = Self::query_string(query);

        let response = match client
            .get(&url)
            .query(&[("q", q.as_str()), ("limit", "1")])
            .send()
            .await
        {
            Ok(r) => r,
            Err(err) => {
                warn!(error = %err, title = %query.title, "open library search request failed");
                return None;
            }
        };

        if !response.status().is_success() {
            warn!(
                status = %response.status(),
                title = %query.title,
                "open library search returned non-success"
            );
            return None;
        }

        let body: SearchResponse = match response.json().await {
            Ok(b) => b,
            Err(err) => {
                warn!(error = %err, title = %query.title, "failed to parse open library response");
                return None;
            }
        };

        body.docs.into_iter().next()
    }

    /// Cover identifier takes priority over ISBN; a doc with neither has no
    /// usable cover.
    fn cover_url(&self, doc: &SearchDoc) -> Option<String> {
        if let Some(id) = doc.cover_i {
            return Some(format!("{}/b/id/{id}-L.jpg", self.covers_url));
        }
        doc.isbn
            .as_ref()
            .and_then(|isbns| isbns.first())
            .map(|isbn| format!("{}/b/isbn/{isbn}-L.jpg", self.covers_url))
    }
}

impl Default for OpenLibrary {
    fn default() -> Self {
        Self::new(SEARCH_URL, COVERS_URL)
    }
}

#[async_trait]
impl CoverProvider for OpenLibrary {
    fn source(&self) -> CoverSource {
        CoverSource::OpenLibrary
    }

    async fn lookup(&self, client: &reqwest::Client, query: &CoverQuery) -> Option<String> {
        let doc = self.first_doc(client, query).await?;
        self.cover_url(&doc)
    }

    async fn search(&self, client: &reqwest::Client, query: &CoverQuery) -> Vec<CoverCandidate> {
        let Some(doc) = self.first_doc(client, query).await else {
            return Vec::new();
        };
        let Some(cover_url) = self.cover_url(&doc) else {
            return Vec::new();
        };

        vec![CoverCandidate {
            id: "openlibrary-1".to_string(),
            source: CoverSource::OpenLibrary,
            title: doc.title.unwrap_or_else(|| query.title.clone()),
            author: doc
                .author_name
                .and_then(|names| names.into_iter().next())
                .or_else(|| query.author.clone())
                .unwrap_or_default(),
            cover_url,
            published_date: doc
                .first_publish_year
                .map(|y| y.to_string())
                .unwrap_or_default(),
            description: "From Open Library (high quality)".to_string(),
        }]
    }
}

// --- Open Library API types ---

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    docs: Vec<SearchDoc>,
}

#[derive(Debug, Deserialize)]
struct SearchDoc {
    cover_i: Option<i64>,
    isbn: Option<Vec<String>>,
    title: Option<String>,
    author_name: Option<Vec<String>>,
    first_publish_year: Option<i32>,
}
