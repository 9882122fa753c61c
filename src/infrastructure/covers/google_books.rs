use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

use crate::domain::covers::{CoverCandidate, CoverQuery, CoverSource};
use crate::infrastructure::covers::CoverProvider;

/// Live endpoint. Tests point this at a local mock server.
pub const VOLUMES_URL: &str = "https://www.googleapis.com/books/v1";

const GOOGLE_IMAGE_HOST: &str = "books.google.com";
const MAX_SEARCH_RESULTS: u32 = 5;
const DESCRIPTION_PREVIEW_CHARS: usize = 150;

/// Cover lookup against the Google Books volumes API.
pub struct GoogleBooks {
    base_url: String,
}

impl GoogleBooks {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    fn query_string(query: &CoverQuery) -> String {
        match &query.author {
            Some(author) => format!("{}+inauthor:{}", query.title, author),
            None => query.title.clone(),
        }
    }

    async fn volumes(
        &self,
        client: &reqwest::Client,
        query: &CoverQuery,
        max_results: u32,
    ) -> Vec<Volume> {
        let url = format!("{}/volumes", self.base_url);
        let q = Self::query_string(query);

        let response = match client
            .get(&url)
            .query(&[("q", q.as_str()), ("maxResults", &max_results.to_string())])
            .send()
            .await
        {
            Ok(r) => r,
            Err(err) => {
                warn!(error = %err, title = %query.title, "google books request failed");
                return Vec::new();
            }
        };

        if !response.status().is_success() {
            warn!(
                status = %response.status(),
                title = %query.title,
                "google books returned non-success"
            );
            return Vec::new();
        }

        match response.json::<VolumesResponse>().await {
            Ok(body) => body.items,
            Err(err) => {
                warn!(error = %err, title = %query.title, "failed to parse google books response");
                Vec::new()
            }
        }
    }

    fn candidate(query: &CoverQuery, volume: Volume) -> Option<CoverCandidate> {
        let info = volume.volume_info;
        let image = info.image_links.as_ref().and_then(ImageLinks::best)?;

        Some(CoverCandidate {
            id: volume.id.unwrap_or_default(),
            source: CoverSource::GoogleBooks,
            title: info.title.unwrap_or_else(|| query.title.clone()),
            author: info
                .authors
                .map(|names| names.join(", "))
                .or_else(|| query.author.clone())
                .unwrap_or_default(),
            cover_url: enhance_image_quality(image),
            published_date: info.published_date.unwrap_or_default(),
            description: info
                .description
                .map(|d| truncate_description(&d))
                .unwrap_or_default(),
        })
    }
}

impl Default for GoogleBooks {
    fn default() -> Self {
        Self::new(VOLUMES_URL)
    }
}

#[async_trait]
impl CoverProvider for GoogleBooks {
    fn source(&self) -> CoverSource {
        CoverSource::GoogleBooks
    }

    async fn lookup(&self, client: &reqwest::Client, query: &CoverQuery) -> Option<String> {
        let volumes = self.volumes(client, query, 1).await;
        let volume = volumes.into_iter().next()?;
        let image = volume
            .volume_info
            .image_links
            .as_ref()
            .and_then(ImageLinks::best)?;
        Some(enhance_image_quality(image))
    }

    async fn search(&self, client: &reqwest::Client, query: &CoverQuery) -> Vec<CoverCandidate> {
        self.volumes(client, query, MAX_SEARCH_RESULTS)
            .await
            .into_iter()
            .filter_map(|volume| Self::candidate(query, volume))
            .collect()
    }
}

/// Upscale a Google Books thumbnail via URL parameters: bump `zoom=1` to
/// `zoom=3`, and request an 800px-wide rendition when the Google image host
/// offers one. Applying it twice yields the same string as applying it once.
pub fn enhance_image_quality(url: &str) -> String {
    let mut enhanced = url.replace("zoom=1", "zoom=3");
    if enhanced.contains(GOOGLE_IMAGE_HOST) && !enhanced.contains("&fife=") {
        enhanced.push_str("&fife=w800");
    }
    enhanced
}

fn truncate_description(description: &str) -> String {
    if description.chars().count() <= DESCRIPTION_PREVIEW_CHARS {
        return description.to_string();
    }
    let mut preview: String = description.chars().take(DESCRIPTION_PREVIEW_CHARS).collect();
    preview.push_str("...");
    preview
}

// --- Google Books API types ---

#[derive(Debug, Deserialize)]
struct VolumesResponse {
    #[serde(default)]
    items: Vec<Volume>,
}

#[derive(Debug, Deserialize)]
struct Volume {
    id: Option<String>,
    #[serde(rename = "volumeInfo", default)]
    volume_info: VolumeInfo,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VolumeInfo {
    title: Option<String>,
    authors: Option<Vec<String>>,
    published_date: Option<String>,
    description: Option<String>,
    image_links: Option<ImageLinks>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImageLinks {
    large: Option<String>,
    thumbnail: Option<String>,
    small_thumbnail: Option<String>,
}

impl ImageLinks {
    /// Largest available rendition wins.
    fn best(&self) -> Option<&String> {
        self.large
            .as_ref()
            .or(self.thumbnail.as_ref())
            .or(self.small_thumbnail.as_ref())
    }
}
