use serde::{Deserialize, Serialize};

/// Default placeholder served when no external source yields a cover.
pub const DEFAULT_COVER_PATH: &str = "/books/default-book-cover.jpg";

/// A cover lookup request. Built per call, never persisted.
#[derive(Debug, Clone)]
pub struct CoverQuery {
    pub title: String,
    pub author: Option<String>,
}

impl CoverQuery {
    /// Trims both fields; an empty author collapses to `None`.
    pub fn new(title: impl Into<String>, author: Option<String>) -> Self {
        let author = author
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty());
        Self {
            title: title.into().trim().to_string(),
            author,
        }
    }
}

/// Provenance of a resolved cover URL.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum CoverSource {
    #[serde(rename = "Open Library")]
    OpenLibrary,
    #[serde(rename = "Google Books")]
    GoogleBooks,
    Fallback,
}

impl CoverSource {
    pub const fn as_str(self) -> &'static str {
        match self {
            CoverSource::OpenLibrary => "Open Library",
            CoverSource::GoogleBooks => "Google Books",
            CoverSource::Fallback => "Fallback",
        }
    }
}

/// The single best-effort answer of the resolver. `url` is never empty;
/// the fallback step guarantees it.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct CoverResult {
    pub url: String,
    pub source: CoverSource,
}

/// One option of the multi-source search, surfaced for interactive
/// selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverCandidate {
    pub id: String,
    pub source: CoverSource,
    pub title: String,
    pub author: String,
    pub cover_url: String,
    pub published_date: String,
    pub description: String,
}
