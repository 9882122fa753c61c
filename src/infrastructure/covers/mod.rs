//! Multi-source book-cover resolution.
//!
//! Each external catalog is an adapter behind [`CoverProvider`]; the
//! [`CoverResolver`] walks an ordered provider chain with short-circuit on
//! the first hit and an unconditional local fallback, so resolution itself
//! can never fail.

pub mod google_books;
pub mod open_library;

pub use google_books::GoogleBooks;
pub use open_library::OpenLibrary;

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;

use crate::domain::covers::{
    CoverCandidate, CoverQuery, CoverResult, CoverSource, DEFAULT_COVER_PATH,
};

/// An adapter translating a generic cover lookup into one external API's
/// protocol. Implementations contain their own failures: transport and
/// parse errors are logged and collapse to `None` / empty, never returned.
#[async_trait]
pub trait CoverProvider: Send + Sync {
    fn source(&self) -> CoverSource;

    /// Best single cover URL for the query, or `None`.
    async fn lookup(&self, client: &reqwest::Client, query: &CoverQuery) -> Option<String>;

    /// Every candidate cover this source offers for the query.
    async fn search(&self, client: &reqwest::Client, query: &CoverQuery) -> Vec<CoverCandidate>;
}

/// Ordered cover-provider chain. The order is configuration, not law:
/// callers construct the chain in whatever priority they want (Open Library
/// first by default, its covers tend to be larger).
pub struct CoverResolver {
    providers: Vec<Arc<dyn CoverProvider>>,
    default_fallback: String,
}

impl CoverResolver {
    pub fn new(providers: Vec<Arc<dyn CoverProvider>>) -> Self {
        Self {
            providers,
            default_fallback: DEFAULT_COVER_PATH.to_string(),
        }
    }

    /// Replace the hard-coded placeholder used when no fallback argument is
    /// supplied per call.
    pub fn with_default_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.default_fallback = fallback.into();
        self
    }

    /// The placeholder path used when every source comes up empty.
    pub fn fallback_path(&self) -> &str {
        &self.default_fallback
    }

    /// The remote-only part of resolution: walk the chain in order, first
    /// non-`None` lookup wins with its provider's source tag. Later
    /// providers are never queried once one hits.
    pub async fn lookup(
        &self,
        client: &reqwest::Client,
        query: &CoverQuery,
    ) -> Option<CoverResult> {
        for provider in &self.providers {
            if let Some(url) = provider.lookup(client, query).await {
                return Some(CoverResult {
                    url,
                    source: provider.source(),
                });
            }
        }
        None
    }

    /// Resolve a cover, always producing a usable URL: the chain's first
    /// hit, else `fallback`, else the default placeholder.
    pub async fn resolve(
        &self,
        client: &reqwest::Client,
        query: &CoverQuery,
        fallback: Option<&str>,
    ) -> CoverResult {
        if let Some(result) = self.lookup(client, query).await {
            return result;
        }

        CoverResult {
            url: fallback.unwrap_or(&self.default_fallback).to_string(),
            source: CoverSource::Fallback,
        }
    }

    /// Query every provider concurrently and merge their candidates
    /// preserving chain order, for interactive user selection.
    pub async fn search_candidates(
        &self,
        client: &reqwest::Client,
        query: &CoverQuery,
    ) -> Vec<CoverCandidate> {
        let lookups: Vec<_> = self
            .providers
            .iter()
            .map(|provider| provider.search(client, query))
            .collect();

        join_all(lookups).await.into_iter().flatten().collect()
    }
}
