use std::path::PathBuf;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::Utc;
use thiserror::Error;

use crate::domain::books::Language;
use crate::domain::slug::to_slug;

/// Public URL prefix the frontend uses for stored covers.
const PUBLIC_PREFIX: &str = "/books";

const JPEG_QUALITY: u8 = 90;

#[derive(Debug, Error)]
pub enum CoverStoreError {
    #[error("invalid cover image: {0}")]
    InvalidImage(String),

    #[error("failed to store cover image: {0}")]
    Io(#[from] std::io::Error),
}

/// Writes uploaded cover images into the covers directory, re-encoded as
/// JPEG under a slugged filename.
pub struct CoverStore {
    dir: PathBuf,
}

impl CoverStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Decode a base64 data URL, re-encode the image as JPEG and write it
    /// to `<dir>/<file_name>`. Returns the public `/books/...` path.
    pub async fn save_data_url(
        &self,
        data_url: &str,
        file_name: &str,
    ) -> Result<String, CoverStoreError> {
        let bytes = decode_data_url(data_url)?;

        let jpeg = tokio::task::spawn_blocking(move || encode_jpeg(&bytes))
            .await
            .map_err(|err| CoverStoreError::InvalidImage(format!("processing task failed: {err}")))??;

        tokio::fs::create_dir_all(&self.dir).await?;
        tokio::fs::write(self.dir.join(file_name), &jpeg).await?;

        Ok(format!("{PUBLIC_PREFIX}/{file_name}"))
    }
}

/// Build a cover filename from title/author slugs.
///
/// Korean titles that romanize to nothing usable get a timestamped
/// `korean-book-*` name instead; an unusable author slug is dropped rather
/// than embedded.
pub fn cover_file_name(title: &str, author: Option<&str>, language: Language) -> String {
    let title_slug = to_slug(title);

    if language == Language::Ko && title_slug == "unknown" {
        return format!("korean-book-{}.jpg", Utc::now().timestamp_millis());
    }

    let author_slug = author.map(to_slug).filter(|slug| slug != "unknown");
    match author_slug {
        Some(author_slug) => format!("{title_slug}_{author_slug}.jpg"),
        None => format!("{title_slug}.jpg"),
    }
}

/// Strip a `data:<mime>;base64,` prefix if present and decode the payload.
fn decode_data_url(data_url: &str) -> Result<Vec<u8>, CoverStoreError> {
    let payload = if data_url.starts_with("data:") {
        data_url
            .split_once(',')
            .map(|(_, payload)| payload)
            .ok_or_else(|| CoverStoreError::InvalidImage("malformed data URL".to_string()))?
    } else {
        data_url
    };

    let bytes = BASE64
        .decode(payload.trim())
        .map_err(|err| CoverStoreError::InvalidImage(format!("invalid base64: {err}")))?;

    if bytes.is_empty() {
        return Err(CoverStoreError::InvalidImage("empty image payload".to_string()));
    }

    Ok(bytes)
}

fn encode_jpeg(bytes: &[u8]) -> Result<Vec<u8>, CoverStoreError> {
    let decoded = image::load_from_memory(bytes)
        .map_err(|err| CoverStoreError::InvalidImage(err.to_string()))?;

    let mut out = Vec::new();
    let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY);
    decoded
        .write_with_encoder(encoder)
        .map_err(|err| CoverStoreError::InvalidImage(err.to_string()))?;

    Ok(out)
}
