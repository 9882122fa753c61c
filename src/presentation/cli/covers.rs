use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Args;
use serde::Deserialize;
use tracing::{info, warn};

use crate::domain::covers::CoverQuery;
use crate::infrastructure::covers::{CoverResolver, GoogleBooks, OpenLibrary};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Args)]
pub struct FetchCoversCommand {
    /// JSON file containing a list of {"title", "author", "filename"} entries
    #[arg(long)]
    pub file: PathBuf,

    /// Directory downloaded covers are written to
    #[arg(long, default_value = "public/books")]
    pub out_dir: PathBuf,

    /// Pause between books, to stay polite to the catalog APIs
    #[arg(long, default_value_t = 500)]
    pub delay_ms: u64,
}

#[derive(Debug, Deserialize)]
struct BookEntry {
    title: String,
    #[serde(default)]
    author: Option<String>,
    filename: String,
}

/// Resolve and download a cover for every book in the list, skipping files
/// that already exist. Books are processed sequentially with a delay so the
/// catalog APIs are not hammered.
pub async fn run(command: FetchCoversCommand) -> anyhow::Result<()> {
    let contents = std::fs::read_to_string(&command.file)
        .with_context(|| format!("failed to read {}", command.file.display()))?;
    let entries: Vec<BookEntry> =
        serde_json::from_str(&contents).context("invalid book list JSON")?;

    tokio::fs::create_dir_all(&command.out_dir)
        .await
        .with_context(|| format!("failed to create {}", command.out_dir.display()))?;

    let client = reqwest::ClientBuilder::new()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .context("failed to build HTTP client")?;
    let resolver = CoverResolver::new(vec![
        Arc::new(OpenLibrary::default()),
        Arc::new(GoogleBooks::default()),
    ]);

    let mut downloaded = 0usize;
    for (index, entry) in entries.iter().enumerate() {
        if index > 0 {
            tokio::time::sleep(Duration::from_millis(command.delay_ms)).await;
        }

        let dest = command.out_dir.join(&entry.filename);
        if dest.exists() {
            info!(file = %entry.filename, "cover already present, skipping");
            downloaded += 1;
            continue;
        }

        let query = CoverQuery::new(entry.title.clone(), entry.author.clone());
        let Some(result) = resolver.lookup(&client, &query).await else {
            warn!(title = %entry.title, "no cover found");
            continue;
        };

        match download(&client, &result.url, &dest).await {
            Ok(()) => {
                info!(
                    file = %entry.filename,
                    source = result.source.as_str(),
                    url = %result.url,
                    "cover downloaded"
                );
                downloaded += 1;
            }
            Err(err) => {
                warn!(title = %entry.title, error = %err, "cover download failed");
            }
        }
    }

    eprintln!("{downloaded}/{} covers in place", entries.len());

    Ok(())
}

async fn download(client: &reqwest::Client, url: &str, dest: &Path) -> anyhow::Result<()> {
    let response = client
        .get(url)
        .send()
        .await?
        .error_for_status()
        .context("cover URL returned an error status")?;

    let bytes = response.bytes().await?;
    tokio::fs::write(dest, &bytes)
        .await
        .with_context(|| format!("failed to write {}", dest.display()))?;

    Ok(())
}
