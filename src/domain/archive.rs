use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::books::Language;
use crate::domain::ids::ArchiveEntryId;

/// One row of the book archive: every title/author pair ever added, kept
/// across deletions so the showcase history survives curation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveEntry {
    pub id: ArchiveEntryId,
    pub title: String,
    pub author: Option<String>,
    pub image_path: String,
    pub language: Language,
    pub isbn: Option<String>,
    pub first_added_at: DateTime<Utc>,
    pub last_seen_at: DateTime<Utc>,
    /// How many times this title/author has been (re-)added.
    pub times_added: i64,
    pub is_deleted: bool,
}

/// Upsert payload recorded whenever a book is created. Identity is the
/// (title, author) pair; re-adding bumps the counter and clears the
/// soft-delete flag.
#[derive(Debug, Clone)]
pub struct ArchiveRecord {
    pub title: String,
    pub author: Option<String>,
    pub image_path: String,
    pub language: Language,
    pub isbn: Option<String>,
}
