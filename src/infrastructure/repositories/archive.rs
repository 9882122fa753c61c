use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{query, query_as};

use crate::domain::RepositoryError;
use crate::domain::archive::{ArchiveEntry, ArchiveRecord};
use crate::domain::ids::ArchiveEntryId;
use crate::domain::repositories::ArchiveRepository;
use crate::infrastructure::database::DatabasePool;

#[derive(Clone)]
pub struct SqlArchiveRepository {
    pool: DatabasePool,
}

impl SqlArchiveRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ArchiveEntryRecord {
    id: i64,
    title: String,
    author: String,
    image_path: String,
    language: String,
    isbn: Option<String>,
    first_added_at: DateTime<Utc>,
    last_seen_at: DateTime<Utc>,
    times_added: i64,
    is_deleted: bool,
}

impl From<ArchiveEntryRecord> for ArchiveEntry {
    fn from(record: ArchiveEntryRecord) -> Self {
        ArchiveEntry {
            id: ArchiveEntryId::from(record.id),
            title: record.title,
            // Stored as '' so the UNIQUE (title, author) pair has a single
            // identity for author-less books.
            author: Some(record.author).filter(|a| !a.is_empty()),
            image_path: record.image_path,
            language: record.language.parse().unwrap_or_default(),
            isbn: record.isbn,
            first_added_at: record.first_added_at,
            last_seen_at: record.last_seen_at,
            times_added: record.times_added,
            is_deleted: record.is_deleted,
        }
    }
}

#[async_trait]
impl ArchiveRepository for SqlArchiveRepository {
    async fn record_added(&self, record: ArchiveRecord) -> Result<(), RepositoryError> {
        let now = Utc::now();

        query(
            r"INSERT INTO book_archive
                  (title, author, image_path, language, isbn, first_added_at, last_seen_at)
               VALUES (?, ?, ?, ?, ?, ?, ?)
               ON CONFLICT (title, author) DO UPDATE SET
                   last_seen_at = excluded.last_seen_at,
                   times_added = times_added + 1,
                   is_deleted = 0,
                   image_path = excluded.image_path",
        )
        .bind(&record.title)
        .bind(record.author.as_deref().unwrap_or_default())
        .bind(&record.image_path)
        .bind(record.language.as_str())
        .bind(&record.isbn)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::unexpected(e.to_string()))?;

        Ok(())
    }

    async fn mark_deleted(
        &self,
        title: &str,
        author: Option<&str>,
    ) -> Result<(), RepositoryError> {
        query("UPDATE book_archive SET is_deleted = 1 WHERE title = ? AND author = ?")
            .bind(title)
            .bind(author.unwrap_or_default())
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::unexpected(e.to_string()))?;

        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<ArchiveEntry>, RepositoryError> {
        let records = query_as::<_, ArchiveEntryRecord>(
            r"SELECT id, title, author, image_path, language, isbn,
                      first_added_at, last_seen_at, times_added, is_deleted
               FROM book_archive
               ORDER BY first_added_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::unexpected(e.to_string()))?;

        Ok(records.into_iter().map(ArchiveEntry::from).collect())
    }
}
