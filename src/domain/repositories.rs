use async_trait::async_trait;

use crate::domain::RepositoryError;
use crate::domain::archive::{ArchiveEntry, ArchiveRecord};
use crate::domain::books::{Book, Language, NewBook, UpdateBook};
use crate::domain::comments::{Comment, NewComment};
use crate::domain::ids::{BookId, CommentId};

#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn insert(&self, comment: NewComment) -> Result<Comment, RepositoryError>;
    async fn get(&self, id: CommentId) -> Result<Comment, RepositoryError>;
    /// Newest first, at most `take` rows.
    async fn list_recent(&self, take: u32) -> Result<Vec<Comment>, RepositoryError>;
}

#[async_trait]
pub trait BookRepository: Send + Sync {
    async fn insert(&self, book: NewBook) -> Result<Book, RepositoryError>;
    async fn get(&self, id: BookId) -> Result<Book, RepositoryError>;
    /// Newest first, optionally filtered by language.
    async fn list(&self, language: Option<Language>) -> Result<Vec<Book>, RepositoryError>;
    async fn update(&self, id: BookId, changes: UpdateBook) -> Result<Book, RepositoryError>;
    async fn delete(&self, id: BookId) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait ArchiveRepository: Send + Sync {
    /// Upsert on (title, author): first add inserts, re-adds bump the
    /// counter, refresh `last_seen_at` and clear the soft-delete flag.
    async fn record_added(&self, record: ArchiveRecord) -> Result<(), RepositoryError>;
    /// Soft-delete every entry matching the title/author pair.
    async fn mark_deleted(&self, title: &str, author: Option<&str>)
    -> Result<(), RepositoryError>;
    /// Full history, most recently first-added first.
    async fn list_all(&self) -> Result<Vec<ArchiveEntry>, RepositoryError>;
}
