use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{query, query_as};

use crate::domain::RepositoryError;
use crate::domain::books::{Book, Language, NewBook, UpdateBook};
use crate::domain::ids::BookId;
use crate::domain::repositories::BookRepository;
use crate::infrastructure::database::DatabasePool;

#[derive(Clone)]
pub struct SqlBookRepository {
    pool: DatabasePool,
}

impl SqlBookRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct BookRecord {
    id: i64,
    title: String,
    author: Option<String>,
    image_path: String,
    review: Option<String>,
    language: String,
    isbn: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<BookRecord> for Book {
    fn from(record: BookRecord) -> Self {
        Book {
            id: BookId::from(record.id),
            title: record.title,
            author: record.author,
            image_path: record.image_path,
            review: record.review,
            language: record.language.parse().unwrap_or_default(),
            isbn: record.isbn,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

const BOOK_COLUMNS: &str =
    "id, title, author, image_path, review, language, isbn, created_at, updated_at";

#[async_trait]
impl BookRepository for SqlBookRepository {
    async fn insert(&self, book: NewBook) -> Result<Book, RepositoryError> {
        let now = Utc::now();

        let record = query_as::<_, BookRecord>(&format!(
            r"INSERT INTO books (title, author, image_path, review, language, isbn, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?)
               RETURNING {BOOK_COLUMNS}",
        ))
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.image_path)
        .bind(&book.review)
        .bind(book.language.as_str())
        .bind(&book.isbn)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| RepositoryError::unexpected(e.to_string()))?;

        Ok(record.into())
    }

    async fn get(&self, id: BookId) -> Result<Book, RepositoryError> {
        let record = query_as::<_, BookRecord>(&format!(
            "SELECT {BOOK_COLUMNS} FROM books WHERE id = ?"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::unexpected(e.to_string()))?
        .ok_or(RepositoryError::NotFound)?;

        Ok(record.into())
    }

    async fn list(&self, language: Option<Language>) -> Result<Vec<Book>, RepositoryError> {
        let records = if let Some(language) = language {
            query_as::<_, BookRecord>(&format!(
                r"SELECT {BOOK_COLUMNS} FROM books
                   WHERE language = ?
                   ORDER BY created_at DESC, id DESC",
            ))
            .bind(language.as_str())
            .fetch_all(&self.pool)
            .await
        } else {
            query_as::<_, BookRecord>(&format!(
                "SELECT {BOOK_COLUMNS} FROM books ORDER BY created_at DESC, id DESC"
            ))
            .fetch_all(&self.pool)
            .await
        }
        .map_err(|e| RepositoryError::unexpected(e.to_string()))?;

        Ok(records.into_iter().map(Book::from).collect())
    }

    async fn update(&self, id: BookId, changes: UpdateBook) -> Result<Book, RepositoryError> {
        let record = query_as::<_, BookRecord>(&format!(
            r"UPDATE books
               SET title = ?,
                   author = ?,
                   review = ?,
                   isbn = ?,
                   image_path = COALESCE(?, image_path),
                   updated_at = ?
               WHERE id = ?
               RETURNING {BOOK_COLUMNS}",
        ))
        .bind(&changes.title)
        .bind(&changes.author)
        .bind(&changes.review)
        .bind(&changes.isbn)
        .bind(&changes.image_path)
        .bind(Utc::now())
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::unexpected(e.to_string()))?
        .ok_or(RepositoryError::NotFound)?;

        Ok(record.into())
    }

    async fn delete(&self, id: BookId) -> Result<(), RepositoryError> {
        let result = query("DELETE FROM books WHERE id = ?")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::unexpected(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
