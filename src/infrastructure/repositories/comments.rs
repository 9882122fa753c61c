use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::query_as;

use crate::domain::RepositoryError;
use crate::domain::comments::{Comment, NewComment};
use crate::domain::ids::CommentId;
use crate::domain::repositories::CommentRepository;
use crate::infrastructure::database::DatabasePool;

#[derive(Clone)]
pub struct SqlCommentRepository {
    pool: DatabasePool,
}

impl SqlCommentRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct CommentRecord {
    id: i64,
    name: String,
    relationship: Option<String>,
    message: String,
    created_at: DateTime<Utc>,
}

impl From<CommentRecord> for Comment {
    fn from(record: CommentRecord) -> Self {
        Comment {
            id: CommentId::from(record.id),
            name: record.name,
            relationship: record.relationship,
            message: record.message,
            created_at: record.created_at,
        }
    }
}

#[async_trait]
impl CommentRepository for SqlCommentRepository {
    async fn insert(&self, comment: NewComment) -> Result<Comment, RepositoryError> {
        let record = query_as::<_, CommentRecord>(
            r"INSERT INTO comments (name, relationship, message, created_at)
               VALUES (?, ?, ?, ?)
               RETURNING id, name, relationship, message, created_at",
        )
        .bind(&comment.name)
        .bind(&comment.relationship)
        .bind(&comment.message)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| RepositoryError::unexpected(e.to_string()))?;

        Ok(record.into())
    }

    async fn get(&self, id: CommentId) -> Result<Comment, RepositoryError> {
        let record = query_as::<_, CommentRecord>(
            r"SELECT id, name, relationship, message, created_at
               FROM comments WHERE id = ?",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::unexpected(e.to_string()))?
        .ok_or(RepositoryError::NotFound)?;

        Ok(record.into())
    }

    async fn list_recent(&self, take: u32) -> Result<Vec<Comment>, RepositoryError> {
        let records = query_as::<_, CommentRecord>(
            r"SELECT id, name, relationship, message, created_at
               FROM comments
               ORDER BY created_at DESC, id DESC
               LIMIT ?",
        )
        .bind(i64::from(take))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::unexpected(e.to_string()))?;

        Ok(records.into_iter().map(Comment::from).collect())
    }
}
