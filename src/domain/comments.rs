use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::ids::CommentId;

pub const MAX_NAME_LEN: usize = 120;
pub const MAX_RELATIONSHIP_LEN: usize = 80;
pub const MAX_MESSAGE_LEN: usize = 500;

/// Maximum comments returned per listing request.
pub const MAX_COMMENT_TAKE: u32 = 100;
pub const DEFAULT_COMMENT_TAKE: u32 = 20;

/// A visitor comment, newest shown first.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentId,
    pub name: String,
    pub relationship: Option<String>,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    pub name: String,
    #[serde(default)]
    pub relationship: Option<String>,
    pub message: String,
}

impl NewComment {
    pub fn normalize(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self.message = self.message.trim().to_string();
        self.relationship = self.relationship.and_then(|raw| {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        });
        self
    }

    /// Expects a normalized value.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.is_empty() {
            return Err("name is required".to_string());
        }
        if self.name.chars().count() > MAX_NAME_LEN {
            return Err(format!("name must be at most {MAX_NAME_LEN} characters"));
        }
        if let Some(relationship) = &self.relationship
            && relationship.chars().count() > MAX_RELATIONSHIP_LEN
        {
            return Err(format!(
                "relationship must be at most {MAX_RELATIONSHIP_LEN} characters"
            ));
        }
        if self.message.is_empty() {
            return Err("message is required".to_string());
        }
        if self.message.chars().count() > MAX_MESSAGE_LEN {
            return Err(format!(
                "message must be at most {MAX_MESSAGE_LEN} characters"
            ));
        }
        Ok(())
    }
}
