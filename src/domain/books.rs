use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::ids::BookId;

pub const MAX_TITLE_LEN: usize = 200;
pub const MAX_AUTHOR_LEN: usize = 150;
pub const MAX_REVIEW_LEN: usize = 500;
pub const MAX_ISBN_LEN: usize = 20;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ko,
}

impl Language {
    pub const fn as_str(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ko => "ko",
        }
    }
}

impl FromStr for Language {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "en" => Ok(Language::En),
            "ko" => Ok(Language::Ko),
            _ => Err(()),
        }
    }
}

/// A showcased book. Serialized in camelCase because the frontend consumes
/// these records directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: Option<String>,
    pub image_path: String,
    pub review: Option<String>,
    pub language: Language,
    pub isbn: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBook {
    pub title: String,
    #[serde(default)]
    pub author: Option<String>,
    /// Resolved or user-chosen cover path. Never empty once validated.
    pub image_path: String,
    #[serde(default)]
    pub review: Option<String>,
    #[serde(default)]
    pub language: Language,
    #[serde(default)]
    pub isbn: Option<String>,
}

impl NewBook {
    pub fn normalize(mut self) -> Self {
        self.title = self.title.trim().to_string();
        self.author = normalize_optional_field(self.author);
        self.review = normalize_optional_field(self.review);
        self.isbn = normalize_optional_field(self.isbn);
        self
    }

    /// Field-level constraints matching the request-validation boundary.
    /// Expects a normalized value.
    pub fn validate(&self) -> Result<(), String> {
        validate_book_fields(
            Some(&self.title),
            self.author.as_deref(),
            self.review.as_deref(),
            self.isbn.as_deref(),
        )
    }
}

/// Full-replace update: every field is rewritten except `image_path`,
/// which only changes when present.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBook {
    pub title: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub review: Option<String>,
    #[serde(default)]
    pub isbn: Option<String>,
    #[serde(default)]
    pub image_path: Option<String>,
}

impl UpdateBook {
    pub fn normalize(mut self) -> Self {
        self.title = self.title.trim().to_string();
        self.author = normalize_optional_field(self.author);
        self.review = normalize_optional_field(self.review);
        self.isbn = normalize_optional_field(self.isbn);
        self.image_path = self.image_path.filter(|p| !p.trim().is_empty());
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        validate_book_fields(
            Some(&self.title),
            self.author.as_deref(),
            self.review.as_deref(),
            self.isbn.as_deref(),
        )
    }
}

fn validate_book_fields(
    title: Option<&str>,
    author: Option<&str>,
    review: Option<&str>,
    isbn: Option<&str>,
) -> Result<(), String> {
    if let Some(title) = title {
        if title.is_empty() {
            return Err("title is required".to_string());
        }
        if title.chars().count() > MAX_TITLE_LEN {
            return Err(format!("title must be at most {MAX_TITLE_LEN} characters"));
        }
    }
    if let Some(author) = author
        && author.chars().count() > MAX_AUTHOR_LEN
    {
        return Err(format!("author must be at most {MAX_AUTHOR_LEN} characters"));
    }
    if let Some(review) = review
        && review.chars().count() > MAX_REVIEW_LEN
    {
        return Err(format!("review must be at most {MAX_REVIEW_LEN} characters"));
    }
    if let Some(isbn) = isbn
        && isbn.chars().count() > MAX_ISBN_LEN
    {
        return Err(format!("isbn must be at most {MAX_ISBN_LEN} characters"));
    }
    Ok(())
}

fn normalize_optional_field(value: Option<String>) -> Option<String> {
    value.and_then(|raw| {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}
