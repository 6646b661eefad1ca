//! Book (catalog entry) model and request payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use std::borrow::Cow;

use validator::{Validate, ValidationError};

pub const BOOK_NOT_FOUND: &str = "Book not found";
pub const TITLE_AUTHOR_REQUIRED: &str = "Title and author must not be empty";

/// Book record as stored and returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author: String,
    /// Copies currently available for borrowing
    pub stock: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create book request
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "require_title_and_author", skip_on_field_errors = false))]
pub struct CreateBook {
    pub title: Option<String>,
    pub author: Option<String>,
    /// Defaults to the configured stock when omitted
    #[validate(range(min = 0, message = "Stock must not be negative"))]
    pub stock: Option<i32>,
}

impl CreateBook {
    /// Trim text fields so that blank values fail validation
    pub fn normalized(self) -> Self {
        Self {
            title: self.title.map(|t| t.trim().to_string()),
            author: self.author.map(|a| a.trim().to_string()),
            stock: self.stock,
        }
    }
}

/// Title and author must both be present and non-empty
fn require_title_and_author(book: &CreateBook) -> Result<(), ValidationError> {
    let filled = |value: &Option<String>| value.as_deref().is_some_and(|v| !v.is_empty());

    if filled(&book.title) && filled(&book.author) {
        Ok(())
    } else {
        let mut error = ValidationError::new("title_author_required");
        error.message = Some(Cow::Borrowed(TITLE_AUTHOR_REQUIRED));
        Err(error)
    }
}

/// Validated book ready to be inserted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub stock: i32,
}

/// Partial update; absent or null fields are left unchanged
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "Author must not be empty"))]
    pub author: Option<String>,
    #[validate(range(min = 0, message = "Stock must not be negative"))]
    pub stock: Option<i32>,
}

impl UpdateBook {
    pub fn normalized(self) -> Self {
        Self {
            title: self.title.map(|t| t.trim().to_string()),
            author: self.author.map(|a| a.trim().to_string()),
            stock: self.stock,
        }
    }

    /// Apply the present fields onto an existing record
    pub fn apply(&self, book: &mut Book) {
        if let Some(ref title) = self.title {
            book.title = title.clone();
        }
        if let Some(ref author) = self.author {
            book.author = author.clone();
        }
        if let Some(stock) = self.stock {
            book.stock = stock;
        }
    }
}
