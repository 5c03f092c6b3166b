//! Book model and request payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr, PickFirst};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::error::{AppError, AppResult};

pub const MISSING_FIELDS: &str = "All fields are required";

/// Book record as stored and returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Identifier assigned by the store
    pub id: i64,
    pub title: String,
    pub author: String,
    pub category: String,
    pub published_year: i32,
    /// Copies currently on the shelf; the book can only be deleted at zero
    pub available_copies: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Book {
    pub fn has_copies(&self) -> bool {
        self.available_copies > 0
    }
}

/// Add book request.
///
/// Every field is optional at the wire level so that a missing field can be
/// told apart from a zero or empty value. Numbers may also be sent as numeric
/// strings (`"2020"`).
#[serde_as]
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBook {
    pub title: Option<String>,
    pub author: Option<String>,
    pub category: Option<String>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub published_year: Option<i32>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub available_copies: Option<i32>,
}

impl CreateBook {
    /// Check that all five fields are present, then validate their values.
    pub fn into_new_book(self) -> AppResult<NewBook> {
        match (
            self.title,
            self.author,
            self.category,
            self.published_year,
            self.available_copies,
        ) {
            (
                Some(title),
                Some(author),
                Some(category),
                Some(published_year),
                Some(available_copies),
            ) => {
                let book = NewBook {
                    title,
                    author,
                    category,
                    published_year,
                    available_copies,
                };
                book.validate()?;
                Ok(book)
            }
            _ => Err(AppError::Validation(MISSING_FIELDS.to_string())),
        }
    }
}

/// Validated book ready to be inserted
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct NewBook {
    #[validate(length(min = 1, message = "All fields are required"))]
    pub title: String,
    #[validate(length(min = 1, message = "All fields are required"))]
    pub author: String,
    #[validate(length(min = 1, message = "All fields are required"))]
    pub category: String,
    pub published_year: i32,
    #[validate(range(min = 0, message = "availableCopies must not be negative"))]
    pub available_copies: i32,
}

/// Update available copies request
#[serde_as]
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCount {
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[validate(range(min = 0, message = "availableCopies must not be negative"))]
    pub available_copies: Option<i32>,
}

impl UpdateCount {
    pub fn into_copies(self) -> AppResult<i32> {
        self.validate()?;
        self.available_copies
            .ok_or_else(|| AppError::Validation("availableCopies is required".to_string()))
    }
}

/// Update category request
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateCategory {
    #[validate(length(min = 1, message = "category must not be empty"))]
    pub category: Option<String>,
}

impl UpdateCategory {
    pub fn into_category(self) -> AppResult<String> {
        self.validate()?;
        self.category
            .ok_or_else(|| AppError::Validation("category is required".to_string()))
    }
}

/// Response for add and update operations
#[derive(Debug, Serialize, ToSchema)]
pub struct BookMessage {
    pub message: String,
    pub book: Book,
}

/// Response carrying only an acknowledgement message
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}
