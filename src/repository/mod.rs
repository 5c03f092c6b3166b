//! Repository layer for book storage

pub mod books;
pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::book::{Book, NewBook},
};

/// Record store for books.
///
/// Lookups return `Ok(None)` for a missing id; `Err` is reserved for store failures.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    /// All books in ascending id order
    async fn list(&self) -> AppResult<Vec<Book>>;

    async fn get_by_id(&self, id: i64) -> AppResult<Option<Book>>;

    /// Books whose category matches exactly (case-sensitive)
    async fn list_by_category(&self, category: &str) -> AppResult<Vec<Book>>;

    async fn list_by_year(&self, year: i32) -> AppResult<Vec<Book>>;

    /// Insert a book, the store assigns its id
    async fn create(&self, book: &NewBook) -> AppResult<Book>;

    async fn update_available_copies(&self, id: i64, copies: i32) -> AppResult<Option<Book>>;

    async fn update_category(&self, id: i64, category: &str) -> AppResult<Option<Book>>;

    /// Remove the book only if it has no copies left.
    /// Returns false when nothing was removed.
    async fn delete_if_no_copies(&self, id: i64) -> AppResult<bool>;

    /// Check that the store is reachable
    async fn ping(&self) -> AppResult<()>;
}

/// Main repository struct holding the book store handle
#[derive(Clone)]
pub struct Repository {
    pub books: Arc<dyn BookStore>,
}

impl Repository {
    /// Create a repository backed by PostgreSQL
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self::with_store(Arc::new(books::BooksRepository::new(pool)))
    }

    /// Create a repository backed by a process-local store
    pub fn in_memory() -> Self {
        Self::with_store(Arc::new(memory::MemoryBookStore::new()))
    }

    pub fn with_store(books: Arc<dyn BookStore>) -> Self {
        Self { books }
    }
}
