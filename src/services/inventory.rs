//! Book mutations: add, partial updates and guarded delete

use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, CreateBook, UpdateCategory, UpdateCount},
    repository::BookStore,
};

pub const COPIES_REMAIN: &str = "Cannot delete book with available copies";

#[derive(Clone)]
pub struct InventoryService {
    store: Arc<dyn BookStore>,
}

impl InventoryService {
    pub fn new(store: Arc<dyn BookStore>) -> Self {
        Self { store }
    }

    /// Validate and persist a new book
    pub async fn add_book(&self, data: CreateBook) -> AppResult<Book> {
        let new_book = data.into_new_book()?;
        let book = self.store.create(&new_book).await?;
        tracing::info!(
            "Book added: id={} title={:?} copies={}",
            book.id, book.title, book.available_copies
        );
        Ok(book)
    }

    /// Replace the available copies count, leaving other fields untouched
    pub async fn update_count(&self, id: i64, data: UpdateCount) -> AppResult<Book> {
        let copies = data.into_copies()?;
        let book = self
            .store
            .update_available_copies(id, copies)
            .await?
            .ok_or_else(AppError::book_not_found)?;
        tracing::info!("Book count updated: id={} copies={}", id, copies);
        Ok(book)
    }

    /// Replace the category, leaving other fields untouched
    pub async fn update_category(&self, id: i64, data: UpdateCategory) -> AppResult<Book> {
        let category = data.into_category()?;
        let book = self
            .store
            .update_category(id, &category)
            .await?
            .ok_or_else(AppError::book_not_found)?;
        tracing::info!("Book category updated: id={} category={:?}", id, category);
        Ok(book)
    }

    /// Delete a book, refused while copies remain on the shelf
    pub async fn delete_book(&self, id: i64) -> AppResult<()> {
        let book = self
            .store
            .get_by_id(id)
            .await?
            .ok_or_else(AppError::book_not_found)?;

        if book.has_copies() {
            tracing::warn!(
                "Refusing to delete book id={} with {} available copies",
                id, book.available_copies
            );
            return Err(AppError::InvariantViolation(COPIES_REMAIN.to_string()));
        }

        if !self.store.delete_if_no_copies(id).await? {
            // Changed between the read and the delete
            return match self.store.get_by_id(id).await? {
                Some(_) => Err(AppError::InvariantViolation(COPIES_REMAIN.to_string())),
                None => Err(AppError::book_not_found()),
            };
        }

        tracing::info!("Book deleted: id={}", id);
        Ok(())
    }
}
