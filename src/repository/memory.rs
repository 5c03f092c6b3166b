//! In-process book store, used for development and tests

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::BookStore;
use crate::{
    error::AppResult,
    models::book::{Book, NewBook},
};

#[derive(Default)]
struct Inner {
    next_id: i64,
    books: BTreeMap<i64, Book>,
}

#[derive(Default)]
pub struct MemoryBookStore {
    inner: RwLock<Inner>,
}

impl MemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }

    async fn filter<F>(&self, predicate: F) -> Vec<Book>
    where
        F: Fn(&Book) -> bool,
    {
        let inner = self.inner.read().await;
        inner.books.values().filter(|b| predicate(b)).cloned().collect()
    }

    async fn modify<F>(&self, id: i64, apply: F) -> Option<Book>
    where
        F: FnOnce(&mut Book),
    {
        let mut inner = self.inner.write().await;
        let book = inner.books.get_mut(&id)?;
        apply(book);
        book.updated_at = Utc::now();
        Some(book.clone())
    }
}

#[async_trait]
impl BookStore for MemoryBookStore {
    async fn list(&self) -> AppResult<Vec<Book>> {
        Ok(self.filter(|_| true).await)
    }

    async fn get_by_id(&self, id: i64) -> AppResult<Option<Book>> {
        Ok(self.inner.read().await.books.get(&id).cloned())
    }

    async fn list_by_category(&self, category: &str) -> AppResult<Vec<Book>> {
        Ok(self.filter(|b| b.category == category).await)
    }

    async fn list_by_year(&self, year: i32) -> AppResult<Vec<Book>> {
        Ok(self.filter(|b| b.published_year == year).await)
    }

    async fn create(&self, book: &NewBook) -> AppResult<Book> {
        let mut inner = self.inner.write().await;
        inner.next_id += 1;
        let now = Utc::now();
        let created = Book {
            id: inner.next_id,
            title: book.title.clone(),
            author: book.author.clone(),
            category: book.category.clone(),
            published_year: book.published_year,
            available_copies: book.available_copies,
            created_at: now,
            updated_at: now,
        };
        inner.books.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update_available_copies(&self, id: i64, copies: i32) -> AppResult<Option<Book>> {
        Ok(self.modify(id, |b| b.available_copies = copies).await)
    }

    async fn update_category(&self, id: i64, category: &str) -> AppResult<Option<Book>> {
        Ok(self.modify(id, |b| b.category = category.to_string()).await)
    }

    async fn delete_if_no_copies(&self, id: i64) -> AppResult<bool> {
        let mut inner = self.inner.write().await;
        match inner.books.get(&id) {
            Some(book) if !book.has_copies() => {
                inner.books.remove(&id);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}
