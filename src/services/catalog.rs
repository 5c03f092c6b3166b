//! Read-only book lookups

use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::book::Book,
    repository::BookStore,
};

#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn BookStore>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn BookStore>) -> Self {
        Self { store }
    }

    pub async fn list_all(&self) -> AppResult<Vec<Book>> {
        self.store.list().await
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<Book> {
        self.store
            .get_by_id(id)
            .await?
            .ok_or_else(AppError::book_not_found)
    }

    pub async fn list_by_category(&self, category: &str) -> AppResult<Vec<Book>> {
        self.store.list_by_category(category).await
    }

    /// List books published in `year`, given as text from the request path
    pub async fn list_by_year(&self, year: &str) -> AppResult<Vec<Book>> {
        let year = parse_year(year)?;
        self.store.list_by_year(year).await
    }

    pub async fn ping(&self) -> AppResult<()> {
        self.store.ping().await
    }
}

fn parse_year(year: &str) -> AppResult<i32> {
    year.parse::<i32>()
        .map_err(|_| AppError::Validation(format!("Invalid year: {}", year)))
}
