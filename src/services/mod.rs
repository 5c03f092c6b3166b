//! Business logic services

pub mod catalog;
pub mod inventory;

use crate::repository::Repository;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
    pub inventory: inventory::InventoryService,
}

impl Services {
    /// Create all services sharing the repository's book store
    pub fn new(repository: Repository) -> Self {
        Self {
            catalog: catalog::CatalogService::new(repository.books.clone()),
            inventory: inventory::InventoryService::new(repository.books),
        }
    }
}
