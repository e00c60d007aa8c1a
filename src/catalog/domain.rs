pub mod model;
pub mod service;

use async_trait::async_trait;
use crate::books::domain::model::Record;
use crate::catalog::domain::model::CatalogStats;
use crate::core::library::LibraryResult;

#[async_trait]
pub trait CatalogService: Sync + Send {
    // looks the isbn up with the metadata provider and adds the resolved book
    async fn add_book(&self, isbn: &str) -> LibraryResult<Record>;
    async fn add_record(&self, record: &Record) -> LibraryResult<Record>;
    async fn remove_book(&self, isbn: &str) -> LibraryResult<Record>;
    async fn find_book_by_isbn(&self, isbn: &str) -> LibraryResult<Record>;
    async fn list_books(&self) -> Vec<Record>;
    async fn count(&self) -> usize;
    async fn stats(&self) -> CatalogStats;
}
