use async_trait::async_trait;
use tokio::sync::RwLock;
use crate::books::domain::model::Record;
use crate::catalog::domain::CatalogService;
use crate::catalog::domain::model::{lookup_record, Catalog, CatalogStats};
use crate::core::domain::Configuration;
use crate::core::library::{LibraryError, LibraryResult};
use crate::gateway::metadata::MetadataProvider;

pub(crate) struct CatalogServiceImpl {
    catalog: RwLock<Catalog>,
    metadata_provider: Box<dyn MetadataProvider>,
}

impl CatalogServiceImpl {
    pub(crate) fn new(_config: &Configuration, catalog: Catalog,
                      metadata_provider: Box<dyn MetadataProvider>) -> Self {
        Self {
            catalog: RwLock::new(catalog),
            metadata_provider,
        }
    }
}

#[async_trait]
impl CatalogService for CatalogServiceImpl {
    // The lookup runs without holding the catalog lock; the insert re-checks for a
    // concurrent add of the same isbn.
    async fn add_book(&self, isbn: &str) -> LibraryResult<Record> {
        self.catalog.read().await.ensure_absent(isbn)?;
        let record = lookup_record(self.metadata_provider.as_ref(), isbn).await?;
        self.catalog.write().await.insert_resolved(record)
    }

    async fn add_record(&self, record: &Record) -> LibraryResult<Record> {
        self.catalog.write().await.add_manual(record.clone())?;
        Ok(record.clone())
    }

    async fn remove_book(&self, isbn: &str) -> LibraryResult<Record> {
        self.catalog.write().await.remove(isbn)
    }

    async fn find_book_by_isbn(&self, isbn: &str) -> LibraryResult<Record> {
        self.catalog.read().await.find(isbn)
            .cloned()
            .ok_or_else(|| LibraryError::not_found(format!("book not found for isbn {}", isbn).as_str()))
    }

    async fn list_books(&self) -> Vec<Record> {
        self.catalog.read().await.list().to_vec()
    }

    async fn count(&self) -> usize {
        self.catalog.read().await.count()
    }

    async fn stats(&self) -> CatalogStats {
        self.catalog.read().await.stats()
    }
}
