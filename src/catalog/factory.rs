use std::sync::Arc;
use crate::books::factory::create_record_store;
use crate::catalog::domain::CatalogService;
use crate::catalog::domain::model::Catalog;
use crate::catalog::domain::service::CatalogServiceImpl;
use crate::core::domain::Configuration;
use crate::core::library::LibraryResult;
use crate::gateway::factory::create_metadata_provider;

pub fn create_catalog_service(config: &Configuration) -> LibraryResult<Arc<dyn CatalogService>> {
    let catalog = Catalog::open(create_record_store(config));
    let metadata_provider = create_metadata_provider(config)?;
    Ok(Arc::new(CatalogServiceImpl::new(config, catalog, metadata_provider)))
}
