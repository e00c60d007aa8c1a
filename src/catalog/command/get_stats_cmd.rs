use std::sync::Arc;
use async_trait::async_trait;
use crate::catalog::domain::CatalogService;
use crate::catalog::domain::model::CatalogStats;
use crate::core::command::{Command, CommandError};

pub struct GetStatsCommand {
    catalog_service: Arc<dyn CatalogService>,
}

impl GetStatsCommand {
    pub fn new(catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Default)]
pub struct GetStatsCommandRequest {}

#[async_trait]
impl Command<GetStatsCommandRequest, CatalogStats> for GetStatsCommand {
    async fn execute(&self, _req: GetStatsCommandRequest) -> Result<CatalogStats, CommandError> {
        Ok(self.catalog_service.stats().await)
    }
}
