use std::path::PathBuf;
use std::time::Duration;
use clap::{Args, Parser};
use crate::core::domain::{Configuration, DEFAULT_BIND_ADDRESS, DEFAULT_LOOKUP_TIMEOUT_SECS, DEFAULT_METADATA_URL, DEFAULT_STORAGE_PATH};

// CatalogArgs holds the options shared by the menu and the http service.
#[derive(Debug, Clone, Args)]
pub struct CatalogArgs {
    /// JSON file holding the catalog
    #[arg(long, env = "SHELF_LIBRARY_FILE", default_value = DEFAULT_STORAGE_PATH)]
    pub library_file: PathBuf,

    /// Base URL of the book metadata service
    #[arg(long, env = "SHELF_METADATA_URL", default_value = DEFAULT_METADATA_URL)]
    pub metadata_url: String,

    /// Timeout for each metadata request, in seconds
    #[arg(long, env = "SHELF_LOOKUP_TIMEOUT_SECS", default_value_t = DEFAULT_LOOKUP_TIMEOUT_SECS)]
    pub lookup_timeout_secs: u64,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, env = "SHELF_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl CatalogArgs {
    pub fn to_configuration(&self) -> Configuration {
        let config = Configuration {
            storage_path: self.library_file.clone(),
            ..Configuration::default()
        };
        config
            .with_metadata_url(self.metadata_url.as_str())
            .with_lookup_timeout(Duration::from_secs(self.lookup_timeout_secs))
            .with_log_level(self.log_level.as_str())
    }
}

/// Personal library catalog, interactive menu
#[derive(Debug, Parser)]
#[command(name = "shelf", version)]
pub struct MenuArgs {
    #[command(flatten)]
    pub catalog: CatalogArgs,
}

/// Personal library catalog, REST API
#[derive(Debug, Parser)]
#[command(name = "catalog-api", version)]
pub struct ServerArgs {
    #[command(flatten)]
    pub catalog: CatalogArgs,

    /// Address the API listens on
    #[arg(long, env = "SHELF_BIND_ADDRESS", default_value = DEFAULT_BIND_ADDRESS)]
    pub bind_address: String,
}

impl ServerArgs {
    pub fn to_configuration(&self) -> Configuration {
        self.catalog.to_configuration().with_bind_address(self.bind_address.as_str())
    }
}
