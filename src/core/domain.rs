use std::path::PathBuf;
use std::time::Duration;
use serde::{Deserialize, Serialize};

pub const DEFAULT_STORAGE_PATH: &str = "library.json";
pub const DEFAULT_METADATA_URL: &str = "https://openlibrary.org";
pub const DEFAULT_LOOKUP_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8000";

// Configuration abstracts config options for the catalog and its presentation layers
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct Configuration {
    pub storage_path: PathBuf,
    pub metadata_url: String,
    pub lookup_timeout: Duration,
    pub bind_address: String,
    pub log_level: String,
}

impl Configuration {
    pub fn new(storage_path: &str) -> Self {
        Configuration {
            storage_path: PathBuf::from(storage_path),
            metadata_url: DEFAULT_METADATA_URL.to_string(),
            lookup_timeout: Duration::from_secs(DEFAULT_LOOKUP_TIMEOUT_SECS),
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            log_level: "info".to_string(),
        }
    }

    pub fn with_metadata_url(mut self, url: &str) -> Self {
        self.metadata_url = url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_lookup_timeout(mut self, timeout: Duration) -> Self {
        self.lookup_timeout = timeout;
        self
    }

    pub fn with_bind_address(mut self, address: &str) -> Self {
        self.bind_address = address.to_string();
        self
    }

    pub fn with_log_level(mut self, level: &str) -> Self {
        self.log_level = level.to_string();
        self
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration::new(DEFAULT_STORAGE_PATH)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::time::Duration;
    use crate::core::domain::Configuration;

    #[tokio::test]
    async fn test_should_build_config() {
        let config = Configuration::default();
        assert_eq!(PathBuf::from("library.json"), config.storage_path);
        assert_eq!("https://openlibrary.org", config.metadata_url);
        assert_eq!(Duration::from_secs(10), config.lookup_timeout);
        assert_eq!("0.0.0.0:8000", config.bind_address);
        assert_eq!("info", config.log_level);
    }

    #[tokio::test]
    async fn test_should_override_config() {
        let config = Configuration::new("/tmp/books.json")
            .with_metadata_url("http://127.0.0.1:9000/")
            .with_lookup_timeout(Duration::from_secs(2))
            .with_bind_address("127.0.0.1:8080")
            .with_log_level("debug");
        assert_eq!(PathBuf::from("/tmp/books.json"), config.storage_path);
        assert_eq!("http://127.0.0.1:9000", config.metadata_url);
        assert_eq!(Duration::from_secs(2), config.lookup_timeout);
        assert_eq!("127.0.0.1:8080", config.bind_address);
        assert_eq!("debug", config.log_level);
    }
}
