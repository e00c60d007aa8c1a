use std::time::Duration;
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;
use tracing::debug;
use crate::core::library::LookupError;
use crate::gateway::metadata::{EditionDto, MetadataProvider};

// OpenLibraryClient resolves editions and authors through the Open Library JSON API.
#[derive(Debug, Clone)]
pub struct OpenLibraryClient {
    client: Client,
    base_url: Url,
}

impl OpenLibraryClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, LookupError> {
        let base_url = Url::parse(base_url)
            .map_err(|err| LookupError::unknown(format!("invalid metadata url {}: {}", base_url, err).as_str()))?;
        if base_url.cannot_be_a_base() {
            return Err(LookupError::unknown(format!("metadata url {} cannot be a base", base_url).as_str()));
        }
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| LookupError::unknown(format!("failed to build http client: {}", err).as_str()))?;
        Ok(Self {
            client,
            base_url,
        })
    }

    // name is percent-encoded as one path segment, slashes and fragments included
    fn endpoint(&self, dirs: &[&str], name: &str) -> Result<Url, LookupError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| LookupError::unknown(format!("metadata url {} cannot be a base", self.base_url).as_str()))?
            .pop_if_empty()
            .extend(dirs)
            .push(format!("{}.json", name).as_str());
        Ok(url)
    }

    fn edition_url(&self, isbn: &str) -> Result<Url, LookupError> {
        self.endpoint(&["isbn"], isbn)
    }

    // author keys look like `/authors/OL118077A`
    fn author_url(&self, author_key: &str) -> Result<Url, LookupError> {
        let mut parts: Vec<&str> = author_key.split('/').filter(|p| !p.is_empty()).collect();
        let name = parts.pop()
            .ok_or_else(|| LookupError::malformed_response(format!("invalid author key '{}'", author_key).as_str()))?;
        self.endpoint(&parts, name)
    }

    async fn get_json(&self, url: Url) -> Result<Value, LookupError> {
        debug!("GET {}", url);
        let res = self.client.get(url.clone()).send().await?;
        let status = res.status();
        if status == StatusCode::NOT_FOUND {
            return Err(LookupError::not_found(format!("{} returned 404", url).as_str()));
        }
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(LookupError::transport(format!("{} returned {} - {}", url, status, body).as_str()));
        }
        res.json::<Value>().await.map_err(|err| LookupError::malformed_response(
            format!("{} returned invalid json: {}", url, err).as_str()))
    }
}

#[async_trait]
impl MetadataProvider for OpenLibraryClient {
    async fn fetch_edition(&self, isbn: &str) -> Result<EditionDto, LookupError> {
        let body = self.get_json(self.edition_url(isbn)?).await?;
        EditionDto::from_value(&body)
    }

    async fn fetch_author_name(&self, author_key: &str) -> Result<String, LookupError> {
        let body = self.get_json(self.author_url(author_key)?).await?;
        body.get("name")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| LookupError::malformed_response(
                format!("author {} has no name", author_key).as_str()))
    }
}
