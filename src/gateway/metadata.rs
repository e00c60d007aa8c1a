use async_trait::async_trait;
use serde_json::Value;
use tracing::warn;
use crate::books::domain::model::Record;
use crate::core::library::LookupError;

pub const UNKNOWN_TITLE: &str = "Unknown Title";
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";

// AuthorRef is one entry of an edition's author list; key is None when the entry is malformed.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthorRef {
    pub key: Option<String>,
}

// EditionDto is the part of a provider's edition response the catalog cares about.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EditionDto {
    pub title: Option<String>,
    pub authors: Vec<AuthorRef>,
}

impl EditionDto {
    pub fn new(title: Option<&str>, author_keys: &[&str]) -> Self {
        Self {
            title: title.map(str::to_string),
            authors: author_keys.iter().map(|k| AuthorRef { key: Some(k.to_string()) }).collect(),
        }
    }

    // Only a non-object body is rejected; missing or oddly typed fields fall back to defaults.
    pub fn from_value(body: &Value) -> Result<Self, LookupError> {
        let obj = body.as_object().ok_or_else(|| LookupError::malformed_response(
            format!("edition body is not an object: {}", body).as_str()))?;
        let title = obj.get("title").and_then(Value::as_str).map(str::to_string);
        let authors = obj.get("authors")
            .and_then(Value::as_array)
            .map(|list| list.iter()
                .map(|a| AuthorRef { key: a.get("key").and_then(Value::as_str).map(str::to_string) })
                .collect())
            .unwrap_or_default();
        Ok(Self { title, authors })
    }

    pub fn primary_author_key(&self) -> Option<&str> {
        self.authors.first().and_then(|a| a.key.as_deref())
    }
}

#[async_trait]
pub trait MetadataProvider: Sync + Send {
    // looks up an edition by isbn, LookupError::NotFound when the provider does not know it
    async fn fetch_edition(&self, isbn: &str) -> Result<EditionDto, LookupError>;

    // resolves an author reference such as "/authors/OL118077A" to a display name
    async fn fetch_author_name(&self, author_key: &str) -> Result<String, LookupError>;
}

/// Resolves an isbn into a record. Edition failures are returned as is, while a missing or
/// failing author lookup degrades to [`UNKNOWN_AUTHOR`].
pub async fn resolve_record(provider: &dyn MetadataProvider, isbn: &str) -> Result<Record, LookupError> {
    let edition = provider.fetch_edition(isbn).await?;
    let title = edition.title.as_deref().unwrap_or(UNKNOWN_TITLE);
    let author = match edition.primary_author_key() {
        Some(key) => match provider.fetch_author_name(key).await {
            Ok(name) => name,
            Err(err) => {
                warn!("author lookup for {} failed, using default: {}", key, err);
                UNKNOWN_AUTHOR.to_string()
            }
        },
        None => UNKNOWN_AUTHOR.to_string(),
    };
    Ok(Record::new(title, author.as_str(), isbn))
}
