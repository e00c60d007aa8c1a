use std::fmt;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};
use serde::Serialize;
use serde_json::Value;
use crate::core::library::{LibraryError, LibraryResult};

// Record is a single catalog entry. The isbn is its identity: two records with the same
// isbn are equal whatever their title and author say. Records are never mutated in place.
#[derive(Debug, Clone, Serialize)]
pub struct Record {
    title: String,
    author: String,
    isbn: String,
}

impl Record {
    pub fn new(title: &str, author: &str, isbn: &str) -> Self {
        Self {
            title: title.to_string(),
            author: author.to_string(),
            isbn: isbn.to_string(),
        }
    }

    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    pub fn author(&self) -> &str {
        self.author.as_str()
    }

    pub fn isbn(&self) -> &str {
        self.isbn.as_str()
    }

    /// Structural form written to storage, with exactly the keys `title`, `author` and `isbn`.
    pub fn to_persisted(&self) -> Value {
        serde_json::json!({
            "title": self.title,
            "author": self.author,
            "isbn": self.isbn,
        })
    }

    /// Rebuilds a record from its persisted form. Values are taken verbatim, no trimming and
    /// no ISBN checksum validation.
    pub fn from_persisted(data: &Value) -> LibraryResult<Record> {
        let field = |name: &str| -> LibraryResult<String> {
            data.get(name)
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or_else(|| LibraryError::malformed_record(
                    format!("persisted record is missing string field '{}': {}", name, data).as_str()))
        };
        Ok(Record {
            title: field("title")?,
            author: field("author")?,
            isbn: field("isbn")?,
        })
    }

    /// Full structural comparison, for callers that care about title and author too.
    pub fn same_fields(&self, other: &Record) -> bool {
        self.isbn == other.isbn && self.title == other.title && self.author == other.author
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.isbn == other.isbn
    }
}

impl Eq for Record {}

impl Hash for Record {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.isbn.hash(state);
    }
}

impl Display for Record {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} by {} (ISBN: {})", self.title, self.author, self.isbn)
    }
}
