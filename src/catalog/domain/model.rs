use std::collections::{HashMap, HashSet};
use serde::Serialize;
use tracing::{error, info, warn};
use crate::books::domain::model::Record;
use crate::books::repository::RecordStore;
use crate::core::library::{LibraryError, LibraryResult, LookupError};
use crate::gateway::metadata::{resolve_record, MetadataProvider};

const MAX_LISTED_AUTHORS: usize = 10;

// Catalog owns the ordered record list and keeps it in step with its store. Every mutation
// persists the whole list; storage failures are logged and the in-memory list stays
// authoritative for the rest of the process.
pub struct Catalog {
    store: Box<dyn RecordStore>,
    records: Vec<Record>,
}

// CatalogStats summarizes the catalog contents.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogStats {
    pub total_books: usize,
    pub total_authors: usize,
    pub most_common_authors: Vec<String>,
}

impl Catalog {
    pub fn open(store: Box<dyn RecordStore>) -> Self {
        let mut catalog = Self {
            store,
            records: vec![],
        };
        catalog.load();
        catalog
    }

    /// Replaces the in-memory list with the stored one. A missing store is a first run; an
    /// unreadable or malformed one is logged and yields an empty catalog.
    pub fn load(&mut self) {
        self.records = match self.store.load() {
            Ok(records) => {
                let records = unique_by_isbn(records);
                info!("loaded {} books from {}", records.len(), self.store.location());
                records
            }
            Err(LibraryError::NotFound { .. }) => {
                info!("no catalog found at {}, starting with an empty one", self.store.location());
                vec![]
            }
            Err(err) => {
                error!("catalog at {} is unreadable or malformed, starting empty: {}", self.store.location(), err);
                vec![]
            }
        };
    }

    pub fn save(&self) {
        if let Err(err) = self.store.save(&self.records) {
            error!("failed to save catalog to {}: {}", self.store.location(), err);
        }
    }

    /// Exact, case sensitive match. Callers trim their input.
    pub fn find(&self, isbn: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.isbn() == isbn)
    }

    pub fn add_manual(&mut self, record: Record) -> LibraryResult<()> {
        self.ensure_absent(record.isbn())?;
        info!("added book: {}", record);
        self.records.push(record);
        self.save();
        Ok(())
    }

    /// Looks the isbn up through the provider and appends the resolved record. Duplicates are
    /// rejected before any network call is made.
    pub async fn add_by_lookup(&mut self, isbn: &str, provider: &dyn MetadataProvider) -> LibraryResult<Record> {
        self.ensure_absent(isbn)?;
        let record = lookup_record(provider, isbn).await?;
        self.insert_resolved(record)
    }

    pub(crate) fn ensure_absent(&self, isbn: &str) -> LibraryResult<()> {
        match self.find(isbn) {
            Some(_) => {
                warn!("book with ISBN {} is already in the catalog", isbn);
                Err(LibraryError::duplicate_key(format!("book with isbn {} already exists", isbn).as_str()))
            }
            None => Ok(()),
        }
    }

    // the isbn may have been added while the lookup was in flight, so add_manual checks again
    pub(crate) fn insert_resolved(&mut self, record: Record) -> LibraryResult<Record> {
        self.add_manual(record.clone())?;
        Ok(record)
    }

    pub fn remove(&mut self, isbn: &str) -> LibraryResult<Record> {
        let pos = self.records.iter().position(|r| r.isbn() == isbn)
            .ok_or_else(|| {
                warn!("book to remove not found: ISBN {}", isbn);
                LibraryError::not_found(format!("book not found for isbn {}", isbn).as_str())
            })?;
        let removed = self.records.remove(pos);
        self.save();
        info!("removed book: {}", removed);
        Ok(removed)
    }

    pub fn list(&self) -> &[Record] {
        self.records.as_slice()
    }

    pub fn count(&self) -> usize {
        self.records.len()
    }

    pub fn stats(&self) -> CatalogStats {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for record in &self.records {
            *counts.entry(record.author()).or_default() += 1;
        }
        let mut authors: Vec<(&str, usize)> = counts.into_iter().collect();
        authors.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        CatalogStats {
            total_books: self.records.len(),
            total_authors: authors.len(),
            most_common_authors: authors.iter()
                .take(MAX_LISTED_AUTHORS)
                .map(|(name, _)| name.to_string())
                .collect(),
        }
    }
}

/// Resolves a record for the isbn, logging the failure kind when the lookup fails.
pub(crate) async fn lookup_record(provider: &dyn MetadataProvider, isbn: &str) -> LibraryResult<Record> {
    resolve_record(provider, isbn).await.map_err(|err| {
        match &err {
            LookupError::NotFound { .. } => warn!("no book found for ISBN {}: {}", isbn, err),
            _ => error!("lookup for ISBN {} failed: {}", isbn, err),
        }
        LibraryError::from(err)
    })
}

// keeps the first record for each isbn so a hand-edited file cannot break uniqueness
fn unique_by_isbn(records: Vec<Record>) -> Vec<Record> {
    let mut seen = HashSet::new();
    records.into_iter()
        .filter(|r| {
            let fresh = seen.insert(r.isbn().to_string());
            if !fresh {
                warn!("dropping duplicate persisted book: {}", r);
            }
            fresh
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;
    use crate::books::domain::model::Record;
    use crate::books::repository::json_file_repository::JsonFileRepository;
    use crate::catalog::domain::model::{Catalog, CatalogStats};
    use crate::core::library::{LibraryError, LookupError};
    use crate::gateway::metadata::EditionDto;
    use crate::gateway::metadata::tests::StubProvider;

    fn test_path() -> (TempDir, PathBuf) {
        let dir = tempfile::tempdir().expect("should create temp dir");
        let path = dir.path().join("library.json");
        (dir, path)
    }

    fn open(path: &PathBuf) -> Catalog {
        Catalog::open(Box::new(JsonFileRepository::new(path)))
    }

    fn orwell() -> Record {
        Record::new("1984", "George Orwell", "978-0451524935")
    }

    #[tokio::test]
    async fn test_should_start_empty_without_file() {
        let (_dir, path) = test_path();
        let catalog = open(&path);
        assert_eq!(0, catalog.count());
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_should_fall_back_on_invalid_content() {
        let (_dir, path) = test_path();
        fs::write(&path, "not json at all").expect("should write");
        assert_eq!(0, open(&path).count());

        fs::write(&path, r#"[{"title": "1984", "author": "George Orwell", "isbn": "1"}, {"title": "x"}]"#).expect("should write");
        assert_eq!(0, open(&path).count());
    }

    #[tokio::test]
    async fn test_should_drop_duplicate_persisted_isbns() {
        let (_dir, path) = test_path();
        fs::write(&path, r#"[
            {"title": "1984", "author": "George Orwell", "isbn": "1"},
            {"title": "Animal Farm", "author": "George Orwell", "isbn": "2"},
            {"title": "Copy", "author": "Someone", "isbn": "1"}
        ]"#).expect("should write");
        let catalog = open(&path);
        assert_eq!(2, catalog.count());
        assert_eq!("1984", catalog.find("1").expect("should find").title());
    }

    #[tokio::test]
    async fn test_should_run_add_find_remove_scenario() {
        let (_dir, path) = test_path();
        let mut catalog = open(&path);

        catalog.add_manual(orwell()).expect("should add book");
        assert_eq!(1, catalog.count());
        assert!(catalog.find("978-0451524935").expect("should find").same_fields(&orwell()));

        assert!(matches!(catalog.remove("978-0451526342"), Err(LibraryError::NotFound { .. })));
        assert_eq!(1, catalog.count());

        let removed = catalog.remove("978-0451524935").expect("should remove");
        assert_eq!(orwell(), removed);
        assert_eq!(0, catalog.count());
        assert_eq!(0, open(&path).count());
    }

    #[tokio::test]
    async fn test_should_reject_duplicate_add() {
        let (_dir, path) = test_path();
        let mut catalog = open(&path);
        catalog.add_manual(orwell()).expect("should add book");
        let res = catalog.add_manual(Record::new("Other", "Other", "978-0451524935"));
        assert!(matches!(res, Err(LibraryError::DuplicateKey { .. })));
        assert_eq!(1, catalog.count());
        assert_eq!("1984", catalog.find("978-0451524935").expect("should find").title());
    }

    #[tokio::test]
    async fn test_should_not_normalize_isbn_on_find() {
        let (_dir, path) = test_path();
        let mut catalog = open(&path);
        catalog.add_manual(Record::new("Dune", "Frank Herbert", "044101359X")).expect("should add book");
        assert!(catalog.find("044101359X").is_some());
        assert!(catalog.find("044101359x").is_none());
        assert!(catalog.find(" 044101359X").is_none());
    }

    #[tokio::test]
    async fn test_should_persist_in_order() {
        let (_dir, path) = test_path();
        let mut catalog = open(&path);
        let records = vec![
            orwell(),
            Record::new("Tutunamayanlar", "Oğuz Atay", "978-9754700114"),
            Record::new("Animal Farm", "George Orwell", "978-0451526342"),
        ];
        for record in &records {
            catalog.add_manual(record.clone()).expect("should add book");
        }

        let reloaded = open(&path);
        assert_eq!(records.len(), reloaded.count());
        for (expected, actual) in records.iter().zip(reloaded.list()) {
            assert!(expected.same_fields(actual));
        }
    }

    #[tokio::test]
    async fn test_should_keep_memory_when_save_fails() {
        let dir = tempfile::tempdir().expect("should create temp dir");
        let path = dir.path().join("missing").join("library.json");
        let mut catalog = open(&path);
        catalog.add_manual(orwell()).expect("should add book despite storage failure");
        assert_eq!(1, catalog.count());
        assert!(catalog.find("978-0451524935").is_some());
    }

    #[tokio::test]
    async fn test_should_add_by_lookup() {
        let (_dir, path) = test_path();
        let mut catalog = open(&path);
        let provider = StubProvider::default()
            .with_edition("978-0451524935", Ok(EditionDto::new(Some("1984"), &["/authors/OL118077A"])))
            .with_author("/authors/OL118077A", Ok("George Orwell".to_string()));

        let record = catalog.add_by_lookup("978-0451524935", &provider).await.expect("should add book");
        assert!(record.same_fields(&orwell()));
        assert_eq!(1, catalog.count());
        assert_eq!(1, open(&path).count());
    }

    #[tokio::test]
    async fn test_should_not_add_when_lookup_not_found() {
        let (_dir, path) = test_path();
        let mut catalog = open(&path);
        let provider = StubProvider::default();

        let res = catalog.add_by_lookup("0000000000", &provider).await;
        assert!(matches!(res, Err(LibraryError::Lookup(LookupError::NotFound { .. }))));
        assert_eq!(0, catalog.count());
    }

    #[tokio::test]
    async fn test_should_not_add_when_transport_fails() {
        let (_dir, path) = test_path();
        let mut catalog = open(&path);
        let provider = StubProvider::default()
            .with_edition("978-0451524935", Err(LookupError::transport("connection refused")));

        let res = catalog.add_by_lookup("978-0451524935", &provider).await;
        assert!(matches!(res, Err(LibraryError::Lookup(LookupError::Transport { .. }))));
        assert_eq!(0, catalog.count());
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_should_skip_lookup_for_duplicate() {
        let (_dir, path) = test_path();
        let mut catalog = open(&path);
        catalog.add_manual(orwell()).expect("should add book");
        let provider = StubProvider::default();

        let res = catalog.add_by_lookup("978-0451524935", &provider).await;
        assert!(matches!(res, Err(LibraryError::DuplicateKey { .. })));
        assert_eq!(0, provider.calls());
    }

    #[tokio::test]
    async fn test_should_recheck_duplicate_on_insert() {
        let (_dir, path) = test_path();
        let mut catalog = open(&path);
        catalog.ensure_absent("978-0451524935").expect("should be absent");
        catalog.add_manual(orwell()).expect("should add book");

        let res = catalog.insert_resolved(Record::new("Other", "Other", "978-0451524935"));
        assert!(matches!(res, Err(LibraryError::DuplicateKey { .. })));
        assert!(matches!(catalog.ensure_absent("978-0451524935"), Err(LibraryError::DuplicateKey { .. })));
        assert_eq!(1, catalog.count());
        assert_eq!("1984", catalog.find("978-0451524935").expect("should find").title());
    }

    #[tokio::test]
    async fn test_should_summarize_stats() {
        let (_dir, path) = test_path();
        let mut catalog = open(&path);
        catalog.add_manual(orwell()).expect("should add book");
        catalog.add_manual(Record::new("Animal Farm", "George Orwell", "2")).expect("should add book");
        catalog.add_manual(Record::new("Dune", "Frank Herbert", "3")).expect("should add book");

        assert_eq!(CatalogStats {
            total_books: 3,
            total_authors: 2,
            most_common_authors: vec!["George Orwell".to_string(), "Frank Herbert".to_string()],
        }, catalog.stats());
    }

    #[tokio::test]
    async fn test_should_reload_from_store() {
        let (_dir, path) = test_path();
        let mut catalog = open(&path);
        catalog.add_manual(orwell()).expect("should add book");
        fs::write(&path, "[]").expect("should write");
        catalog.load();
        assert_eq!(0, catalog.count());
    }
}
