use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;
use serde_json::ser::PrettyFormatter;

use crate::books::domain::model::Record;
use crate::books::repository::RecordStore;
use crate::core::library::{LibraryError, LibraryResult};

const INDENT: &[u8] = b"    ";

#[derive(Debug)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        self.path.as_path()
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl RecordStore for JsonFileRepository {
    fn load(&self) -> LibraryResult<Vec<Record>> {
        let content = fs::read_to_string(&self.path)?;
        let data: Value = serde_json::from_str(&content)?;
        let items = data.as_array().ok_or_else(|| LibraryError::serialization(
            format!("expected a json array in {}", self.path.display()).as_str()))?;
        items.iter().map(Record::from_persisted).collect()
    }

    fn save(&self, records: &[Record]) -> LibraryResult<()> {
        let data: Vec<Value> = records.iter().map(Record::to_persisted).collect();
        let mut buf = Vec::new();
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
        data.serialize(&mut ser)?;

        // write a sibling file first so the target is replaced whole or not at all
        let tmp = self.temp_path();
        let written = fs::File::create(&tmp)
            .and_then(|mut file| {
                file.write_all(&buf)?;
                file.sync_all()
            })
            .and_then(|_| fs::rename(&tmp, &self.path));
        if let Err(err) = written {
            let _ = fs::remove_file(&tmp);
            return Err(LibraryError::storage(
                format!("failed to write {}: {}", self.path.display(), err).as_str()));
        }
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use tempfile::TempDir;

    use crate::books::domain::model::Record;
    use crate::books::repository::json_file_repository::JsonFileRepository;
    use crate::books::repository::RecordStore;
    use crate::core::library::LibraryError;

    fn test_repo() -> (TempDir, JsonFileRepository) {
        let dir = tempfile::tempdir().expect("should create temp dir");
        let repo = JsonFileRepository::new(&dir.path().join("library.json"));
        (dir, repo)
    }

    #[tokio::test]
    async fn test_should_report_missing_file() {
        let (_dir, repo) = test_repo();
        assert!(matches!(repo.load(), Err(LibraryError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_should_save_and_load_records() {
        let (_dir, repo) = test_repo();
        let records = vec![
            Record::new("1984", "George Orwell", "978-0451524935"),
            Record::new("Animal Farm", "George Orwell", "978-0451526342"),
            Record::new("Kürk Mantolu Madonna", "Sabahattin Ali", "978-9753638029"),
        ];
        repo.save(&records).expect("should save records");

        let loaded = repo.load().expect("should load records");
        assert_eq!(records.len(), loaded.len());
        for (expected, actual) in records.iter().zip(loaded.iter()) {
            assert!(expected.same_fields(actual));
        }
    }

    #[tokio::test]
    async fn test_should_write_readable_utf8() {
        let (_dir, repo) = test_repo();
        repo.save(&[Record::new("Kürk Mantolu Madonna", "Sabahattin Ali", "978-9753638029")]).expect("should save");

        let content = fs::read_to_string(repo.path()).expect("should read file");
        assert!(content.contains("Kürk Mantolu Madonna"));
        assert!(content.contains("\n        \"title\""));
        assert!(!repo.temp_path().exists());
    }

    #[tokio::test]
    async fn test_should_save_empty_list() {
        let (_dir, repo) = test_repo();
        repo.save(&[]).expect("should save");
        assert_eq!("[]", fs::read_to_string(repo.path()).expect("should read file"));
        assert!(repo.load().expect("should load").is_empty());
    }

    #[tokio::test]
    async fn test_should_reject_invalid_json() {
        let (_dir, repo) = test_repo();
        fs::write(repo.path(), "{ this is not json").expect("should write");
        assert!(matches!(repo.load(), Err(LibraryError::Serialization { .. })));
    }

    #[tokio::test]
    async fn test_should_reject_non_array() {
        let (_dir, repo) = test_repo();
        fs::write(repo.path(), r#"{"title": "1984"}"#).expect("should write");
        assert!(matches!(repo.load(), Err(LibraryError::Serialization { .. })));
    }

    #[tokio::test]
    async fn test_should_abort_on_malformed_record() {
        let (_dir, repo) = test_repo();
        fs::write(repo.path(), r#"[
            {"title": "1984", "author": "George Orwell", "isbn": "978-0451524935"},
            {"title": "Animal Farm", "isbn": "978-0451526342"}
        ]"#).expect("should write");
        assert!(matches!(repo.load(), Err(LibraryError::MalformedRecord { .. })));
    }

    #[tokio::test]
    async fn test_should_fail_save_into_missing_dir() {
        let dir = tempfile::tempdir().expect("should create temp dir");
        let repo = JsonFileRepository::new(&dir.path().join("missing").join("library.json"));
        let res = repo.save(&[Record::new("1984", "George Orwell", "978-0451524935")]);
        assert!(matches!(res, Err(LibraryError::Storage { .. })));
    }
}
