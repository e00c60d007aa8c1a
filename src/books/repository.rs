pub mod json_file_repository;

use crate::books::domain::model::Record;
use crate::core::library::LibraryResult;

// RecordStore persists the whole record list at once; there are no partial writes.
pub trait RecordStore: Sync + Send {
    // loads every persisted record in stored order, NotFound if nothing was ever saved
    fn load(&self) -> LibraryResult<Vec<Record>>;

    // replaces the stored list with the given records
    fn save(&self, records: &[Record]) -> LibraryResult<()>;

    // human readable location, used in logs
    fn location(&self) -> String;
}
