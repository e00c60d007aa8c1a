use crate::books::repository::RecordStore;
use crate::books::repository::json_file_repository::JsonFileRepository;
use crate::core::domain::Configuration;

pub fn create_record_store(config: &Configuration) -> Box<dyn RecordStore> {
    Box::new(JsonFileRepository::new(config.storage_path.as_path()))
}
