use crate::core::domain::Configuration;
use crate::core::library::LibraryResult;
use crate::gateway::metadata::MetadataProvider;
use crate::gateway::openlibrary::client::OpenLibraryClient;

pub fn create_metadata_provider(config: &Configuration) -> LibraryResult<Box<dyn MetadataProvider>> {
    let client = OpenLibraryClient::new(config.metadata_url.as_str(), config.lookup_timeout)?;
    Ok(Box::new(client))
}
