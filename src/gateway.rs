pub mod factory;
pub mod metadata;
pub mod openlibrary;
