use async_trait::async_trait;
use crate::core::library::{LibraryError, LookupError};

#[derive(Debug, PartialEq)]
pub enum CommandError {
    DuplicateKey {
        message: String,
    },
    NotFound {
        message: String,
    },
    // The metadata provider could not be reached or answered unexpectedly.
    Upstream {
        message: String,
    },
    Storage {
        message: String,
    },
    Runtime {
        message: String,
        reason_code: Option<String>,
    },
    Serialization {
        message: String,
    },
    Validation {
        message: String,
        reason_code: Option<String>,
    },
}

impl CommandError {
    pub fn message(&self) -> &str {
        match self {
            CommandError::DuplicateKey { message } => message,
            CommandError::NotFound { message } => message,
            CommandError::Upstream { message } => message,
            CommandError::Storage { message } => message,
            CommandError::Runtime { message, .. } => message,
            CommandError::Serialization { message } => message,
            CommandError::Validation { message, .. } => message,
        }
    }
}

#[async_trait]
pub trait Command<Request, Response> {
    async fn execute(&self, req: Request) -> Result<Response, CommandError>;
}

impl From<LibraryError> for CommandError {
    fn from(other: LibraryError) -> Self {
        match other {
            LibraryError::DuplicateKey { message } => {
                CommandError::DuplicateKey { message }
            }
            LibraryError::NotFound { message } => {
                CommandError::NotFound { message }
            }
            LibraryError::MalformedRecord { message } => {
                CommandError::Serialization { message }
            }
            LibraryError::Lookup(LookupError::NotFound { message }) => {
                CommandError::NotFound { message }
            }
            LibraryError::Lookup(err) => {
                CommandError::Upstream { message: err.to_string() }
            }
            LibraryError::Storage { message } => {
                CommandError::Storage { message }
            }
            LibraryError::Serialization { message } => {
                CommandError::Serialization { message }
            }
            LibraryError::Validation { message, reason_code } => {
                CommandError::Validation { message, reason_code }
            }
            LibraryError::Runtime { message, reason_code } => {
                CommandError::Runtime { message, reason_code }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::command::CommandError;
    use crate::core::library::{LibraryError, LookupError};

    #[tokio::test]
    async fn test_should_map_library_errors() {
        assert!(matches!(CommandError::from(LibraryError::duplicate_key("dup")), CommandError::DuplicateKey { .. }));
        assert!(matches!(CommandError::from(LibraryError::not_found("none")), CommandError::NotFound { .. }));
        assert!(matches!(CommandError::from(LibraryError::validation("empty", None)), CommandError::Validation { .. }));
        assert!(matches!(CommandError::from(LibraryError::storage("disk")), CommandError::Storage { .. }));
    }

    #[tokio::test]
    async fn test_should_split_lookup_errors() {
        let not_found = CommandError::from(LibraryError::from(LookupError::not_found("isbn")));
        assert_eq!(CommandError::NotFound { message: "isbn".to_string() }, not_found);

        for err in [LookupError::transport("t"), LookupError::malformed_response("m"), LookupError::unknown("u")] {
            assert!(matches!(CommandError::from(LibraryError::from(err)), CommandError::Upstream { .. }));
        }
    }

    #[tokio::test]
    async fn test_should_expose_message() {
        let err = CommandError::Validation { message: "ISBN cannot be empty".to_string(), reason_code: None };
        assert_eq!("ISBN cannot be empty", err.message());
    }
}
