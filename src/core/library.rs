use std::fmt;
use std::fmt::{Display, Formatter};

// LookupError enumerates the ways an external metadata lookup can fail.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupError {
    // The provider answered with its not-found status.
    NotFound {
        message: String,
    },
    // Connection, timeout, DNS or an unexpected non-success status.
    Transport {
        message: String,
    },
    // The provider answered but the body could not be understood.
    MalformedResponse {
        message: String,
    },
    Unknown {
        message: String,
    },
}

impl LookupError {
    pub fn not_found(message: &str) -> LookupError {
        LookupError::NotFound { message: message.to_string() }
    }

    pub fn transport(message: &str) -> LookupError {
        LookupError::Transport { message: message.to_string() }
    }

    pub fn malformed_response(message: &str) -> LookupError {
        LookupError::MalformedResponse { message: message.to_string() }
    }

    pub fn unknown(message: &str) -> LookupError {
        LookupError::Unknown { message: message.to_string() }
    }

    pub fn message(&self) -> &str {
        match self {
            LookupError::NotFound { message } => message,
            LookupError::Transport { message } => message,
            LookupError::MalformedResponse { message } => message,
            LookupError::Unknown { message } => message,
        }
    }
}

impl Display for LookupError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LookupError::NotFound { message } => {
                write!(f, "not found: {}", message)
            }
            LookupError::Transport { message } => {
                write!(f, "transport error: {}", message)
            }
            LookupError::MalformedResponse { message } => {
                write!(f, "malformed response: {}", message)
            }
            LookupError::Unknown { message } => {
                write!(f, "unknown failure: {}", message)
            }
        }
    }
}

impl From<reqwest::Error> for LookupError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            LookupError::malformed_response(format!("{}", err).as_str())
        } else if err.is_timeout() || err.is_connect() || err.is_request() || err.is_status() {
            LookupError::transport(format!("{}", err).as_str())
        } else {
            LookupError::unknown(format!("{}", err).as_str())
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LibraryError {
    DuplicateKey {
        message: String,
    },
    NotFound {
        message: String,
    },
    // A persisted entry is missing one of title, author or isbn.
    MalformedRecord {
        message: String,
    },
    Lookup(LookupError),
    Storage {
        message: String,
    },
    Serialization {
        message: String,
    },
    Validation {
        message: String,
        reason_code: Option<String>,
    },
    Runtime {
        message: String,
        reason_code: Option<String>,
    },
}

impl LibraryError {
    pub fn duplicate_key(message: &str) -> LibraryError {
        LibraryError::DuplicateKey { message: message.to_string() }
    }

    pub fn not_found(message: &str) -> LibraryError {
        LibraryError::NotFound { message: message.to_string() }
    }

    pub fn malformed_record(message: &str) -> LibraryError {
        LibraryError::MalformedRecord { message: message.to_string() }
    }

    pub fn storage(message: &str) -> LibraryError {
        LibraryError::Storage { message: message.to_string() }
    }

    pub fn serialization(message: &str) -> LibraryError {
        LibraryError::Serialization { message: message.to_string() }
    }

    pub fn validation(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::Validation { message: message.to_string(), reason_code }
    }

    pub fn runtime(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::Runtime { message: message.to_string(), reason_code }
    }
}

impl From<std::io::Error> for LibraryError {
    fn from(err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            LibraryError::not_found(format!("file not found {}", err).as_str())
        } else {
            LibraryError::storage(format!("io {}", err).as_str())
        }
    }
}

impl From<serde_json::Error> for LibraryError {
    fn from(err: serde_json::Error) -> Self {
        LibraryError::serialization(
            format!("serde json parsing {}", err).as_str())
    }
}

impl From<LookupError> for LibraryError {
    fn from(err: LookupError) -> Self {
        LibraryError::Lookup(err)
    }
}

impl Display for LibraryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LibraryError::DuplicateKey { message } => {
                write!(f, "{}", message)
            }
            LibraryError::NotFound { message } => {
                write!(f, "{}", message)
            }
            LibraryError::MalformedRecord { message } => {
                write!(f, "{}", message)
            }
            LibraryError::Lookup(err) => {
                write!(f, "lookup failed, {}", err)
            }
            LibraryError::Storage { message } => {
                write!(f, "{}", message)
            }
            LibraryError::Serialization { message } => {
                write!(f, "{}", message)
            }
            LibraryError::Validation { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
            LibraryError::Runtime { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
        }
    }
}

impl std::error::Error for LibraryError {}

/// A specialized Result type for catalog operations.
pub type LibraryResult<T> = Result<T, LibraryError>;
