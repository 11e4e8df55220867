use thiserror::Error;

/// Failure reported by one of the remote collaborators.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// Structured error body from the controller, already flattened to one message.
    #[error("{0}")]
    Api(String),
    #[error("{0}")]
    Transport(String),
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ServiceError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_decode() {
            Self::Decode(value.to_string())
        } else {
            Self::Transport(value.to_string())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Lookup,
    Fetch,
    Presign,
    Transfer,
    Read,
    Decode,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FileSessionError {
    #[error("{0}")]
    Lookup(ServiceError),
    #[error("{0}")]
    Fetch(ServiceError),
    #[error("{0}")]
    Presign(ServiceError),
    #[error("{0}")]
    Transfer(ServiceError),
    #[error("upload rejected by storage with status {status}")]
    TransferStatus { status: u16 },
    #[error("failed to read {name}: {reason}")]
    Read { name: String, reason: String },
    #[error("unsupported file format: {name}")]
    UnsupportedFormat { name: String },
    #[error("invalid file payload: {0}")]
    Decode(String),
}

impl FileSessionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Lookup(_) => ErrorKind::Lookup,
            Self::Fetch(_) => ErrorKind::Fetch,
            Self::Presign(_) => ErrorKind::Presign,
            Self::Transfer(_) | Self::TransferStatus { .. } => ErrorKind::Transfer,
            Self::Read { .. } | Self::UnsupportedFormat { .. } => ErrorKind::Read,
            Self::Decode(_) => ErrorKind::Decode,
        }
    }
}
