use serde::{Deserialize, Serialize};

pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub message: String,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Error body returned by the remote controller: either one error or a list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ApiErrorBody {
    Many(Vec<ApiError>),
    One(ApiError),
}

impl ApiErrorBody {
    pub fn message(&self) -> String {
        match self {
            Self::Many(errors) => errors
                .iter()
                .map(|e| e.message.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            Self::One(error) => error.message.clone(),
        }
    }

    /// Best-effort message for a raw error response body.
    pub fn message_from_bytes(body: &[u8]) -> String {
        match serde_json::from_slice::<ApiErrorBody>(body) {
            Ok(parsed) => parsed.message(),
            Err(_) => UNKNOWN_ERROR_MESSAGE.to_string(),
        }
    }
}
