use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

/// Shown when the server rejects a request without saying why.
pub const GENERIC_FAILURE: &str = "An error occurred";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Request rejected with status {status}: {}", .detail.as_deref().unwrap_or(GENERIC_FAILURE))]
    Status {
        status: u16,
        detail: Option<String>,
    },
}

impl AppError {
    /// Text for the message box. Only a structured rejection carries
    /// anything worth showing verbatim; every other failure gets `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            AppError::Status { detail, .. } => detail
                .clone()
                .unwrap_or_else(|| GENERIC_FAILURE.to_string()),
            AppError::Transport(_) | AppError::Decode(_) => fallback.to_string(),
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AppError::Decode(err.to_string())
        } else {
            AppError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Decode(err.to_string())
    }
}
