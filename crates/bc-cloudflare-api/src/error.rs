use thiserror::Error;

#[derive(Error, Debug)]
pub enum CloudflareError {
    #[error("HTTP error: {0}")]
    HttpError(String),
    #[error("API error ({status}): {message}")]
    ApiError { status: u16, message: String },
    #[error("Request rejected: {0}")]
    Rejected(String),
    #[error("Failed to decode response: {0}")]
    DecodeError(String),
    #[error("Authentication failed: {0}")]
    AuthFailed(String),
    #[error("Invalid zone id: {0:?}")]
    InvalidZoneId(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Operation cancelled")]
    Cancelled,
}

impl From<reqwest::Error> for CloudflareError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            CloudflareError::DecodeError(err.to_string())
        } else {
            CloudflareError::HttpError(err.to_string())
        }
    }
}
