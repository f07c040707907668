use thiserror::Error;

pub type Result<T> = std::result::Result<T, PublicationError>;

/// Errors from id parsing and payload (de)serialization.
///
/// Version handling never fails: a missing or malformed version falls back
/// to a default instead of producing one of these.
#[derive(Debug, Error)]
pub enum PublicationError {
    #[error("Invalid resource id: {0}")]
    InvalidId(String),

    #[error("Failed to decode segment {segment:?}: {source}")]
    Decode {
        segment: String,
        #[source]
        source: std::string::FromUtf8Error,
    },

    #[error("Unknown feature api key: {0}")]
    UnknownFeature(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
