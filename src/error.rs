// Error types for the dashboard feed
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("invalid page url: {0}")]
    InvalidPageUrl(#[from] url::ParseError),

    #[error("unsupported page scheme `{0}` (expected http or https)")]
    UnsupportedScheme(String),

    #[error("page url `{0}` has no host")]
    MissingHost(String),

    #[error("websocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),
}

#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("payload is not a json object")]
    NotAnObject,
}
