use thiserror::Error;

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("API base URL is not configured")]
    MissingBaseUrl,
    #[error("invalid API base URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    // connect refused, DNS failure and timeouts
    #[error("connection error")]
    Connection(#[source] reqwest::Error),
    #[error("server responded with status {status}")]
    Status { status: u16, detail: Option<String> },
    #[error("failed to decode server response")]
    Decode(#[source] reqwest::Error),
    #[error("{0}")]
    Validation(String),
}

impl ClientError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// A server-supplied `detail` wins over the per-action fallback.
    pub fn status_text(&self, fallback: &str) -> String {
        match self {
            ClientError::Status {
                detail: Some(detail),
                ..
            } => detail.clone(),
            ClientError::Status { detail: None, .. } => fallback.to_string(),
            other => other.to_string(),
        }
    }
}
