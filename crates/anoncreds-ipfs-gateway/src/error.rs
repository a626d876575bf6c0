use thiserror::Error;

pub(crate) type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum GatewayError {
    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(#[source] BoxError),
    #[error("server error: HTTP {status}")]
    Server { status: u16, message: String },
    #[error("client error: HTTP {status}")]
    Client { status: u16, message: String },
    #[error("invalid gateway response: {0}")]
    InvalidResponse(String),
    #[error("deadline exceeded")]
    DeadlineExceeded,
}

impl GatewayError {
    pub fn network(err: impl Into<BoxError>) -> Self {
        Self::Network(err.into())
    }

    /// Network failures and 5xx responses are transient; everything else is
    /// returned to the caller on first occurrence.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Server { .. })
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } | Self::Client { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
    #[error("invalid gateway url: {0}")]
    InvalidUrl(String),
    #[error("max retries must be at least 1")]
    MaxRetries,
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}
