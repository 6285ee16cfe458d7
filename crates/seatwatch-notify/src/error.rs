use thiserror::Error;

pub type Result<T> = std::result::Result<T, NotifyError>;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(String),

    #[error("webhook request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("webhook returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
}
