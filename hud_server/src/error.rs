use thiserror::Error;

pub type Result<T> = std::result::Result<T, HudError>;

#[derive(Debug, Error)]
pub enum HudError {
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(#[from] serde_json::Error),

    #[error("configuration error: {message}")]
    Config { message: String },
}
