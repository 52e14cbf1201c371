use thiserror::Error;

#[derive(Debug, Error)]
pub enum LineupError {
    #[error("element not found: {0}")]
    ElementNotFound(u64),

    #[error("element already exists: {0}")]
    ElementExists(u64),

    #[error("element already selected: {0}")]
    AlreadySelected(u64),

    #[error("element not selected: {0}")]
    NotSelected(u64),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, LineupError>;
