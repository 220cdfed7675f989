use thiserror::Error;

pub type Result<T> = std::result::Result<T, MigrationError>;

#[derive(Debug, Error)]
pub enum MigrationError {
    /// An expected path in the genesis tree does not exist.
    #[error("missing field: {path}")]
    MissingField { path: String },

    #[error("unexpected type at {path}: expected {expected}")]
    UnexpectedType { path: String, expected: &'static str },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl MigrationError {
    pub fn missing(path: &[&str]) -> Self {
        MigrationError::MissingField { path: render_path(path) }
    }

    pub fn unexpected(path: &[&str], expected: &'static str) -> Self {
        MigrationError::UnexpectedType { path: render_path(path), expected }
    }
}

fn render_path(path: &[&str]) -> String {
    if path.is_empty() {
        "<genesis root>".to_string()
    } else {
        path.join(".")
    }
}
