use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised at the edges of the engine: loading configuration and
/// reading caller-supplied input. Matching itself never fails.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Read a JSON document from disk.
pub fn read_json(path: impl AsRef<std::path::Path>) -> Result<serde_json::Value> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}
