use thiserror::Error;

/// Errors from the fallible edges of the crate: decoding saved data and
/// configuration, and importing pasted HTML. Grid operations never fail.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("pasted fragment contains no table rows")]
    EmptyPaste,
}

pub type Result<T> = std::result::Result<T, TableError>;
