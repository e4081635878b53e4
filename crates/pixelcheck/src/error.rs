use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to load image '{path}': {message}")]
    ImageLoad { path: String, message: String },

    #[error("failed to write image '{path}': {message}")]
    ImageWrite { path: String, message: String },

    /// The per-run temp directory could not be created.
    #[error("failed to create temp directory under '{root}': {source}")]
    TempDir {
        root: String,
        source: std::io::Error,
    },

    #[error("failed to create temp file '{path}': {source}")]
    TempFile {
        path: String,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
