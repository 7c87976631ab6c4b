use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("walkdir error: {0}")]
    WalkDir(#[from] walkdir::Error),

    #[error("source path does not exist: {}", .0.display())]
    SourceNotFound(PathBuf),

    #[error("source path is not a directory: {}", .0.display())]
    SourceNotDirectory(PathBuf),

    #[error("destination path does not exist: {}", .0.display())]
    DestinationNotFound(PathBuf),

    #[error("invalid metadata in {}: {message}", .path.display())]
    InvalidMetadata { path: PathBuf, message: String },

    #[error("sink rejected statement: {0}")]
    Sink(String),
}

pub type Result<T> = std::result::Result<T, Error>;
