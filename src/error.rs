// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("Provided path is not a valid directory: {}", .0.display())]
    InvalidRoot(PathBuf),

    #[error("I/O error: {source} (path: {})", .path.display())]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },
}

pub type Result<T> = std::result::Result<T, MetricsError>;

// Allow `?` on std::io::Error by converting to MetricsError::Io with unknown path.
impl From<std::io::Error> for MetricsError {
    fn from(source: std::io::Error) -> Self {
        MetricsError::Io {
            source,
            path: PathBuf::from("<unknown>"),
        }
    }
}
