use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CatalogError>;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Library root is not a directory: {}", .0.display())]
    MissingRoot(PathBuf),

    #[error("Folder is not a directory: {}", .0.display())]
    MissingFolder(PathBuf),

    #[error("Unknown library: {0}")]
    UnknownLibrary(String),

    #[error("Invalid manifest {}: {message}", path.display())]
    InvalidManifest { path: PathBuf, message: String },

    #[error("Walk error: {0}")]
    Walk(#[from] ignore::Error),
}
