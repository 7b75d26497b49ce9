use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PreprocError>;

#[derive(Error, Debug)]
pub enum PreprocError {
    /// The preprocessor binary could not be started
    #[error("Failed to run {}: {source}", command.display())]
    Spawn {
        command: PathBuf,
        source: std::io::Error,
    },

    /// The preprocessor exited with an error that is not a missing include
    #[error("Preprocessor exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
