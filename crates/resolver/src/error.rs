use std::path::{Path, PathBuf};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ResolveError>;

/// Errors that abort a resolution run.
///
/// None of these are retried: the driver surfaces the first one it sees.
#[derive(Error, Debug)]
pub enum ResolveError {
    /// The preprocessing oracle could not be invoked or rejected the file
    #[error("Include discovery failed for {}: {message}", file.display())]
    Oracle { file: PathBuf, message: String },

    /// Two imported libraries claim the same include
    #[error("Include '{include}' is provided by both '{library}' and '{other}'")]
    Ambiguity {
        include: String,
        library: String,
        other: String,
    },

    /// An imported library is unusable as laid out on disk
    #[error("Invalid library '{library}': {reason}")]
    InvalidLibrary { library: String, reason: String },

    /// A folder with sources could not be expanded
    #[error("Cannot read source folder {}: {message}", folder.display())]
    Filesystem { folder: PathBuf, message: String },
}

impl ResolveError {
    /// Create an oracle failure for `file`
    pub fn oracle(file: impl AsRef<Path>, message: impl Into<String>) -> Self {
        Self::Oracle {
            file: file.as_ref().to_path_buf(),
            message: message.into(),
        }
    }

    /// Create an ambiguity error
    pub fn ambiguity(
        include: impl Into<String>,
        library: impl Into<String>,
        other: impl Into<String>,
    ) -> Self {
        Self::Ambiguity {
            include: include.into(),
            library: library.into(),
            other: other.into(),
        }
    }

    /// Create an invalid library error
    pub fn invalid_library(library: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidLibrary {
            library: library.into(),
            reason: reason.into(),
        }
    }

    /// Create a filesystem error for `folder`
    pub fn filesystem(folder: impl AsRef<Path>, message: impl Into<String>) -> Self {
        Self::Filesystem {
            folder: folder.as_ref().to_path_buf(),
            message: message.into(),
        }
    }
}
