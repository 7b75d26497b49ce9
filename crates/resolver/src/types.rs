use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;

/// Shared, immutable reference to a catalog library
pub type LibraryHandle = Arc<Library>;

/// Folder whose sources must be compiled
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SourceFolder {
    /// Folder path
    pub folder: PathBuf,

    /// Whether sub-folders are scanned too
    pub recurse: bool,
}

impl SourceFolder {
    pub fn new(folder: impl Into<PathBuf>, recurse: bool) -> Self {
        Self {
            folder: folder.into(),
            recurse,
        }
    }
}

/// How a library arranges its sources on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LibraryLayout {
    /// Sources in the library root plus an optional `utility/` folder,
    /// neither scanned recursively
    Flat,

    /// Sources anywhere below `src/`
    Recursive,
}

/// Reusable unit of sources, resolved by the headers it exposes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Library {
    /// Library name (unique within a catalog)
    pub name: String,

    /// Optional version string from the library manifest
    pub version: Option<String>,

    /// Library root directory
    pub root: PathBuf,

    /// On-disk layout
    pub layout: LibraryLayout,

    /// `utility/` folder if present; only compiled for the flat layout
    pub utility_folder: Option<PathBuf>,

    /// Header names exposed from the include folder
    pub headers: BTreeSet<String>,
}

impl Library {
    pub fn new(name: impl Into<String>, root: impl Into<PathBuf>, layout: LibraryLayout) -> Self {
        Self {
            name: name.into(),
            version: None,
            root: root.into(),
            layout,
            utility_folder: None,
            headers: BTreeSet::new(),
        }
    }

    pub fn with_headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.headers.extend(headers.into_iter().map(Into::into));
        self
    }

    pub fn with_utility_folder(mut self, folder: impl Into<PathBuf>) -> Self {
        self.utility_folder = Some(folder.into());
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Folder added to the include path once the library is imported
    pub fn include_folder(&self) -> PathBuf {
        match self.layout {
            LibraryLayout::Flat => self.root.clone(),
            LibraryLayout::Recursive => self.root.join("src"),
        }
    }

    /// Folders whose sources belong to the build once the library is imported
    pub fn source_folders(&self) -> Vec<SourceFolder> {
        match self.layout {
            LibraryLayout::Recursive => vec![SourceFolder::new(self.root.join("src"), true)],
            LibraryLayout::Flat => {
                let mut folders = vec![SourceFolder::new(self.root.clone(), false)];
                if let Some(utility) = &self.utility_folder {
                    folders.push(SourceFolder::new(utility.clone(), false));
                }
                folders
            }
        }
    }

    pub fn provides(&self, include: &str) -> bool {
        self.headers.contains(include)
    }
}
