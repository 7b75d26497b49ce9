//! Seams between the resolver and the outside world.
//!
//! The resolver only drives these; preprocessing, catalog indexing and
//! filesystem traversal live in other crates.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::imported::ImportedLibraries;
use crate::types::{LibraryHandle, SourceFolder};

/// One oracle invocation
#[derive(Debug, Clone, Copy)]
pub struct DiscoveryRequest<'a> {
    /// File to preprocess
    pub file: &'a Path,

    /// Include path in effect for this call
    pub include_folders: &'a [PathBuf],

    /// `Some` switches to finalize mode: write the preprocessed artifact
    /// here and ignore the include report
    pub target: Option<&'a Path>,
}

impl DiscoveryRequest<'_> {
    pub fn is_finalize(&self) -> bool {
        self.target.is_some()
    }
}

/// Reports the include names a file cannot currently resolve
pub trait IncludeOracle {
    fn discover(&mut self, request: &DiscoveryRequest<'_>) -> Result<BTreeSet<String>>;
}

/// Maps an include name to the library providing it.
///
/// Must answer the same way for the same name for the whole build.
pub trait LibraryCatalog {
    fn resolve(&self, include: &str) -> Option<LibraryHandle>;
}

/// Turns a folder into the source files it holds
pub trait FolderExpander {
    fn expand(&self, folder: &SourceFolder) -> Result<Vec<PathBuf>>;
}

/// Terminal consistency check over the imported libraries
pub trait ImportValidator {
    fn validate(&self, libraries: &ImportedLibraries) -> Result<()>;
}
