use serde::Serialize;
use std::collections::HashSet;

use crate::types::LibraryHandle;

/// Library pulled into the build, with the include that pulled it in
#[derive(Debug, Clone, Serialize)]
pub struct ImportedLibrary {
    pub library: LibraryHandle,

    /// `None` for libraries imported up front
    pub include: Option<String>,
}

/// Ordered, duplicate-free set of libraries resolved so far.
///
/// Only ever grows. Identity is the library name.
#[derive(Debug, Clone, Default)]
pub struct ImportedLibraries {
    entries: Vec<ImportedLibrary>,
    names: HashSet<String>,
}

impl ImportedLibraries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `library` unless a library with the same name is present.
    /// Returns whether the set grew.
    pub fn insert(&mut self, library: LibraryHandle, include: Option<&str>) -> bool {
        if !self.names.insert(library.name.clone()) {
            return false;
        }
        self.entries.push(ImportedLibrary {
            library,
            include: include.map(str::to_string),
        });
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ImportedLibrary> {
        self.entries.iter()
    }

    pub fn libraries(&self) -> impl Iterator<Item = &LibraryHandle> {
        self.entries.iter().map(|entry| &entry.library)
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries
            .iter()
            .map(|entry| entry.library.name.as_str())
            .collect()
    }

    pub fn into_entries(self) -> Vec<ImportedLibrary> {
        self.entries
    }
}
