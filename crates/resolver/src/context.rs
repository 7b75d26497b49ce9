use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use crate::imported::ImportedLibraries;
use crate::queue::{SourceFileQueue, SourceFolderQueue};

/// Where finalize mode writes the preprocessed artifact, relative to the build path
pub const FINALIZE_TARGET: &str = "preproc/finalized.ii";

/// Counters collected over one resolution run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiscoveryStats {
    /// Files that went through the convergence loop
    pub files_processed: usize,

    /// Oracle calls in discovery mode
    pub oracle_calls: usize,

    /// Oracle calls in finalize mode
    pub finalize_calls: usize,

    /// Libraries added to the import set, up-front ones included
    pub libraries_imported: usize,
}

/// State of one build invocation
#[derive(Debug)]
pub struct BuildContext {
    /// File the discovery starts from
    pub entry_file: PathBuf,

    /// Build output location; scanned recursively for generated sources
    pub build_path: PathBuf,

    /// Include folders that precede every library folder (core, variant)
    pub base_include_folders: Vec<PathBuf>,

    pub imported: ImportedLibraries,
    pub folders: SourceFolderQueue,
    pub source_files: SourceFileQueue,

    /// Unresolved includes reported for the file being processed
    pub pending: BTreeSet<String>,

    /// Includes still unresolved when a file's loop was finalized
    pub unresolved: BTreeMap<PathBuf, BTreeSet<String>>,

    pub stats: DiscoveryStats,
}

impl BuildContext {
    pub fn new(entry_file: impl Into<PathBuf>, build_path: impl Into<PathBuf>) -> Self {
        Self {
            entry_file: entry_file.into(),
            build_path: build_path.into(),
            base_include_folders: Vec::new(),
            imported: ImportedLibraries::new(),
            folders: SourceFolderQueue::new(),
            source_files: SourceFileQueue::new(),
            pending: BTreeSet::new(),
            unresolved: BTreeMap::new(),
            stats: DiscoveryStats::default(),
        }
    }

    pub fn with_include_folders(mut self, folders: impl IntoIterator<Item = PathBuf>) -> Self {
        self.base_include_folders.extend(folders);
        self
    }

    /// Current include path: base folders, then one folder per imported
    /// library in import order
    pub fn include_folders(&self) -> Vec<PathBuf> {
        let mut folders = self.base_include_folders.clone();
        folders.extend(self.imported.libraries().map(|lib| lib.include_folder()));
        folders
    }

    pub fn finalize_target(&self) -> PathBuf {
        self.build_path.join(FINALIZE_TARGET)
    }

    pub(crate) fn record_unresolved(&mut self, file: &Path, includes: BTreeSet<String>) {
        self.unresolved
            .entry(file.to_path_buf())
            .or_default()
            .extend(includes);
    }
}
