//! In-memory collaborators for resolver tests.

use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::collaborators::{
    DiscoveryRequest, FolderExpander, ImportValidator, IncludeOracle, LibraryCatalog,
};
use crate::error::{ResolveError, Result};
use crate::imported::ImportedLibraries;
use crate::types::{Library, LibraryHandle, LibraryLayout, SourceFolder};

/// Recursive-layout library rooted at `/libs/<name>`
pub fn lib(name: &str, headers: &[&str]) -> LibraryHandle {
    Arc::new(
        Library::new(name, format!("/libs/{name}"), LibraryLayout::Recursive)
            .with_headers(headers.iter().copied()),
    )
}

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub file: PathBuf,
    pub include_folders: usize,
    pub target: Option<PathBuf>,
}

/// Oracle that behaves like a preprocessor stopping at the first missing
/// header: it walks the include tree depth-first and reports the first
/// include not reachable through the requested include folders.
#[derive(Debug, Default)]
pub struct SimulatedOracle {
    sources: HashMap<PathBuf, Vec<String>>,
    headers: HashMap<String, Vec<String>>,
    providers: HashMap<String, PathBuf>,
    system: HashSet<String>,
    fail_on: Option<PathBuf>,
    fail_finalize: bool,
    pub calls: Vec<RecordedCall>,
}

impl SimulatedOracle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn source(mut self, file: &str, includes: &[&str]) -> Self {
        self.sources.insert(
            PathBuf::from(file),
            includes.iter().map(|s| s.to_string()).collect(),
        );
        self
    }

    pub fn header(mut self, name: &str, includes: &[&str]) -> Self {
        self.headers.insert(
            name.to_string(),
            includes.iter().map(|s| s.to_string()).collect(),
        );
        self
    }

    pub fn provided_by(mut self, library: &Library) -> Self {
        for header in &library.headers {
            self.providers
                .insert(header.clone(), library.include_folder());
        }
        self
    }

    pub fn system_header(mut self, name: &str) -> Self {
        self.system.insert(name.to_string());
        self
    }

    pub fn fail_on(mut self, file: &str) -> Self {
        self.fail_on = Some(PathBuf::from(file));
        self
    }

    pub fn fail_finalize(mut self) -> Self {
        self.fail_finalize = true;
        self
    }

    pub fn discovery_calls(&self) -> usize {
        self.calls.iter().filter(|c| c.target.is_none()).count()
    }

    pub fn finalize_calls(&self) -> usize {
        self.calls.iter().filter(|c| c.target.is_some()).count()
    }

    /// Files seen by the oracle, in first-call order
    pub fn processed_files(&self) -> Vec<PathBuf> {
        let mut seen = HashSet::new();
        self.calls
            .iter()
            .filter(|c| seen.insert(c.file.clone()))
            .map(|c| c.file.clone())
            .collect()
    }

    fn first_missing(
        &self,
        includes: &[String],
        folders: &[PathBuf],
        visited: &mut HashSet<String>,
    ) -> Option<String> {
        for include in includes {
            if self.system.contains(include) {
                continue;
            }
            let reachable = self
                .providers
                .get(include)
                .is_some_and(|folder| folders.contains(folder));
            if !reachable {
                return Some(include.clone());
            }
            if !visited.insert(include.clone()) {
                continue;
            }
            let nested = self.headers.get(include).cloned().unwrap_or_default();
            if let Some(missing) = self.first_missing(&nested, folders, visited) {
                return Some(missing);
            }
        }
        None
    }
}

impl IncludeOracle for SimulatedOracle {
    fn discover(&mut self, request: &DiscoveryRequest<'_>) -> Result<BTreeSet<String>> {
        self.calls.push(RecordedCall {
            file: request.file.to_path_buf(),
            include_folders: request.include_folders.len(),
            target: request.target.map(Path::to_path_buf),
        });

        if self.fail_on.as_deref() == Some(request.file) {
            return Err(ResolveError::oracle(request.file, "simulated failure"));
        }
        if request.is_finalize() {
            if self.fail_finalize {
                return Err(ResolveError::oracle(request.file, "finalize failed"));
            }
            return Ok(BTreeSet::new());
        }

        let includes = self.sources.get(request.file).cloned().unwrap_or_default();
        let mut visited = HashSet::new();
        Ok(self
            .first_missing(&includes, request.include_folders, &mut visited)
            .into_iter()
            .collect())
    }
}

#[derive(Debug, Default)]
pub struct MapCatalog {
    by_header: HashMap<String, LibraryHandle>,
}

impl MapCatalog {
    pub fn new(libraries: impl IntoIterator<Item = LibraryHandle>) -> Self {
        let mut by_header = HashMap::new();
        for library in libraries {
            for header in &library.headers {
                by_header.insert(header.clone(), library.clone());
            }
        }
        Self { by_header }
    }
}

impl LibraryCatalog for MapCatalog {
    fn resolve(&self, include: &str) -> Option<LibraryHandle> {
        self.by_header.get(include).cloned()
    }
}

#[derive(Debug, Default)]
pub struct MapExpander {
    folders: HashMap<PathBuf, Vec<PathBuf>>,
    failing: HashSet<PathBuf>,
    expanded: RefCell<Vec<SourceFolder>>,
}

impl MapExpander {
    pub fn folder(mut self, folder: &str, files: &[&str]) -> Self {
        self.folders.insert(
            PathBuf::from(folder),
            files.iter().map(PathBuf::from).collect(),
        );
        self
    }

    pub fn failing(mut self, folder: &str) -> Self {
        self.failing.insert(PathBuf::from(folder));
        self
    }

    pub fn expanded(&self) -> Vec<SourceFolder> {
        self.expanded.borrow().clone()
    }
}

impl FolderExpander for MapExpander {
    fn expand(&self, folder: &SourceFolder) -> Result<Vec<PathBuf>> {
        self.expanded.borrow_mut().push(folder.clone());
        if self.failing.contains(&folder.folder) {
            return Err(ResolveError::filesystem(&folder.folder, "permission denied"));
        }
        Ok(self
            .folders
            .get(&folder.folder)
            .cloned()
            .unwrap_or_default())
    }
}

pub struct AcceptAll;

impl ImportValidator for AcceptAll {
    fn validate(&self, _libraries: &ImportedLibraries) -> Result<()> {
        Ok(())
    }
}
