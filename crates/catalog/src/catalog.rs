use depfind_resolver::{Library, LibraryCatalog, LibraryHandle, LibraryLayout};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::error::{CatalogError, Result};
use crate::manifest::LibraryManifest;
use crate::scanner::FolderScanner;

/// Libraries found under a list of root folders, indexed by the headers
/// they expose.
///
/// Roots are searched in order: when two roots hold a library with the
/// same name, the earlier one wins and the later one is ignored.
#[derive(Debug)]
pub struct FsCatalog {
    libraries: Vec<LibraryHandle>,
    by_name: HashMap<String, LibraryHandle>,
    by_header: HashMap<String, Vec<LibraryHandle>>,
    warned: Mutex<HashSet<String>>,
}

impl FsCatalog {
    /// Index every library directory under `roots`
    pub fn load<P: AsRef<Path>>(roots: &[P]) -> Result<Self> {
        let headers = FolderScanner::headers();
        let mut libraries = Vec::new();

        for root in roots {
            let root = root.as_ref();
            if !root.is_dir() {
                return Err(CatalogError::MissingRoot(root.to_path_buf()));
            }
            let mut found = 0;
            for dir in library_dirs(root)? {
                libraries.push(load_library(&dir, &headers)?);
                found += 1;
            }
            log::debug!("{}: {} libraries", root.display(), found);
        }

        let catalog = Self::from_libraries(libraries);
        log::info!("Library catalog: {} libraries", catalog.libraries.len());
        Ok(catalog)
    }

    pub fn from_libraries(libraries: impl IntoIterator<Item = Library>) -> Self {
        let mut kept = Vec::new();
        let mut by_name = HashMap::new();
        let mut by_header: HashMap<String, Vec<LibraryHandle>> = HashMap::new();

        for library in libraries {
            if by_name.contains_key(&library.name) {
                log::debug!(
                    "Library {} at {} shadowed by an earlier root",
                    library.name,
                    library.root.display()
                );
                continue;
            }
            let handle = Arc::new(library);
            for header in &handle.headers {
                by_header
                    .entry(header.clone())
                    .or_default()
                    .push(handle.clone());
            }
            by_name.insert(handle.name.clone(), handle.clone());
            kept.push(handle);
        }

        Self {
            libraries: kept,
            by_name,
            by_header,
            warned: Mutex::new(HashSet::new()),
        }
    }

    pub fn libraries(&self) -> &[LibraryHandle] {
        &self.libraries
    }

    pub fn len(&self) -> usize {
        self.libraries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.libraries.is_empty()
    }

    pub fn by_name(&self, name: &str) -> Result<LibraryHandle> {
        self.by_name
            .get(name)
            .cloned()
            .ok_or_else(|| CatalogError::UnknownLibrary(name.to_string()))
    }

    /// Every library exposing `include`, in root order
    pub fn candidates(&self, include: &str) -> &[LibraryHandle] {
        self.by_header
            .get(include)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Prefer the library named after the header, else the first candidate
    fn select<'c>(include: &str, candidates: &'c [LibraryHandle]) -> Option<&'c LibraryHandle> {
        let stem = Path::new(include)
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or(include);
        candidates
            .iter()
            .find(|lib| lib.name.eq_ignore_ascii_case(stem))
            .or_else(|| candidates.first())
    }

    fn warn_once(&self, include: &str, chosen: &Library, candidates: &[LibraryHandle]) {
        let Ok(mut warned) = self.warned.lock() else {
            return;
        };
        if !warned.insert(include.to_string()) {
            return;
        }
        let unused: Vec<String> = candidates
            .iter()
            .filter(|lib| lib.name != chosen.name)
            .map(|lib| format!("{} ({})", lib.name, lib.root.display()))
            .collect();
        log::warn!(
            "Multiple libraries were found for \"{}\": used {} ({}), not used {}",
            include,
            chosen.name,
            chosen.root.display(),
            unused.join(", ")
        );
    }
}

impl LibraryCatalog for FsCatalog {
    fn resolve(&self, include: &str) -> Option<LibraryHandle> {
        let candidates = self.candidates(include);
        let chosen = Self::select(include, candidates)?;
        if candidates.len() > 1 {
            self.warn_once(include, chosen, candidates);
        }
        Some(chosen.clone())
    }
}

/// Non-hidden sub-directories of `root`, sorted by name
fn library_dirs(root: &Path) -> Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(root)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let hidden = entry.file_name().to_string_lossy().starts_with('.');
        if !hidden {
            dirs.push(entry.path());
        }
    }
    dirs.sort();
    Ok(dirs)
}

fn load_library(dir: &Path, headers: &FolderScanner) -> Result<Library> {
    let manifest = LibraryManifest::load(dir)?.unwrap_or_default();
    let dir_name = dir
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = manifest.name.unwrap_or(dir_name);

    let layout = if dir.join("src").is_dir() {
        LibraryLayout::Recursive
    } else {
        LibraryLayout::Flat
    };
    let mut library = Library::new(name, dir, layout);
    if let Some(version) = manifest.version {
        library = library.with_version(version);
    }
    let utility = dir.join("utility");
    if utility.is_dir() {
        library = library.with_utility_folder(utility);
    }

    let exposed = headers
        .scan(&library.include_folder(), false)?
        .into_iter()
        .filter_map(|path| {
            path.file_name()
                .map(|name| name.to_string_lossy().into_owned())
        })
        .collect::<Vec<_>>();
    log::trace!("{}: {} headers", library.name, exposed.len());
    Ok(library.with_headers(exposed))
}
