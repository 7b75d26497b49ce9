//! Library half of the `depfind` binary: wires the filesystem catalog,
//! the preprocessor oracle and the resolver together.

pub mod config;
pub mod report;

use anyhow::{Context, Result};
use depfind_catalog::{FolderScanner, FsCatalog, LibraryValidator};
use depfind_preproc::GccOracle;
use depfind_resolver::{LibraryHandle, Resolution, ResolveRequest, Resolver};
use std::fs;
use std::path::{Path, PathBuf};

pub use config::{Config, Overrides, DEFAULT_CONFIG_FILE};

/// Resolve every library and source file reachable from `entry`
pub fn resolve(config: &Config, entry: &Path) -> Result<Resolution> {
    config.validate()?;
    if !entry.is_file() {
        anyhow::bail!("Entry file not found: {}", entry.display());
    }

    let entry = canonicalize(entry)?;
    let build_path = config.build_path_for(&entry);
    fs::create_dir_all(&build_path)
        .with_context(|| format!("Failed to create build folder {}", build_path.display()))?;
    let build_path = canonicalize(&build_path)?;
    let library_roots = config
        .library_roots
        .iter()
        .map(|root| canonicalize(root))
        .collect::<Result<Vec<_>>>()?;

    let catalog = FsCatalog::load(&library_roots).context("Failed to load library catalog")?;
    let initial_libraries = config
        .libraries
        .iter()
        .map(|name| catalog.by_name(name))
        .collect::<Result<Vec<_>, _>>()
        .context("Invalid library list")?;

    let request = ResolveRequest {
        entry_file: entry.clone(),
        build_path,
        initial_libraries,
        include_folders: config.include_folders.clone(),
        includes: config.includes.clone(),
    };

    let mut oracle = GccOracle::new(config.preprocessor.clone());
    let scanner = FolderScanner::new();
    let validator = LibraryValidator::new();
    let resolution = Resolver::new(&mut oracle, &catalog, &scanner, &validator)
        .resolve(request)
        .with_context(|| format!("Failed to resolve includes of {}", entry.display()))?;

    for (file, includes) in &resolution.unresolved {
        log::warn!(
            "{}: no library provides {}",
            file.display(),
            includes.iter().cloned().collect::<Vec<_>>().join(", ")
        );
    }

    Ok(resolution)
}

// The resolver dedups files by path, so the entry file, the build folder
// and the library roots must all be spelled the same way the scanner
// reports files under them.
fn canonicalize(path: &Path) -> Result<PathBuf> {
    fs::canonicalize(path).with_context(|| format!("Failed to resolve path {}", path.display()))
}

/// Every library in the configured roots
pub fn list_libraries(config: &Config) -> Result<Vec<LibraryHandle>> {
    config.validate()?;
    let catalog = FsCatalog::load(&config.library_roots).context("Failed to load library catalog")?;
    Ok(catalog.libraries().to_vec())
}
