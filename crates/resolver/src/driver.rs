use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use crate::collaborators::{FolderExpander, ImportValidator, IncludeOracle, LibraryCatalog};
use crate::context::{BuildContext, DiscoveryStats};
use crate::error::Result;
use crate::imported::ImportedLibrary;
use crate::types::{LibraryHandle, SourceFolder};

/// Inputs of one resolution run.
///
/// Source files are deduplicated by path, so `entry_file` and
/// `build_path` must use the same path form the [`FolderExpander`]
/// reports (the filesystem scanner reports paths under the folder it was
/// given, as given). Callers working from user input should canonicalize
/// both first.
#[derive(Debug, Clone, Default)]
pub struct ResolveRequest {
    /// Source file the discovery starts from
    pub entry_file: PathBuf,

    /// Build output location, scanned recursively once the entry file converged
    pub build_path: PathBuf,

    /// Libraries imported before discovery starts
    pub initial_libraries: Vec<LibraryHandle>,

    /// Include folders always on the include path
    pub include_folders: Vec<PathBuf>,

    /// Include names already known to be needed
    pub includes: Vec<String>,
}

/// Outcome of a successful run
#[derive(Debug, Clone, Serialize)]
pub struct Resolution {
    /// Imported libraries in discovery order
    pub libraries: Vec<ImportedLibrary>,

    /// Every source file that went through discovery, entry file first
    pub source_files: Vec<PathBuf>,

    /// Includes left unresolved by finalized files
    pub unresolved: BTreeMap<PathBuf, BTreeSet<String>>,

    pub stats: DiscoveryStats,
}

impl Resolution {
    pub fn library_names(&self) -> Vec<&str> {
        self.libraries
            .iter()
            .map(|entry| entry.library.name.as_str())
            .collect()
    }
}

/// Drives include discovery over a growing set of source files.
///
/// Borrows its collaborators so callers keep ownership of them (and of
/// whatever state they accumulate) across runs.
pub struct Resolver<'a> {
    pub(crate) oracle: &'a mut dyn IncludeOracle,
    pub(crate) catalog: &'a dyn LibraryCatalog,
    pub(crate) expander: &'a dyn FolderExpander,
    pub(crate) validator: &'a dyn ImportValidator,
}

impl<'a> Resolver<'a> {
    pub fn new(
        oracle: &'a mut dyn IncludeOracle,
        catalog: &'a dyn LibraryCatalog,
        expander: &'a dyn FolderExpander,
        validator: &'a dyn ImportValidator,
    ) -> Self {
        Self {
            oracle,
            catalog,
            expander,
            validator,
        }
    }

    /// Resolve everything reachable from `request.entry_file`.
    ///
    /// Any failure aborts the run; no partial result is returned.
    pub fn resolve(&mut self, request: ResolveRequest) -> Result<Resolution> {
        let mut ctx = BuildContext::new(request.entry_file, request.build_path)
            .with_include_folders(request.include_folders);
        for library in request.initial_libraries {
            if ctx.imported.insert(library, None) {
                ctx.stats.libraries_imported += 1;
            }
        }
        self.import_includes(&mut ctx, &request.includes);

        self.run(&mut ctx)?;

        log::info!(
            "Resolved {} libraries over {} source files ({} oracle calls)",
            ctx.imported.len(),
            ctx.source_files.history().len(),
            ctx.stats.oracle_calls + ctx.stats.finalize_calls
        );

        Ok(Resolution {
            libraries: ctx.imported.into_entries(),
            source_files: ctx.source_files.history().to_vec(),
            unresolved: ctx.unresolved,
            stats: ctx.stats,
        })
    }

    /// Global discovery over an already prepared context
    pub fn run(&mut self, ctx: &mut BuildContext) -> Result<()> {
        let entry = ctx.entry_file.clone();
        ctx.source_files.mark_seen(entry.clone());
        self.find_includes_until_done(ctx, &entry)?;

        ctx.folders
            .push(SourceFolder::new(ctx.build_path.clone(), true));
        let known: Vec<SourceFolder> = ctx
            .imported
            .libraries()
            .flat_map(|library| library.source_folders())
            .collect();
        for folder in known {
            ctx.folders.push(folder);
        }

        self.collect_source_files(ctx)?;

        while let Some(file) = ctx.source_files.pop() {
            self.find_includes_until_done(ctx, &file)?;
            self.collect_source_files(ctx)?;
        }

        self.validator.validate(&ctx.imported)
    }

    /// Drain the folder queue into the source file queue. Returns how many
    /// new files were queued.
    pub fn collect_source_files(&mut self, ctx: &mut BuildContext) -> Result<usize> {
        let mut added = 0;
        while let Some(folder) = ctx.folders.pop() {
            let files = self.expander.expand(&folder)?;
            log::debug!(
                "{} ({}): {} source files",
                folder.folder.display(),
                if folder.recurse { "recursive" } else { "flat" },
                files.len()
            );
            for file in files {
                if ctx.source_files.push(file) {
                    added += 1;
                }
            }
        }
        Ok(added)
    }
}
