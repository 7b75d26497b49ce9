//! # depfind resolver
//!
//! Discovers which libraries a build needs by following unresolved
//! includes until nothing new turns up.
//!
//! ## Pipeline
//!
//! ```text
//! entry file
//!     │
//!     ├──> Convergence loop (per file)
//!     │      ├─ oracle: which includes are unresolved?
//!     │      ├─ catalog: which library provides each one?
//!     │      └─ import new libraries, queue their source folders
//!     │
//!     ├──> Folder queue ──> source file queue (deduplicated, FIFO)
//!     │
//!     ├──> Convergence loop for every queued file
//!     │
//!     └──> Validator over the imported libraries
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use depfind_resolver::{
//!     FolderExpander, ImportValidator, IncludeOracle, LibraryCatalog, ResolveRequest, Resolver,
//! };
//!
//! fn build(
//!     oracle: &mut dyn IncludeOracle,
//!     catalog: &dyn LibraryCatalog,
//!     expander: &dyn FolderExpander,
//!     validator: &dyn ImportValidator,
//! ) -> depfind_resolver::Result<()> {
//!     let request = ResolveRequest {
//!         entry_file: "build/sketch.cpp".into(),
//!         build_path: "build".into(),
//!         ..Default::default()
//!     };
//!     let resolution = Resolver::new(oracle, catalog, expander, validator).resolve(request)?;
//!     println!("{:?}", resolution.library_names());
//!     Ok(())
//! }
//! ```

mod collaborators;
mod context;
mod convergence;
mod driver;
mod error;
mod imported;
mod queue;
mod types;

#[cfg(test)]
mod test_support;

pub use collaborators::{
    DiscoveryRequest, FolderExpander, ImportValidator, IncludeOracle, LibraryCatalog,
};
pub use context::{BuildContext, DiscoveryStats, FINALIZE_TARGET};
pub use convergence::Convergence;
pub use driver::{Resolution, ResolveRequest, Resolver};
pub use error::{ResolveError, Result};
pub use imported::{ImportedLibraries, ImportedLibrary};
pub use queue::{SourceFileQueue, SourceFolderQueue, UniqueQueue};
pub use types::{Library, LibraryHandle, LibraryLayout, SourceFolder};
