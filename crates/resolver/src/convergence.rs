use std::collections::BTreeSet;
use std::path::Path;

use crate::collaborators::DiscoveryRequest;
use crate::context::BuildContext;
use crate::driver::Resolver;
use crate::error::Result;

/// How a file's convergence loop ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Convergence {
    /// The oracle reported nothing unresolved
    Satisfied { iterations: usize },

    /// The library set stopped growing while includes were still
    /// unresolved; a finalize pass produced the artifact instead
    Finalized {
        iterations: usize,
        unresolved: BTreeSet<String>,
    },
}

impl Convergence {
    pub fn iterations(&self) -> usize {
        match self {
            Self::Satisfied { iterations } | Self::Finalized { iterations, .. } => *iterations,
        }
    }
}

impl Resolver<'_> {
    /// Run the oracle on `file` until its includes stop producing new libraries.
    ///
    /// Each pass resolves the reported includes against the catalog and
    /// imports what it finds. The loop ends when nothing is reported, or
    /// when a pass imports nothing; the latter triggers exactly one
    /// finalize-mode oracle call whose outcome becomes the loop's outcome.
    pub fn find_includes_until_done(
        &mut self,
        ctx: &mut BuildContext,
        file: &Path,
    ) -> Result<Convergence> {
        ctx.stats.files_processed += 1;
        let mut iterations = 0;

        loop {
            let before = ctx.imported.len();
            iterations += 1;

            let include_folders = ctx.include_folders();
            let request = DiscoveryRequest {
                file,
                include_folders: &include_folders,
                target: None,
            };
            ctx.pending = self.oracle.discover(&request)?;
            ctx.stats.oracle_calls += 1;

            let pending = std::mem::take(&mut ctx.pending);
            self.import_includes(ctx, &pending);
            ctx.pending = pending;

            if ctx.pending.is_empty() {
                log::debug!(
                    "{}: includes satisfied after {} pass(es)",
                    file.display(),
                    iterations
                );
                return Ok(Convergence::Satisfied { iterations });
            }

            if ctx.imported.len() == before {
                let unresolved = std::mem::take(&mut ctx.pending);
                log::debug!(
                    "{}: no new library for {:?}, finalizing",
                    file.display(),
                    unresolved
                );

                let target = ctx.finalize_target();
                let request = DiscoveryRequest {
                    file,
                    include_folders: &include_folders,
                    target: Some(&target),
                };
                self.oracle.discover(&request)?;
                ctx.stats.finalize_calls += 1;
                ctx.record_unresolved(file, unresolved.clone());

                return Ok(Convergence::Finalized {
                    iterations,
                    unresolved,
                });
            }

            ctx.pending.clear();
        }
    }

    /// Resolve `includes` against the catalog, importing every library not
    /// yet imported and queueing its source folders. Returns how many
    /// libraries were added.
    pub fn import_includes<'i, I>(&self, ctx: &mut BuildContext, includes: I) -> usize
    where
        I: IntoIterator<Item = &'i String>,
    {
        let mut added = 0;
        for include in includes {
            let Some(library) = self.catalog.resolve(include) else {
                log::debug!("No library provides '{include}'");
                continue;
            };
            if ctx.imported.contains(&library.name) {
                continue;
            }

            log::debug!("'{}' resolved to library {}", include, library.name);
            for folder in library.source_folders() {
                ctx.folders.push(folder);
            }
            ctx.imported.insert(library, Some(include.as_str()));
            ctx.stats.libraries_imported += 1;
            added += 1;
        }
        added
    }
}
