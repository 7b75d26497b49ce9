use depfind_resolver::{FolderExpander, ResolveError, SourceFolder};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

use crate::error::{CatalogError, Result};

/// Scanner turning source folders into the files to compile
#[derive(Debug, Clone)]
pub struct FolderScanner {
    extensions: Vec<String>,
}

impl FolderScanner {
    pub fn new() -> Self {
        Self::with_extensions(SOURCE_EXTENSIONS)
    }

    /// Scanner for headers exposed by a library
    pub fn headers() -> Self {
        Self::with_extensions(HEADER_EXTENSIONS)
    }

    pub fn with_extensions<S: AsRef<str>>(extensions: &[S]) -> Self {
        Self {
            extensions: extensions
                .iter()
                .map(|ext| ext.as_ref().to_string())
                .collect(),
        }
    }

    /// List matching files in `folder`, descending into sub-folders only
    /// when `recurse` is set. Results are sorted by path.
    pub fn scan(&self, folder: &Path, recurse: bool) -> Result<Vec<PathBuf>> {
        if !folder.is_dir() {
            return Err(CatalogError::MissingFolder(folder.to_path_buf()));
        }

        let mut builder = WalkBuilder::new(folder);
        builder
            .standard_filters(false)
            .hidden(true) // skip dot-files and dot-dirs
            .max_depth(if recurse { None } else { Some(1) });
        builder.filter_entry(|entry| !FolderScanner::is_ignored_scope(entry.path()));

        let mut files = Vec::new();
        for result in builder.build() {
            let entry = result?;
            let Some(file_type) = entry.file_type() else {
                continue;
            };
            if !file_type.is_file() {
                continue;
            }

            let path = entry.path();
            if self.matches(path) {
                files.push(path.to_path_buf());
            } else {
                log::trace!("Skipping {}", path.display());
            }
        }

        files.sort();
        Ok(files)
    }

    fn matches(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|candidate| candidate == ext))
    }

    fn is_ignored_scope(path: &Path) -> bool {
        path.file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| IGNORED_SCOPES.contains(&name))
    }
}

impl Default for FolderScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl FolderExpander for FolderScanner {
    fn expand(&self, folder: &SourceFolder) -> depfind_resolver::Result<Vec<PathBuf>> {
        self.scan(&folder.folder, folder.recurse)
            .map_err(|err| ResolveError::filesystem(&folder.folder, err.to_string()))
    }
}

const IGNORED_SCOPES: &[&str] = &["CVS", "RCS", "SCCS"];

// Case matters: `.S` is preprocessed assembly, `.s` is not.
const SOURCE_EXTENSIONS: &[&str] = &["c", "cpp", "cc", "cxx", "S"];

const HEADER_EXTENSIONS: &[&str] = &["h", "hh", "hpp", "hxx"];

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"").unwrap();
    }

    #[test]
    fn flat_scan_ignores_subfolders() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        touch(&root.join("b.cpp"));
        touch(&root.join("a.c"));
        touch(&root.join("readme.md"));
        touch(&root.join("nested/deep.cpp"));

        let files = FolderScanner::new().scan(root, false).unwrap();

        assert_eq!(files, vec![root.join("a.c"), root.join("b.cpp")]);
    }

    #[test]
    fn recursive_scan_skips_hidden_and_vcs_dirs() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        touch(&root.join("main.cpp"));
        touch(&root.join("arch/avr/timer.S"));
        touch(&root.join("arch/avr/notes.s"));
        touch(&root.join(".git/hook.c"));
        touch(&root.join("SCCS/old.c"));
        touch(&root.join(".hidden.cpp"));

        let files = FolderScanner::new().scan(root, true).unwrap();

        assert_eq!(
            files,
            vec![root.join("arch/avr/timer.S"), root.join("main.cpp")]
        );
    }

    #[test]
    fn missing_folder_is_an_error() {
        let temp = tempdir().unwrap();
        let missing = temp.path().join("nope");

        let err = FolderScanner::new()
            .expand(&SourceFolder::new(&missing, true))
            .unwrap_err();

        match err {
            ResolveError::Filesystem { folder, .. } => assert_eq!(folder, missing),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn header_scanner_lists_headers_only() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        touch(&root.join("Wire.h"));
        touch(&root.join("Wire.cpp"));
        touch(&root.join("twi.hpp"));

        let files = FolderScanner::headers().scan(root, false).unwrap();

        assert_eq!(files, vec![root.join("Wire.h"), root.join("twi.hpp")]);
    }
}
