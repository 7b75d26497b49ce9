use depfind_resolver::{ImportValidator, ImportedLibraries, LibraryLayout, ResolveError, Result};

/// Checks the imported libraries against their on-disk layout and
/// against each other.
#[derive(Debug, Default, Clone, Copy)]
pub struct LibraryValidator;

impl LibraryValidator {
    pub fn new() -> Self {
        Self
    }
}

impl ImportValidator for LibraryValidator {
    fn validate(&self, libraries: &ImportedLibraries) -> Result<()> {
        for entry in libraries.iter() {
            let library = &entry.library;
            if library.layout == LibraryLayout::Recursive && library.utility_folder.is_some() {
                return Err(ResolveError::invalid_library(
                    &library.name,
                    "can't use both 'src' and 'utility' folders",
                ));
            }
            for folder in library.source_folders() {
                if !folder.folder.is_dir() {
                    return Err(ResolveError::invalid_library(
                        &library.name,
                        format!("source folder {} does not exist", folder.folder.display()),
                    ));
                }
            }
        }

        for entry in libraries.iter() {
            let Some(include) = &entry.include else {
                continue;
            };
            let conflict = libraries
                .libraries()
                .find(|other| other.name != entry.library.name && other.provides(include));
            if let Some(other) = conflict {
                return Err(ResolveError::ambiguity(
                    include,
                    &entry.library.name,
                    &other.name,
                ));
            }
        }

        log::debug!("{} imported libraries validated", libraries.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use depfind_resolver::Library;
    use std::fs;
    use std::sync::Arc;
    use tempfile::tempdir;

    #[test]
    fn accepts_well_formed_libraries() {
        let temp = tempdir().unwrap();
        fs::create_dir_all(temp.path().join("Wire/src")).unwrap();
        let mut set = ImportedLibraries::new();
        set.insert(
            Arc::new(
                Library::new("Wire", temp.path().join("Wire"), LibraryLayout::Recursive)
                    .with_headers(["Wire.h"]),
            ),
            Some("Wire.h"),
        );

        assert!(LibraryValidator::new().validate(&set).is_ok());
    }

    #[test]
    fn rejects_src_with_utility_folder() {
        let temp = tempdir().unwrap();
        let root = temp.path().join("Mixed");
        fs::create_dir_all(root.join("src")).unwrap();
        let mut set = ImportedLibraries::new();
        set.insert(
            Arc::new(
                Library::new("Mixed", &root, LibraryLayout::Recursive)
                    .with_utility_folder(root.join("utility")),
            ),
            None,
        );

        let err = LibraryValidator::new().validate(&set).unwrap_err();
        assert!(matches!(err, ResolveError::InvalidLibrary { ref library, .. } if library == "Mixed"));
    }

    #[test]
    fn rejects_missing_source_folder() {
        let temp = tempdir().unwrap();
        let mut set = ImportedLibraries::new();
        set.insert(
            Arc::new(Library::new(
                "Ghost",
                temp.path().join("Ghost"),
                LibraryLayout::Flat,
            )),
            None,
        );

        assert!(LibraryValidator::new().validate(&set).is_err());
    }

    #[test]
    fn rejects_two_libraries_claiming_the_same_include() {
        let temp = tempdir().unwrap();
        fs::create_dir_all(temp.path().join("A")).unwrap();
        fs::create_dir_all(temp.path().join("B")).unwrap();
        let mut set = ImportedLibraries::new();
        set.insert(
            Arc::new(
                Library::new("A", temp.path().join("A"), LibraryLayout::Flat)
                    .with_headers(["Display.h"]),
            ),
            Some("Display.h"),
        );
        set.insert(
            Arc::new(
                Library::new("B", temp.path().join("B"), LibraryLayout::Flat)
                    .with_headers(["Display.h", "B.h"]),
            ),
            Some("B.h"),
        );

        let err = LibraryValidator::new().validate(&set).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Include 'Display.h' is provided by both 'A' and 'B'"
        );
    }
}
