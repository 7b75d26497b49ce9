use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::{CatalogError, Result};

pub const MANIFEST_FILE: &str = "library.properties";

/// Fields of a `library.properties` file the catalog cares about
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LibraryManifest {
    pub name: Option<String>,
    pub version: Option<String>,
}

impl LibraryManifest {
    /// Read the manifest in `library_dir`, if there is one
    pub fn load(library_dir: &Path) -> Result<Option<Self>> {
        let path = library_dir.join(MANIFEST_FILE);
        if !path.is_file() {
            return Ok(None);
        }
        let raw = fs::read(&path)?;
        let text = String::from_utf8(raw).map_err(|err| CatalogError::InvalidManifest {
            path: path.clone(),
            message: err.to_string(),
        })?;
        Ok(Some(Self::parse(&text)))
    }

    pub fn parse(text: &str) -> Self {
        let fields = parse_properties(text);
        let non_empty = |key: &str| fields.get(key).filter(|v| !v.is_empty()).cloned();
        Self {
            name: non_empty("name"),
            version: non_empty("version"),
        }
    }
}

/// `key=value` lines; `#` starts a comment line, later keys win
fn parse_properties(text: &str) -> BTreeMap<String, String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
        .collect()
}
