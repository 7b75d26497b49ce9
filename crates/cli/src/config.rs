use anyhow::{anyhow, bail, Context, Result};
use depfind_preproc::PreprocessorConfig;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "depfind.toml";

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    build_path: Option<PathBuf>,
    library_roots: Option<Vec<PathBuf>>,
    include_folders: Option<Vec<PathBuf>>,
    libraries: Option<Vec<String>>,
    includes: Option<Vec<String>>,
    preprocessor: Option<PreprocessorConfig>,
}

/// Effective settings for one invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Build output location; defaults to the entry file's folder
    pub build_path: Option<PathBuf>,

    /// Library roots in priority order
    pub library_roots: Vec<PathBuf>,

    /// Core/variant folders always on the include path
    pub include_folders: Vec<PathBuf>,

    /// Libraries imported before discovery
    pub libraries: Vec<String>,

    /// Include names resolved before the entry file is scanned
    pub includes: Vec<String>,

    pub preprocessor: PreprocessorConfig,
}

/// Command line values layered over the file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub build_path: Option<PathBuf>,
    pub library_roots: Vec<PathBuf>,
    pub include_folders: Vec<PathBuf>,
    pub libraries: Vec<String>,
    pub compiler: Option<PathBuf>,
}

impl Config {
    /// Load `explicit`, or `depfind.toml` in the working directory when it
    /// exists, or fall back to defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.is_file() {
                    return Ok(Self::default());
                }
                default
            }
        };

        let text = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = Self::parse(&text)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        log::debug!("Loaded config from {}", path.display());
        Ok(config.rebased(base))
    }

    pub fn parse(text: &str) -> Result<Self> {
        let raw: RawConfig = toml::from_str(text).map_err(|err| anyhow!("{err}"))?;
        Ok(Self {
            build_path: raw.build_path,
            library_roots: raw.library_roots.unwrap_or_default(),
            include_folders: raw.include_folders.unwrap_or_default(),
            libraries: raw.libraries.unwrap_or_default(),
            includes: raw.includes.unwrap_or_default(),
            preprocessor: raw.preprocessor.unwrap_or_default(),
        })
    }

    /// Resolve relative paths against the config file's folder
    fn rebased(mut self, base: &Path) -> Self {
        let rebase = |path: &mut PathBuf| {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        };
        if let Some(build_path) = self.build_path.as_mut() {
            rebase(build_path);
        }
        self.library_roots.iter_mut().for_each(rebase);
        self.include_folders.iter_mut().for_each(rebase);
        self
    }

    /// Command line roots take priority over configured ones; folders and
    /// libraries are appended.
    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if overrides.build_path.is_some() {
            self.build_path = overrides.build_path;
        }
        let mut roots = overrides.library_roots;
        roots.append(&mut self.library_roots);
        self.library_roots = roots;
        self.include_folders.extend(overrides.include_folders);
        for library in overrides.libraries {
            if !self.libraries.contains(&library) {
                self.libraries.push(library);
            }
        }
        if let Some(compiler) = overrides.compiler {
            self.preprocessor.command = compiler;
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        for root in &self.library_roots {
            if !root.is_dir() {
                bail!("Library root is not a directory: {}", root.display());
            }
        }
        if self.preprocessor.command.as_os_str().is_empty() {
            bail!("preprocessor.command must not be empty");
        }
        Ok(())
    }

    /// Build path for `entry`: the configured one, else the entry's folder
    pub fn build_path_for(&self, entry: &Path) -> PathBuf {
        self.build_path.clone().unwrap_or_else(|| {
            // `Path::parent` of a bare file name is the empty path
            match entry.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
                _ => PathBuf::from("."),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn parses_full_config() {
        let config = Config::parse(
            r#"
            build_path = "build"
            library_roots = ["libs", "/opt/platform/libraries"]
            include_folders = ["/opt/core"]
            libraries = ["Wire"]
            includes = ["Arduino.h"]

            [preprocessor]
            command = "avr-g++"
            flags = ["-mmcu=atmega328p"]
            defines = ["F_CPU=16000000L"]
            "#,
        )
        .unwrap();

        assert_eq!(config.build_path, Some(PathBuf::from("build")));
        assert_eq!(config.library_roots.len(), 2);
        assert_eq!(config.libraries, vec!["Wire".to_string()]);
        assert_eq!(config.preprocessor.command, PathBuf::from("avr-g++"));
        assert_eq!(config.preprocessor.language, "c++");
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = Config::parse("library_root = [\"libs\"]\n").unwrap_err();
        assert!(err.to_string().contains("library_root"), "{err}");

        let err = Config::parse("[preprocessor]\ncmd = \"gcc\"\n").unwrap_err();
        assert!(err.to_string().contains("cmd"), "{err}");
    }

    #[test]
    fn relative_paths_follow_the_config_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("depfind.toml");
        fs::write(&path, "build_path = \"out\"\nlibrary_roots = [\"libs\", \"/abs\"]\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();

        assert_eq!(config.build_path, Some(temp.path().join("out")));
        assert_eq!(
            config.library_roots,
            vec![temp.path().join("libs"), PathBuf::from("/abs")]
        );
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let temp = tempdir().unwrap();
        assert!(Config::load(Some(&temp.path().join("nope.toml"))).is_err());
    }

    #[test]
    fn overrides_take_priority() {
        let config = Config {
            library_roots: vec![PathBuf::from("/platform")],
            libraries: vec!["Wire".to_string()],
            ..Default::default()
        }
        .with_overrides(Overrides {
            library_roots: vec![PathBuf::from("/user")],
            libraries: vec!["Wire".to_string(), "SPI".to_string()],
            compiler: Some(PathBuf::from("clang++")),
            ..Default::default()
        });

        assert_eq!(
            config.library_roots,
            vec![PathBuf::from("/user"), PathBuf::from("/platform")]
        );
        assert_eq!(config.libraries, vec!["Wire".to_string(), "SPI".to_string()]);
        assert_eq!(config.preprocessor.command, PathBuf::from("clang++"));
    }

    #[test]
    fn build_path_defaults_to_entry_folder() {
        let config = Config::default();
        assert_eq!(
            config.build_path_for(Path::new("/build/sketch.cpp")),
            PathBuf::from("/build")
        );
    }

    #[test]
    fn bare_entry_name_builds_in_current_folder() {
        let config = Config::default();
        assert_eq!(
            config.build_path_for(Path::new("sketch.cpp")),
            PathBuf::from(".")
        );
    }
}
