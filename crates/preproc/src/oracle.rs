use depfind_resolver::{DiscoveryRequest, IncludeOracle, ResolveError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use crate::error::{PreprocError, Result};
use crate::extract::missing_includes;

/// How the preprocessor is invoked
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PreprocessorConfig {
    /// Compiler driver used with `-E`
    pub command: PathBuf,

    /// Extra flags placed before the include folders
    pub flags: Vec<String>,

    /// Macro definitions, passed as `-D<value>`
    pub defines: Vec<String>,

    /// Language passed to `-x`
    pub language: String,
}

impl Default for PreprocessorConfig {
    fn default() -> Self {
        Self {
            command: PathBuf::from("g++"),
            flags: Vec::new(),
            defines: Vec::new(),
            language: "c++".to_string(),
        }
    }
}

/// Include discovery through a gcc-compatible preprocessor.
///
/// Discovery runs write to the null device and read the diagnostics;
/// finalize runs write the preprocessed file to the requested target.
#[derive(Debug, Clone)]
pub struct GccOracle {
    config: PreprocessorConfig,
}

impl GccOracle {
    pub fn new(config: PreprocessorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PreprocessorConfig {
        &self.config
    }

    /// Full argument list for one invocation
    pub fn arguments(&self, request: &DiscoveryRequest<'_>) -> Vec<String> {
        let mut args = vec![
            "-E".to_string(),
            "-CC".to_string(),
            "-x".to_string(),
            self.config.language.clone(),
            "-w".to_string(),
        ];
        args.extend(self.config.flags.iter().cloned());
        args.extend(self.config.defines.iter().map(|d| format!("-D{d}")));
        args.extend(
            request
                .include_folders
                .iter()
                .map(|folder| format!("-I{}", folder.display())),
        );
        args.push(request.file.display().to_string());
        args.push("-o".to_string());
        args.push(match request.target {
            Some(target) => target.display().to_string(),
            None => null_device().to_string(),
        });
        args
    }

    fn run(&self, request: &DiscoveryRequest<'_>) -> Result<Output> {
        if let Some(parent) = request.target.and_then(Path::parent) {
            fs::create_dir_all(parent)?;
        }

        let args = self.arguments(request);
        log::debug!("{} {}", self.config.command.display(), args.join(" "));

        Command::new(&self.config.command)
            .args(&args)
            .output()
            .map_err(|source| PreprocError::Spawn {
                command: self.config.command.clone(),
                source,
            })
    }

    fn discover_includes(&self, request: &DiscoveryRequest<'_>) -> Result<BTreeSet<String>> {
        let output = self.run(request)?;
        let stderr = String::from_utf8_lossy(&output.stderr);

        if request.is_finalize() {
            if !output.status.success() {
                return Err(failed(&output, &stderr));
            }
            return Ok(BTreeSet::new());
        }

        let includes = missing_includes(&stderr);
        if !output.status.success() && includes.is_empty() {
            return Err(failed(&output, &stderr));
        }
        Ok(includes)
    }
}

impl Default for GccOracle {
    fn default() -> Self {
        Self::new(PreprocessorConfig::default())
    }
}

impl IncludeOracle for GccOracle {
    fn discover(
        &mut self,
        request: &DiscoveryRequest<'_>,
    ) -> depfind_resolver::Result<BTreeSet<String>> {
        self.discover_includes(request)
            .map_err(|err| ResolveError::oracle(request.file, err.to_string()))
    }
}

fn failed(output: &Output, stderr: &str) -> PreprocError {
    PreprocError::Failed {
        status: output.status.to_string(),
        stderr: tail(stderr, STDERR_TAIL_LINES),
    }
}

fn tail(text: &str, lines: usize) -> String {
    let all: Vec<&str> = text.lines().collect();
    let start = all.len().saturating_sub(lines);
    all[start..].join("\n")
}

fn null_device() -> &'static str {
    if cfg!(windows) {
        "nul"
    } else {
        "/dev/null"
    }
}

const STDERR_TAIL_LINES: usize = 20;
