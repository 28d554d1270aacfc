//! Toolchain descriptors and selection.
//!
//! A descriptor is selected at configuration start, before any target is
//! resolved, and stays immutable for the run. The [`Loader`] guards against
//! double application: loading the same descriptor twice yields exactly the
//! state of loading it once.

pub mod presets;
pub mod types;

pub use types::{SearchPolicy, SearchScope, ToolchainDescriptor, ToolchainError};

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::flags::CompilerFamily;

/// Load-once descriptor cache keyed by preset name or canonical file path.
#[derive(Debug, Default)]
pub struct Loader {
    loaded: BTreeMap<String, ToolchainDescriptor>,
}

impl Loader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `spec` (a built-in preset name or a descriptor file path)
    /// and load it at most once.
    pub fn load(&mut self, spec: &str) -> Result<&ToolchainDescriptor, ToolchainError> {
        let key = self.cache_key(spec)?;

        if !self.loaded.contains_key(&key) {
            let descriptor = if let Some(preset) = presets::by_name(spec) {
                preset
            } else {
                ToolchainDescriptor::from_file(Path::new(spec))?
            };
            self.loaded.insert(key.clone(), descriptor);
        }

        // Key was just inserted if absent.
        Ok(&self.loaded[&key])
    }

    /// How many distinct descriptors have been loaded.
    pub fn loaded_count(&self) -> usize {
        self.loaded.len()
    }

    fn cache_key(&self, spec: &str) -> Result<String, ToolchainError> {
        if presets::by_name(spec).is_some() {
            return Ok(format!("preset:{}", spec));
        }

        let path = Path::new(spec);
        if !path.is_file() {
            return Err(ToolchainError::NotFound(format!(
                "'{}' is neither a built-in preset nor a descriptor file",
                spec
            )));
        }
        // Canonical so two spellings of one file count as one inclusion.
        let canonical = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        Ok(format!("file:{}", canonical.display()))
    }
}

/// Probe the host for a compiler family, trying `CXX` first, then the
/// conventional names on PATH.
pub fn detect_host_family() -> CompilerFamily {
    if let Ok(cxx) = std::env::var("CXX") {
        let family = CompilerFamily::from_compiler_path(Path::new(&cxx));
        if family != CompilerFamily::Other {
            return family;
        }
    }

    let candidates = [
        ("clang++", CompilerFamily::Clang),
        ("g++", CompilerFamily::Gcc),
        ("cl", CompilerFamily::Msvc),
    ];

    for (cmd, family) in candidates {
        if find_on_path(cmd).is_some() {
            return family;
        }
    }

    CompilerFamily::Other
}

fn find_on_path(cmd: &str) -> Option<PathBuf> {
    let locator = if cfg!(windows) { "where" } else { "which" };
    let output = std::process::Command::new(locator).arg(cmd).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let path = String::from_utf8_lossy(&output.stdout)
        .lines()
        .next()?
        .trim()
        .to_string();
    if path.is_empty() {
        None
    } else {
        Some(PathBuf::from(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loading_a_preset_twice_is_idempotent() {
        let mut loader = Loader::new();
        let first = loader.load("arm-cortex-m4").unwrap().clone();
        let second = loader.load("arm-cortex-m4").unwrap().clone();

        assert_eq!(first, second);
        assert_eq!(loader.loaded_count(), 1);
    }

    #[test]
    fn test_unknown_spec_is_not_found() {
        let mut loader = Loader::new();
        match loader.load("no-such-toolchain") {
            Err(ToolchainError::NotFound(_)) => {}
            other => panic!("expected NotFound, got {:?}", other.map(|t| t.name.clone())),
        }
    }

    #[test]
    fn test_distinct_presets_load_separately() {
        let mut loader = Loader::new();
        loader.load("arm-cortex-m4").unwrap();
        loader.load("aarch64-linux").unwrap();
        assert_eq!(loader.loaded_count(), 2);
    }
}
