use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::flags::CompilerFamily;

/// Where a class of build inputs may be searched for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SearchScope {
    /// Anywhere on the host.
    Host,
    /// Only inside the descriptor's sysroot.
    SysrootOnly,
}

/// Search-path isolation policy for a cross target.
///
/// Programs (compilers, code generators) run on the host and may live
/// anywhere; libraries, includes and packages must come from the sysroot
/// so host artifacts never leak into the target image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchPolicy {
    pub programs: SearchScope,
    pub libraries: SearchScope,
    pub includes: SearchScope,
    pub packages: SearchScope,
}

impl Default for SearchPolicy {
    fn default() -> Self {
        Self {
            programs: SearchScope::Host,
            libraries: SearchScope::SysrootOnly,
            includes: SearchScope::SysrootOnly,
            packages: SearchScope::SysrootOnly,
        }
    }
}

/// A fixed record describing one cross-compilation target.
///
/// Immutable once loaded; selected before any target is resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolchainDescriptor {
    /// Short name the descriptor is addressed by.
    pub name: String,

    /// Target system name (e.g. "Generic", "Linux").
    pub system: String,

    /// Target processor (e.g. "cortex-m4", "aarch64").
    pub processor: String,

    /// C compiler executable.
    pub cc: PathBuf,

    /// C++ compiler executable.
    pub cxx: PathBuf,

    /// Architecture flags applied to every target.
    #[serde(default)]
    pub flags: Vec<String>,

    /// Sysroot for library/include/package lookups.
    #[serde(default)]
    pub sysroot: Option<PathBuf>,

    #[serde(default)]
    pub search: SearchPolicy,
}

impl ToolchainDescriptor {
    /// Parse a descriptor from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ToolchainError> {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents).map_err(|e| ToolchainError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Compiler family inferred from the C++ compiler's file name.
    pub fn compiler_family(&self) -> CompilerFamily {
        CompilerFamily::from_compiler_path(&self.cxx)
    }

    /// One-line summary for tables and reports.
    pub fn summary(&self) -> String {
        format!(
            "{} / {} ({})",
            self.system,
            self.processor,
            self.cxx.display()
        )
    }
}

/// Error type for descriptor operations
#[derive(Debug)]
pub enum ToolchainError {
    /// No descriptor with the given name or path
    NotFound(String),
    /// Descriptor file failed to parse
    Parse { path: PathBuf, message: String },
    /// IO error
    IoError(std::io::Error),
}

impl std::fmt::Display for ToolchainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ToolchainError::NotFound(msg) => write!(f, "Toolchain not found: {}", msg),
            ToolchainError::Parse { path, message } => {
                write!(f, "Invalid toolchain file {}: {}", path.display(), message)
            }
            ToolchainError::IoError(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for ToolchainError {}

impl From<std::io::Error> for ToolchainError {
    fn from(e: std::io::Error) -> Self {
        ToolchainError::IoError(e)
    }
}
