//! Project version stamping.
//!
//! The version triple is read once per resolution from the effective
//! environment (`CFX_VERSION_MAJOR/MINOR/PATCH`, defaulting to 1.0.0) and
//! is immutable afterwards.

use anyhow::{Context, Result};
use colored::*;

use crate::env::{EffectiveEnv, keys};

/// An immutable (major, minor, patch) triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct VersionTriple {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Default for VersionTriple {
    fn default() -> Self {
        Self {
            major: 1,
            minor: 0,
            patch: 0,
        }
    }
}

impl VersionTriple {
    /// Read the triple from the effective environment. Absent keys default;
    /// malformed values are an error, not a silent fallback.
    pub fn from_env(env: &EffectiveEnv) -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            major: read_component(env, keys::VERSION_MAJOR, defaults.major)?,
            minor: read_component(env, keys::VERSION_MINOR, defaults.minor)?,
            patch: read_component(env, keys::VERSION_PATCH, defaults.patch)?,
        })
    }

    pub fn to_semver(&self) -> semver::Version {
        semver::Version::new(self.major, self.minor, self.patch)
    }
}

impl std::fmt::Display for VersionTriple {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

fn read_component(env: &EffectiveEnv, key: &str, default: u64) -> Result<u64> {
    match env.get(key) {
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .with_context(|| format!("{} must be a non-negative integer, got '{}'", key, raw)),
        None => Ok(default),
    }
}

/// A project name stamped with its resolved version.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ProjectVersion {
    pub name: String,
    pub triple: VersionTriple,
}

impl ProjectVersion {
    /// Resolve the version for `name`. Re-invocation against the same
    /// environment yields the same string.
    pub fn resolve(name: &str, env: &EffectiveEnv) -> Result<Self> {
        let triple = VersionTriple::from_env(env)?;
        // Stdout stays clean for --json; diagnostics go to stderr.
        eprintln!("{}", format!("  {} version: {}", name, triple).dimmed());
        Ok(Self {
            name: name.to_string(),
            triple,
        })
    }

    pub fn version_string(&self) -> String {
        self.triple.to_string()
    }
}
