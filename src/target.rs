//! Build targets and build modes.
//!
//! A [`Target`] is a named compilable unit owned by the downstream project.
//! The flag functions in [`crate::flags`] mutate it; re-applying a function
//! never duplicates a flag or definition.

use serde::Serialize;

/// Two-valued build mode controlling which flags and definitions apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    Debug,
    Release,
}

impl BuildMode {
    pub fn from_release(release: bool) -> Self {
        if release {
            BuildMode::Release
        } else {
            BuildMode::Debug
        }
    }

    pub fn is_debug(&self) -> bool {
        matches!(self, BuildMode::Debug)
    }
}

impl std::fmt::Display for BuildMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildMode::Debug => write!(f, "debug"),
            BuildMode::Release => write!(f, "release"),
        }
    }
}

/// A named compilable unit accumulating compile flags, link flags and
/// preprocessor definitions.
#[derive(Debug, Clone, Serialize)]
pub struct Target {
    pub name: String,
    pub compile_flags: Vec<String>,
    pub link_flags: Vec<String>,
    pub definitions: Vec<String>,
}

impl Target {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            compile_flags: Vec::new(),
            link_flags: Vec::new(),
            definitions: Vec::new(),
        }
    }

    /// Append a compile flag unless it is already present.
    pub fn add_compile_flag(&mut self, flag: &str) {
        push_unique(&mut self.compile_flags, flag);
    }

    /// Append a link flag unless it is already present.
    pub fn add_link_flag(&mut self, flag: &str) {
        push_unique(&mut self.link_flags, flag);
    }

    /// Append a preprocessor definition unless it is already present.
    pub fn add_definition(&mut self, def: &str) {
        push_unique(&mut self.definitions, def);
    }

    pub fn has_definition(&self, def: &str) -> bool {
        self.definitions.iter().any(|d| d == def)
    }
}

fn push_unique(list: &mut Vec<String>, value: &str) {
    if !list.iter().any(|v| v == value) {
        list.push(value.to_string());
    }
}
