//! Configuration file parsing (`cfx.toml`).

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

pub const CONFIG_FILE: &str = "cfx.toml";

#[derive(Deserialize, Debug, Default)]
pub struct CfxConfig {
    pub package: PackageConfig,
    #[serde(default)]
    pub env: EnvConfig,
    pub toolchain: Option<ToolchainConfig>,
    #[serde(default)]
    pub targets: BTreeMap<String, TargetConfig>,
}

#[derive(Deserialize, Debug, Default)]
pub struct PackageConfig {
    pub name: String,
}

#[derive(Deserialize, Debug, Default)]
pub struct EnvConfig {
    /// Directory of layer files; defaults to `env/` when it exists.
    pub dir: Option<String>,
    /// Default override layer, superseded by `--env`.
    pub layer: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct ToolchainConfig {
    /// Built-in preset name or path to a descriptor file.
    pub file: String,
}

#[derive(Deserialize, Debug)]
pub struct TargetConfig {
    #[serde(default = "default_true")]
    pub warnings: bool,
    #[serde(default)]
    pub coverage: bool,
    /// Per-target definitions, on top of the environment's extra set.
    #[serde(default)]
    pub definitions: Vec<String>,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            warnings: true,
            coverage: false,
            definitions: Vec::new(),
        }
    }
}

fn default_true() -> bool {
    true
}

/// Load `cfx.toml` from a project directory.
pub fn load_config(project_dir: &Path) -> Result<CfxConfig> {
    let path = project_dir.join(CONFIG_FILE);
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    toml::from_str(&contents).with_context(|| format!("Invalid {}", path.display()))
}
