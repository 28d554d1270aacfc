//! Layered environment variables.
//!
//! A stack is `common` (mandatory, loaded first) plus at most one override
//! layer (`dev`, `prod`, or a file). The merged result is an immutable
//! [`EffectiveEnv`] carrying per-key provenance; downstream code reads from
//! it and never mutates layer state.

pub mod merge;
pub mod presets;

use anyhow::{Context, Result, bail};
use colored::*;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Well-known variable names consumed by the resolver.
pub mod keys {
    /// Language standard, e.g. `c++17`.
    pub const STD: &str = "CFX_STD";
    pub const BUILD_DIR: &str = "CFX_BUILD_DIR";
    pub const INSTALL_DIR: &str = "CFX_INSTALL_DIR";
    pub const THIRDPARTY_DIR: &str = "CFX_THIRDPARTY_DIR";
    /// Optimization flags appended to every target's compile flags.
    pub const OPT_FLAGS: &str = "CFX_OPT_FLAGS";
    /// Free-form definitions string (`NAME` or `NAME=VALUE`, `;`-separated).
    pub const EXTRA_DEFINITIONS: &str = "CFX_EXTRA_DEFINITIONS";
    pub const VERSION_MAJOR: &str = "CFX_VERSION_MAJOR";
    pub const VERSION_MINOR: &str = "CFX_VERSION_MINOR";
    pub const VERSION_PATCH: &str = "CFX_VERSION_PATCH";
}

/// A named set of variables with a precedence rank.
#[derive(Debug, Clone, Serialize)]
pub struct Layer {
    pub name: String,
    pub rank: usize,
    pub vars: BTreeMap<String, String>,
}

impl Layer {
    pub fn from_pairs(name: &str, rank: usize, pairs: &[(&str, &str)]) -> Self {
        Self {
            name: name.to_string(),
            rank,
            vars: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    /// Load a layer from a flat TOML table of string values.
    pub fn from_file(path: &Path, rank: usize) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read layer file {}", path.display()))?;
        let vars: BTreeMap<String, String> = toml::from_str(&contents)
            .with_context(|| format!("Invalid layer file {}", path.display()))?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "layer".to_string());
        Ok(Self { name, rank, vars })
    }

    /// Serialize back to the flat TOML form used by layer files.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(&self.vars).context("Failed to serialize layer")
    }
}

/// The immutable merged environment, with per-key provenance.
#[derive(Debug, Clone, Serialize)]
pub struct EffectiveEnv {
    vars: BTreeMap<String, String>,
    origins: BTreeMap<String, String>,
    /// Contributing layer names in precedence order (lowest first).
    pub sources: Vec<String>,
}

impl EffectiveEnv {
    pub fn from_layers(layers: &[Layer]) -> Self {
        let merged = merge::merge_layers(layers);
        let mut vars = BTreeMap::new();
        let mut origins = BTreeMap::new();
        for (key, var) in merged {
            vars.insert(key.clone(), var.value);
            origins.insert(key, var.origin);
        }
        Self {
            vars,
            origins,
            sources: layers.iter().map(|l| l.name.clone()).collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    /// Which layer supplied the effective value for `key`.
    pub fn origin(&self, key: &str) -> Option<&str> {
        self.origins.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

/// Load the layer stack: mandatory `common`, then at most one override.
///
/// With an `env_dir`, `common.toml` must exist there; built-in presets are
/// used otherwise. A missing override is tolerated and skipped with a
/// notice. The override resolves in order: direct file path, file in
/// `env_dir`, built-in preset.
pub fn load_stack(env_dir: Option<&Path>, override_name: Option<&str>) -> Result<EffectiveEnv> {
    let mut layers = Vec::new();

    match env_dir {
        Some(dir) => {
            let common_path = dir.join("common.toml");
            if !common_path.exists() {
                bail!(
                    "Mandatory layer {} is missing",
                    common_path.display()
                );
            }
            layers.push(Layer::from_file(&common_path, 0)?);
        }
        None => layers.push(presets::common()),
    }

    if let Some(name) = override_name {
        match find_override(env_dir, name)? {
            Some(layer) => layers.push(layer),
            None => {
                eprintln!(
                    "{} Override layer '{}' not found, using common defaults only.",
                    "!".yellow(),
                    name
                );
            }
        }
    }

    Ok(EffectiveEnv::from_layers(&layers))
}

fn find_override(env_dir: Option<&Path>, name: &str) -> Result<Option<Layer>> {
    let direct = Path::new(name);
    if direct.is_file() {
        return Ok(Some(Layer::from_file(direct, 1)?));
    }

    if let Some(dir) = env_dir {
        let candidate = dir.join(format!("{}.toml", name));
        if candidate.is_file() {
            return Ok(Some(Layer::from_file(&candidate, 1)?));
        }
    }

    Ok(presets::by_name(name).map(|mut layer| {
        layer.rank = 1;
        layer
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_env_prefers_override() {
        let common = Layer::from_pairs("common", 0, &[("X", "1"), ("Y", "keep")]);
        let over = Layer::from_pairs("dev", 1, &[("X", "2")]);

        let env = EffectiveEnv::from_layers(&[common, over]);
        assert_eq!(env.get("X"), Some("2"));
        assert_eq!(env.get("Y"), Some("keep"));
        assert_eq!(env.origin("X"), Some("dev"));
        assert_eq!(env.origin("Y"), Some("common"));
        assert_eq!(env.sources, vec!["common", "dev"]);
    }

    #[test]
    fn test_builtin_stack_without_env_dir() {
        let env = load_stack(None, None).unwrap();
        assert_eq!(env.get(keys::STD), Some("c++17"));
        assert_eq!(env.get(keys::OPT_FLAGS), Some("-O2"));
        assert_eq!(env.sources, vec!["common"]);
    }

    #[test]
    fn test_builtin_dev_override() {
        let env = load_stack(None, Some("dev")).unwrap();
        assert_eq!(env.get(keys::OPT_FLAGS), Some("-Og -g"));
        assert_eq!(env.origin(keys::OPT_FLAGS), Some("dev"));
        // Keys untouched by dev still come from common.
        assert_eq!(env.origin(keys::STD), Some("common"));
    }

    #[test]
    fn test_missing_override_is_tolerated() {
        let env = load_stack(None, Some("staging")).unwrap();
        assert_eq!(env.sources, vec!["common"]);
        assert_eq!(env.get(keys::OPT_FLAGS), Some("-O2"));
    }

    #[test]
    fn test_get_or_default() {
        let env = load_stack(None, None).unwrap();
        assert_eq!(env.get_or("CFX_NO_SUCH_KEY", "fallback"), "fallback");
        assert_eq!(env.get_or(keys::STD, "fallback"), "c++17");
    }
}
