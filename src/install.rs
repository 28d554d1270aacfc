//! Installation of the shared configuration base.
//!
//! `cfx install` materializes the `env/`, `toolchains/` and `templates/`
//! directories at a destination so downstream projects can vendor them.
//! With `--from` an existing base is copied verbatim; otherwise the
//! built-in presets are emitted.

use anyhow::{Context, Result, bail};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::env;
use crate::templates;
use crate::toolchain;

/// The directories that make up an installed base.
pub const INSTALL_DIRS: [&str; 3] = ["env", "toolchains", "templates"];

#[derive(Debug)]
pub struct InstallSummary {
    pub files: usize,
    pub dest: PathBuf,
}

/// Install the configuration base into `dest`.
pub fn install_presets(dest: &Path, from: Option<&Path>) -> Result<InstallSummary> {
    let files = match from {
        Some(src) => copy_base(src, dest)?,
        None => emit_builtins(dest)?,
    };
    Ok(InstallSummary {
        files,
        dest: dest.to_path_buf(),
    })
}

/// Copy an existing base verbatim, directory for directory.
fn copy_base(src: &Path, dest: &Path) -> Result<usize> {
    let present: Vec<&str> = INSTALL_DIRS
        .iter()
        .copied()
        .filter(|dir| src.join(dir).is_dir())
        .collect();
    if present.is_empty() {
        bail!(
            "{} has none of the base directories ({})",
            src.display(),
            INSTALL_DIRS.join(", ")
        );
    }

    let mut files = 0;
    for dir in present {
        let root = src.join(dir);
        for entry in WalkDir::new(&root).into_iter().filter_map(|e| e.ok()) {
            let rel = entry
                .path()
                .strip_prefix(src)
                .context("walked outside the source tree")?;
            let out = dest.join(rel);
            if entry.file_type().is_dir() {
                std::fs::create_dir_all(&out)
                    .with_context(|| format!("Failed to create {}", out.display()))?;
            } else {
                if let Some(parent) = out.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::copy(entry.path(), &out)
                    .with_context(|| format!("Failed to copy {}", entry.path().display()))?;
                files += 1;
            }
        }
    }
    Ok(files)
}

/// Emit the built-in presets as a fresh base.
fn emit_builtins(dest: &Path) -> Result<usize> {
    let mut files = 0;

    let env_dir = dest.join("env");
    std::fs::create_dir_all(&env_dir)?;
    for name in env::presets::PRESET_NAMES {
        let layer = env::presets::by_name(name)
            .with_context(|| format!("unknown built-in layer '{}'", name))?;
        let path = env_dir.join(format!("{}.toml", name));
        std::fs::write(&path, layer.to_toml()?)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        files += 1;
    }

    let tc_dir = dest.join("toolchains");
    std::fs::create_dir_all(&tc_dir)?;
    for name in toolchain::presets::PRESET_NAMES {
        let descriptor = toolchain::presets::by_name(name)
            .with_context(|| format!("unknown built-in toolchain '{}'", name))?;
        let contents =
            toml::to_string_pretty(&descriptor).context("Failed to serialize descriptor")?;
        let path = tc_dir.join(format!("{}.toml", name));
        std::fs::write(&path, contents)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        files += 1;
    }

    for kind in ["console", "embedded"] {
        let skeleton = dest.join("templates").join(kind);
        for (rel, contents) in templates::get_template("app", kind) {
            let path = skeleton.join(rel);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, contents)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            files += 1;
        }
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emit_builtins_creates_all_three_dirs() {
        let tmp = tempfile::tempdir().unwrap();
        let summary = install_presets(tmp.path(), None).unwrap();
        assert!(summary.files > 0);
        for dir in INSTALL_DIRS {
            assert!(tmp.path().join(dir).is_dir(), "{}", dir);
        }
        assert!(tmp.path().join("env/common.toml").is_file());
        assert!(tmp.path().join("toolchains/arm-cortex-m4.toml").is_file());
        assert!(tmp.path().join("templates/console/cfx.toml").is_file());
    }

    #[test]
    fn test_emitted_layer_round_trips() {
        let tmp = tempfile::tempdir().unwrap();
        install_presets(tmp.path(), None).unwrap();

        let layer =
            env::Layer::from_file(&tmp.path().join("env/common.toml"), 0).unwrap();
        assert_eq!(layer.vars[env::keys::STD], "c++17");
    }

    #[test]
    fn test_emitted_descriptor_round_trips() {
        let tmp = tempfile::tempdir().unwrap();
        install_presets(tmp.path(), None).unwrap();

        let path = tmp.path().join("toolchains/arm-cortex-m4.toml");
        let parsed = toolchain::ToolchainDescriptor::from_file(&path).unwrap();
        assert_eq!(parsed, toolchain::presets::by_name("arm-cortex-m4").unwrap());
    }

    #[test]
    fn test_copy_is_verbatim() {
        let src = tempfile::tempdir().unwrap();
        let dest = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(src.path().join("env")).unwrap();
        std::fs::write(src.path().join("env/common.toml"), "X = \"1\"\n").unwrap();

        let summary = install_presets(dest.path(), Some(src.path())).unwrap();
        assert_eq!(summary.files, 1);
        let copied = std::fs::read_to_string(dest.path().join("env/common.toml")).unwrap();
        assert_eq!(copied, "X = \"1\"\n");
    }

    #[test]
    fn test_copy_from_empty_source_fails() {
        let src = tempfile::tempdir().unwrap();
        let dest = tempfile::tempdir().unwrap();
        assert!(install_presets(dest.path(), Some(src.path())).is_err());
    }
}
