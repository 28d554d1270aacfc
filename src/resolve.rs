//! One-pass configuration resolution.
//!
//! This is the configuration-time control flow: load the environment stack,
//! stamp the project version, fix the toolchain, then apply the flag
//! functions to every declared target. The result is an immutable
//! [`Resolution`] that reporting and JSON output both read from.

use anyhow::{Context, Result};
use colored::*;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::config::{CfxConfig, TargetConfig};
use crate::env::{self, EffectiveEnv, keys};
use crate::flags::{
    self, ApplyOutcome, CompilerFamily, add_compiler_warnings, configure_preprocessor_definitions,
    enable_code_coverage,
};
use crate::target::{BuildMode, Target};
use crate::toolchain::{self, Loader, ToolchainDescriptor};
use crate::ui;
use crate::version::ProjectVersion;

#[derive(Debug, Default, Clone)]
pub struct ResolveOptions {
    pub release: bool,
    /// Override layer name; supersedes the one in `cfx.toml`.
    pub layer: Option<String>,
    /// Toolchain preset name or descriptor path; supersedes `cfx.toml`.
    pub toolchain: Option<String>,
}

/// A resolved target plus what each conditional function did to it.
#[derive(Debug, Clone, Serialize)]
pub struct TargetReport {
    pub target: Target,
    /// `None` when the target opted out of warnings.
    pub warnings: Option<ApplyOutcome>,
    /// `None` when the target did not request coverage.
    pub coverage: Option<ApplyOutcome>,
}

/// The immutable result of one configuration run.
#[derive(Debug, Serialize)]
pub struct Resolution {
    pub project: ProjectVersion,
    pub mode: BuildMode,
    pub family: CompilerFamily,
    pub toolchain: Option<ToolchainDescriptor>,
    pub env: EffectiveEnv,
    pub targets: Vec<TargetReport>,
}

/// Resolve the effective configuration for a project.
pub fn resolve(project_dir: &Path, config: &CfxConfig, opts: &ResolveOptions) -> Result<Resolution> {
    let env = load_project_env(project_dir, config, opts)?;
    let project = ProjectVersion::resolve(&config.package.name, &env)?;
    let mode = BuildMode::from_release(opts.release);

    // The descriptor is fixed before any target exists.
    let toolchain_spec = opts
        .toolchain
        .clone()
        .or_else(|| config.toolchain.as_ref().map(|t| t.file.clone()));

    let mut loader = Loader::new();
    let descriptor = match toolchain_spec {
        Some(spec) => Some(
            loader
                .load(&spec)
                .map(Clone::clone)
                .with_context(|| format!("Failed to load toolchain '{}'", spec))?,
        ),
        None => None,
    };

    let family = match &descriptor {
        Some(tc) => tc.compiler_family(),
        None => toolchain::detect_host_family(),
    };

    let targets = if config.targets.is_empty() {
        // A project without [targets] still gets its main unit configured.
        let default_cfg = TargetConfig::default();
        vec![resolve_target(
            &config.package.name,
            &default_cfg,
            family,
            mode,
            &env,
            descriptor.as_ref(),
        )]
    } else {
        config
            .targets
            .iter()
            .map(|(name, cfg)| resolve_target(name, cfg, family, mode, &env, descriptor.as_ref()))
            .collect()
    };

    Ok(Resolution {
        project,
        mode,
        family,
        toolchain: descriptor,
        env,
        targets,
    })
}

fn load_project_env(
    project_dir: &Path,
    config: &CfxConfig,
    opts: &ResolveOptions,
) -> Result<EffectiveEnv> {
    let env_dir: Option<PathBuf> = match &config.env.dir {
        Some(dir) => Some(project_dir.join(dir)),
        None => {
            let default = project_dir.join("env");
            default.is_dir().then_some(default)
        }
    };

    let layer = opts.layer.clone().or_else(|| config.env.layer.clone());
    env::load_stack(env_dir.as_deref(), layer.as_deref())
}

fn resolve_target(
    name: &str,
    cfg: &TargetConfig,
    family: CompilerFamily,
    mode: BuildMode,
    env: &EffectiveEnv,
    descriptor: Option<&ToolchainDescriptor>,
) -> TargetReport {
    let mut target = Target::new(name);

    // Seed from the environment layer: language standard and optimization.
    if let Some(std) = env.get(keys::STD) {
        target.add_compile_flag(&flags::std_flag(family, std));
    }
    if let Some(opt) = env.get(keys::OPT_FLAGS) {
        for flag in opt.split_whitespace() {
            target.add_compile_flag(flag);
        }
    }

    // Architecture flags apply to both compile and link steps.
    if let Some(tc) = descriptor {
        for flag in &tc.flags {
            target.add_compile_flag(flag);
            target.add_link_flag(flag);
        }
    }

    let warnings = cfg
        .warnings
        .then(|| add_compiler_warnings(&mut target, family));
    let coverage = cfg
        .coverage
        .then(|| enable_code_coverage(&mut target, family, mode));

    configure_preprocessor_definitions(&mut target, mode, env.get(keys::EXTRA_DEFINITIONS));
    for def in &cfg.definitions {
        target.add_definition(def);
    }

    TargetReport {
        target,
        warnings,
        coverage,
    }
}

impl Resolution {
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize resolution")
    }
}

/// Print the human-readable resolution report.
pub fn print_report(resolution: &Resolution) {
    println!(
        "{} Resolved {} v{} ({}, {})",
        "✓".green(),
        resolution.project.name.bold(),
        resolution.project.version_string(),
        resolution.mode,
        resolution.family.to_string().cyan()
    );
    println!(
        "  {}",
        format!("layers: {}", resolution.env.sources.join(" → ")).dimmed()
    );
    if let Some(tc) = &resolution.toolchain {
        println!(
            "  {}",
            format!("toolchain: {} ({})", tc.name, tc.summary()).dimmed()
        );
    }

    let mut table = ui::Table::new(&["Target", "Warnings", "Coverage", "Definitions"]);
    for report in &resolution.targets {
        table.add_row(vec![
            report.target.name.cyan().to_string(),
            outcome_cell(report.warnings),
            outcome_cell(report.coverage),
            report.target.definitions.join(" "),
        ]);
    }
    table.print();

    for report in &resolution.targets {
        println!(
            "  {}",
            format!(
                "{}: compile [{}] link [{}]",
                report.target.name,
                report.target.compile_flags.join(" "),
                report.target.link_flags.join(" ")
            )
            .dimmed()
        );
    }

    for report in &resolution.targets {
        if report.warnings == Some(ApplyOutcome::SkippedUnsupported) {
            println!(
                "{} No warning profile for compiler family '{}'; target '{}' unchanged.",
                "!".yellow(),
                resolution.family,
                report.target.name
            );
        }
        if report.coverage == Some(ApplyOutcome::SkippedUnsupported) {
            println!(
                "{} Coverage needs a GNU/Clang debug build; skipped for target '{}'.",
                "!".yellow(),
                report.target.name
            );
        }
    }
}

fn outcome_cell(outcome: Option<ApplyOutcome>) -> String {
    match outcome {
        Some(ApplyOutcome::Applied) => "✓".green().to_string(),
        Some(ApplyOutcome::SkippedUnsupported) => "skipped".yellow().to_string(),
        None => "-".dimmed().to_string(),
    }
}
