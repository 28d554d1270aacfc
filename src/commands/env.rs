//! Environment command handler
//!
//! Handles `cfx env` subcommands for inspecting variable layers.

use anyhow::Result;
use colored::*;
use std::path::Path;

use crate::env;
use crate::ui;

/// Env subcommand operations
#[derive(Clone, Debug)]
pub enum EnvOp {
    /// List the layers visible to the current project
    List,
    /// Show the merged environment, optionally with an override layer
    Show { layer: Option<String> },
}

/// Handle the `cfx env` command from the current directory.
pub fn handle_env_command(op: &EnvOp) -> Result<()> {
    match op {
        EnvOp::List => list_layers(),
        EnvOp::Show { layer } => show_merged(layer.as_deref()),
    }
}

fn project_env_dir() -> Option<&'static Path> {
    let dir = Path::new("env");
    dir.is_dir().then_some(dir)
}

fn list_layers() -> Result<()> {
    let mut table = ui::Table::new(&["Layer", "Source", "Keys"]);

    match project_env_dir() {
        Some(dir) => {
            let mut entries: Vec<_> = std::fs::read_dir(dir)?
                .filter_map(|e| e.ok())
                .map(|e| e.path())
                .filter(|p| p.extension().is_some_and(|ext| ext == "toml"))
                .collect();
            entries.sort();

            for path in entries {
                match env::Layer::from_file(&path, 0) {
                    Ok(layer) => table.add_row(vec![
                        layer.name.cyan().to_string(),
                        "project".to_string(),
                        layer.vars.len().to_string(),
                    ]),
                    Err(e) => println!("{} {}", "!".yellow(), e),
                }
            }
        }
        None => {
            for name in env::presets::PRESET_NAMES {
                if let Some(layer) = env::presets::by_name(name) {
                    table.add_row(vec![
                        layer.name.cyan().to_string(),
                        "built-in".dimmed().to_string(),
                        layer.vars.len().to_string(),
                    ]);
                }
            }
        }
    }

    table.print();
    println!(
        "  {}",
        "common loads first; one override layer may replace its keys.".dimmed()
    );
    Ok(())
}

fn show_merged(layer: Option<&str>) -> Result<()> {
    let env = env::load_stack(project_env_dir(), layer)?;

    println!(
        "{} Effective environment ({})",
        "✓".green(),
        env.sources.join(" → ")
    );

    let mut table = ui::Table::new(&["Variable", "Value", "Layer"]);
    for (key, value) in env.iter() {
        let origin = env.origin(key).unwrap_or("-");
        table.add_row(vec![
            key.cyan().to_string(),
            value.to_string(),
            origin.dimmed().to_string(),
        ]);
    }
    table.print();
    Ok(())
}
