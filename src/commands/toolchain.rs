//! Toolchain command handler
//!
//! Handles `cfx toolchain` subcommands: listing the built-in descriptors,
//! inspecting one, and persisting a user selection under `~/.cfx`.

use anyhow::Result;
use colored::*;
use inquire::Select;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::toolchain;
use crate::ui;

/// Toolchain subcommand operations
#[derive(Clone, Debug)]
pub enum ToolchainOp {
    /// List built-in descriptors
    List,
    /// Show one descriptor in full
    Show { name: String },
    /// Interactively select a descriptor and persist the choice
    Select,
    /// Clear the persisted selection
    Clear,
}

#[derive(Debug, Serialize, Deserialize)]
struct Selection {
    name: String,
}

fn selection_cache_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".cfx")
        .join("toolchain-selection.toml")
}

/// The persisted toolchain selection, if any.
pub fn load_selection() -> Option<String> {
    let path = selection_cache_path();
    let contents = std::fs::read_to_string(path).ok()?;
    let selection: Selection = toml::from_str(&contents).ok()?;
    Some(selection.name)
}

fn save_selection(name: &str) {
    let path = selection_cache_path();
    let Some(parent) = path.parent() else {
        return;
    };
    if let Err(e) = std::fs::create_dir_all(parent) {
        println!("{} Failed to create cache dir: {}", "x".red(), e);
        return;
    }

    let selection = Selection {
        name: name.to_string(),
    };
    match toml::to_string(&selection) {
        Ok(contents) => {
            if let Err(e) = std::fs::write(&path, contents) {
                println!("{} Failed to save selection: {}", "x".red(), e);
                return;
            }
            println!("{} Selected: {}", "✓".green(), name.cyan());
            println!("  Saved to: {}", path.display().to_string().dimmed());
        }
        Err(e) => println!("{} Failed to save selection: {}", "x".red(), e),
    }
}

fn list_toolchains() {
    let selected = load_selection();
    let mut table = ui::Table::new(&["Name", "System", "Processor", "Compiler"]);

    for name in toolchain::presets::PRESET_NAMES {
        let Some(tc) = toolchain::presets::by_name(name) else {
            continue;
        };
        let row = vec![
            tc.name.clone(),
            tc.system.clone(),
            tc.processor.clone(),
            tc.cxx.display().to_string(),
        ];
        let row = if selected.as_deref() == Some(name) {
            row.into_iter().map(|s| s.green().bold().to_string()).collect()
        } else {
            let mut row: Vec<String> = row;
            row[0] = row[0].cyan().to_string();
            row
        };
        table.add_row(row);
    }

    table.print();
    println!(
        "  {}",
        "Native builds need no descriptor; the host compiler is probed.".dimmed()
    );
}

fn show_toolchain(name: &str) -> Result<()> {
    let mut loader = toolchain::Loader::new();
    let tc = loader.load(name)?;

    let scope = |s: toolchain::SearchScope| match s {
        toolchain::SearchScope::Host => "host",
        toolchain::SearchScope::SysrootOnly => "sysroot-only",
    };

    let mut table = ui::Table::new(&["Field", "Value"]);
    table.add_row(vec!["name".to_string(), tc.name.cyan().to_string()]);
    table.add_row(vec!["system".to_string(), tc.system.clone()]);
    table.add_row(vec!["processor".to_string(), tc.processor.clone()]);
    table.add_row(vec!["cc".to_string(), tc.cc.display().to_string()]);
    table.add_row(vec!["cxx".to_string(), tc.cxx.display().to_string()]);
    table.add_row(vec!["family".to_string(), tc.compiler_family().to_string()]);
    table.add_row(vec!["flags".to_string(), tc.flags.join(" ")]);
    table.add_row(vec![
        "sysroot".to_string(),
        tc.sysroot
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "-".to_string()),
    ]);
    table.add_row(vec![
        "search.programs".to_string(),
        scope(tc.search.programs).to_string(),
    ]);
    table.add_row(vec![
        "search.libraries".to_string(),
        scope(tc.search.libraries).to_string(),
    ]);
    table.add_row(vec![
        "search.includes".to_string(),
        scope(tc.search.includes).to_string(),
    ]);
    table.add_row(vec![
        "search.packages".to_string(),
        scope(tc.search.packages).to_string(),
    ]);
    table.print();
    Ok(())
}

fn select_toolchain() -> Result<()> {
    let options: Vec<&str> = toolchain::presets::PRESET_NAMES.to_vec();
    let selection = Select::new("Select a toolchain:", options).prompt()?;
    save_selection(selection);
    Ok(())
}

fn clear_selection() {
    let path = selection_cache_path();
    if path.exists() {
        if let Err(e) = std::fs::remove_file(&path) {
            println!("{} Failed to clear selection: {}", "x".red(), e);
        } else {
            println!("{} Cleared toolchain selection", "✓".green());
        }
    } else {
        println!("{} No selection cached.", "!".yellow());
    }
}

/// Handle the `cfx toolchain` command
pub fn handle_toolchain_command(op: &Option<ToolchainOp>) -> Result<()> {
    match op {
        Some(ToolchainOp::List) | None => list_toolchains(),
        Some(ToolchainOp::Show { name }) => show_toolchain(name)?,
        Some(ToolchainOp::Select) => select_toolchain()?,
        Some(ToolchainOp::Clear) => clear_selection(),
    }
    Ok(())
}
