//! # confax CLI Entry Point
//!
//! This is the main executable for the `cfx` command-line tool.
//! It parses CLI arguments using clap and routes commands to the appropriate handlers.
//!
//! ## Command Structure
//!
//! - **Project**: `new`, `init`, `info`
//! - **Configuration**: `resolve`, `env`
//! - **Toolchain**: `toolchain`
//! - **Distribution**: `install`, `completion`

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use colored::*;
use inquire::{Select, Text};
use std::fs;
use std::path::{Path, PathBuf};

use confax::commands;
use confax::config;
use confax::install;
use confax::resolve;
use confax::templates;
use confax::toolchain;
use confax::ui;

#[derive(Parser)]
#[command(name = "cfx")]
#[command(about = "The shared build configuration base for C/C++ projects", version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new project from a template
    New {
        /// Project name (optional, defaults to interactive)
        name: Option<String>,
        /// Template (console, embedded) [default: console]
        #[arg(long, default_value = "console")]
        template: String,
    },
    /// Initialize a new cfx.toml in existing directory
    Init,
    /// Compute the effective configuration for the current project
    Resolve {
        /// Resolve in release mode
        #[arg(long)]
        release: bool,
        /// Override environment layer (dev, prod, or a layer file)
        #[arg(long)]
        env: Option<String>,
        /// Toolchain preset name or descriptor file
        #[arg(long)]
        toolchain: Option<String>,
        /// Emit the resolution as JSON
        #[arg(long)]
        json: bool,
    },
    /// Inspect environment layers
    Env {
        #[command(subcommand)]
        op: EnvOp,
    },
    /// Manage toolchain descriptors
    Toolchain {
        #[command(subcommand)]
        op: Option<ToolchainOp>,
    },
    /// Install the configuration base to a destination
    Install {
        /// Destination directory
        dest: PathBuf,
        /// Copy an existing base verbatim instead of emitting built-ins
        #[arg(long)]
        from: Option<PathBuf>,
    },
    /// Show tool and host setup info
    Info,
    /// Generate shell completion scripts
    Completion { shell: Shell },
}

#[derive(Subcommand)]
enum EnvOp {
    /// List the layers visible to the current project
    List,
    /// Show the merged environment
    Show {
        /// Override layer to merge on top of common
        #[arg(long)]
        layer: Option<String>,
    },
}

#[derive(Subcommand)]
enum ToolchainOp {
    /// List built-in descriptors
    List,
    /// Show one descriptor in full
    Show { name: String },
    /// Interactively select a descriptor
    Select,
    /// Clear the persisted selection
    Clear,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Some(Commands::New { name, template }) => create_project(name, template),

        Some(Commands::Init) => init_project(),

        Some(Commands::Resolve {
            release,
            env,
            toolchain,
            json,
        }) => {
            let project_dir = std::env::current_dir()?;
            let config = config::load_config(&project_dir)?;

            // CLI choice wins, then cfx.toml, then the persisted selection.
            let toolchain_arg = toolchain.clone().or_else(|| {
                if config.toolchain.is_none() {
                    commands::toolchain::load_selection()
                } else {
                    None
                }
            });

            let opts = resolve::ResolveOptions {
                release: *release,
                layer: env.clone(),
                toolchain: toolchain_arg,
            };
            let resolution = resolve::resolve(&project_dir, &config, &opts)?;

            if *json {
                println!("{}", resolution.to_json()?);
            } else {
                resolve::print_report(&resolution);
            }
            Ok(())
        }

        Some(Commands::Env { op }) => {
            let local_op = match op {
                EnvOp::List => commands::env::EnvOp::List,
                EnvOp::Show { layer } => commands::env::EnvOp::Show {
                    layer: layer.clone(),
                },
            };
            commands::env::handle_env_command(&local_op)
        }

        Some(Commands::Toolchain { op }) => {
            let local_op = op.as_ref().map(|o| match o {
                ToolchainOp::List => commands::toolchain::ToolchainOp::List,
                ToolchainOp::Show { name } => {
                    commands::toolchain::ToolchainOp::Show { name: name.clone() }
                }
                ToolchainOp::Select => commands::toolchain::ToolchainOp::Select,
                ToolchainOp::Clear => commands::toolchain::ToolchainOp::Clear,
            });
            commands::toolchain::handle_toolchain_command(&local_op)
        }

        Some(Commands::Install { dest, from }) => {
            let summary = install::install_presets(dest, from.as_deref())?;
            println!(
                "{} Installed {} files to {}",
                "✓".green(),
                summary.files,
                summary.dest.display().to_string().cyan()
            );
            Ok(())
        }

        Some(Commands::Info) => print_info(),

        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let bin_name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, bin_name, &mut std::io::stdout());
            Ok(())
        }

        None => {
            print_splash();
            Ok(())
        }
    }
}

fn print_splash() {
    println!();
    println!("   {}", "confax".bold().cyan());
    println!(
        "   {}",
        "The shared build configuration base".dimmed().italic()
    );
    println!("   {}", format!("v{}", env!("CARGO_PKG_VERSION")).green());
    println!();

    let mut table = ui::Table::new(&["Category", "Commands"]);
    table.add_row(vec![
        "Start".bold().green().to_string(),
        format!("{}, {}", "new".cyan(), "init".cyan()),
    ]);
    table.add_row(vec![
        "Config".bold().yellow().to_string(),
        format!("{}, {}", "resolve".cyan(), "env".cyan()),
    ]);
    table.add_row(vec![
        "Cross".bold().blue().to_string(),
        "toolchain".cyan().to_string(),
    ]);
    table.add_row(vec![
        "Ship".bold().magenta().to_string(),
        format!("{}, {}", "install".cyan(), "completion".cyan()),
    ]);
    table.print();

    println!();
    println!("   Run {} for detailed usage.", "cfx --help".white().bold());
    println!();
}

fn create_project(name_opt: &Option<String>, templ_cli: &str) -> Result<()> {
    let name = match name_opt {
        Some(n) => n.clone(),
        None => Text::new("What is your project name?")
            .with_default("my-app")
            .prompt()?,
    };

    let template = if name_opt.is_none() {
        Select::new("Select a template:", vec!["console", "embedded"]).prompt()?
    } else {
        templ_cli
    };

    let path = Path::new(&name);
    if path.exists() {
        println!("{} Error: Directory '{}' already exists", "x".red(), name);
        return Ok(());
    }

    let project_name = path
        .file_name()
        .unwrap_or(path.as_os_str())
        .to_string_lossy();

    for (rel, contents) in templates::get_template(&project_name, template) {
        let dest = path.join(&rel);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(dest, contents)?;
    }

    println!(
        "{} Created new project: {} (template: {})",
        "✓".green(),
        name.bold(),
        template.cyan()
    );
    println!("  cd {}\n  cfx resolve", name);
    Ok(())
}

fn init_project() -> Result<()> {
    if Path::new(config::CONFIG_FILE).exists() {
        println!(
            "{} Error: Project already initialized ({} exists).",
            "x".red(),
            config::CONFIG_FILE
        );
        return Ok(());
    }

    let current_dir = std::env::current_dir()?;
    let dir_name = current_dir
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("unknown"))
        .to_string_lossy();

    let name = Text::new("Project name?").with_default(&dir_name).prompt()?;
    let template = Select::new("Template?", vec!["console", "embedded"]).prompt()?;

    for (rel, contents) in templates::get_template(&name, template) {
        let dest = Path::new(&rel);
        if dest.exists() {
            println!("{} '{}' exists, skipping.", "!".yellow(), rel);
            continue;
        }
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(dest, contents)?;
    }

    println!(
        "{} Initialized confax project in current directory.",
        "✓".green()
    );
    Ok(())
}

fn print_info() -> Result<()> {
    println!("{} v{}", "confax".bold().cyan(), env!("CARGO_PKG_VERSION"));
    println!("The shared build configuration base");
    println!("------------------------------------");

    println!(
        "{}: {} {}",
        "System".bold(),
        std::env::consts::OS,
        std::env::consts::ARCH
    );

    let family = toolchain::detect_host_family();
    println!("{}: {}", "Host compiler".bold(), family.to_string().cyan());

    let home = dirs::home_dir().unwrap_or_default();
    println!(
        "{}: {}",
        "Selection cache".bold(),
        home.join(".cfx").display()
    );

    println!("\n{}", "Built-in layers:".bold());
    let mut table = ui::Table::new(&["Layer", "Keys"]);
    for name in confax::env::presets::PRESET_NAMES {
        if let Some(layer) = confax::env::presets::by_name(name) {
            table.add_row(vec![layer.name.cyan().to_string(), layer.vars.len().to_string()]);
        }
    }
    table.print();

    println!("\n{}", "Built-in toolchains:".bold());
    let mut table = ui::Table::new(&["Name", "System", "Processor"]);
    for name in toolchain::presets::PRESET_NAMES {
        if let Some(tc) = toolchain::presets::by_name(name) {
            table.add_row(vec![
                tc.name.cyan().to_string(),
                tc.system.clone(),
                tc.processor.clone(),
            ]);
        }
    }
    table.print();

    Ok(())
}
