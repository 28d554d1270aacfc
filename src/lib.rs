//! # confax - Shared Build Configuration Base
//!
//! confax (binary `cfx`) is a build-configuration layering tool for C/C++
//! projects: one place for the settings every project repeats.
//!
//! ## Features
//!
//! - **Layered Environments**: `common` defaults overridden by `dev`/`prod`
//!   presets, last-write-wins
//! - **Warning Profiles**: fixed warning sets per compiler family, skips
//!   reported instead of swallowed
//! - **Coverage and Definitions**: debug-only instrumentation and exactly
//!   one of `DEBUG_BUILD`/`RELEASE_BUILD` per target
//! - **Cross Toolchains**: load-once descriptors with sysroot search
//!   isolation (ARM Cortex-M4 and AArch64 presets included)
//!
//! ## Quick Start
//!
//! ```bash
//! # Scaffold a project
//! cfx new myapp
//!
//! # Show the effective configuration
//! cfx resolve
//! ```
//!
//! ## Module Organization
//!
//! - [`env`] - Variable layers and the merged effective environment
//! - [`flags`] - Compiler families and flag functions
//! - [`resolve`] - One-pass resolution of a project's targets
//! - [`toolchain`] - Cross-compilation descriptors
//! - [`commands`] - CLI command handlers

/// CLI command handlers extracted from main.
pub mod commands;

/// Configuration file parsing (`cfx.toml`).
pub mod config;

/// Layered environment variables.
pub mod env;

/// Compiler families and flag functions.
pub mod flags;

/// Installation of the shared base directories.
pub mod install;

/// One-pass configuration resolution.
pub mod resolve;

/// Build targets and build modes.
pub mod target;

/// Project templates (console, embedded).
pub mod templates;

/// Toolchain descriptors and selection.
pub mod toolchain;

/// Terminal UI utilities (tables, colors).
pub mod ui;

/// Project version stamping.
pub mod version;
