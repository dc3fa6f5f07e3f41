//! `snaptext-config`: runtime configuration for the snaptext client.
//!
//! Provides:
//! - Typed config schema (backend, camera, output, logging)
//! - YAML read/write
//! - `${ENV_VAR}` substitution
//! - Default value application
//! - Validation with field paths

pub mod defaults;
pub mod env;
pub mod io;
pub mod schema;
pub mod validation;

// Re-export most-used types at crate root.
pub use defaults::{apply_all_defaults, DEFAULT_BACKEND_URL};
pub use env::{resolve_env_vars, resolve_env_vars_with, MissingEnvVarError};
pub use io::{config_dir, config_file_path, load_config, write_config};
pub use schema::SnaptextConfig;
pub use validation::{validate, ConfigValidationError, ValidationReport};

use anyhow::{bail, Context, Result};
use serde_json::Value;
use std::path::Path;

/// Load, apply env substitution, apply defaults and validate a config file.
///
/// This is the main entry point for loading a config at runtime. Warnings
/// are logged; any validation error fails the load.
pub async fn load_and_prepare(path: &Path) -> Result<SnaptextConfig> {
    let raw_config = load_config(path).await?;
    prepare(raw_config)
}

/// Run the substitution/defaults/validation pipeline on an in-memory config.
pub fn prepare(raw_config: SnaptextConfig) -> Result<SnaptextConfig> {
    let (config, report) = resolve(raw_config)?;
    check_report(&report)?;
    Ok(config)
}

/// Substitute env vars, apply defaults and validate, returning the report
/// unlogged. Lets a caller start logging from the resolved settings before
/// the report is emitted.
pub fn resolve(raw_config: SnaptextConfig) -> Result<(SnaptextConfig, ValidationReport)> {
    let value: Value = serde_json::to_value(&raw_config)
        .context("Failed to serialize config for processing")?;

    let value = resolve_env_vars(&value).context("Failed to resolve env vars in config")?;

    let config: SnaptextConfig =
        serde_json::from_value(value).context("Failed to deserialize config after processing")?;

    let config = apply_all_defaults(config);
    let report = validate(&config);
    Ok((config, report))
}

/// Log a validation report. Any error fails.
pub fn check_report(report: &ValidationReport) -> Result<()> {
    for warning in &report.warnings {
        tracing::warn!(path = %warning.path, message = %warning.message, "Config warning");
    }
    if let Some(first) = report.errors.first() {
        for error in &report.errors {
            tracing::error!(path = %error.path, message = %error.message, "Config error");
        }
        bail!("{first} ({} error(s) in total)", report.errors.len());
    }
    Ok(())
}
