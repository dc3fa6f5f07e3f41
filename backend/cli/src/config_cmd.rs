//! CLI Config Subcommands

use std::path::Path;

use anyhow::{Context, Result};
use clap::Subcommand;
use snaptext_config::{apply_all_defaults, write_config, SnaptextConfig};

use crate::terminal_output::{note_success, note_warn};

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration as YAML
    Show,
    /// Write a config file populated with defaults
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

pub async fn run(cmd: ConfigCommands, config: &SnaptextConfig, path: &Path) -> Result<()> {
    match cmd {
        ConfigCommands::Show => {
            let yaml = serde_yaml::to_string(config).context("Failed to render config")?;
            print!("{yaml}");
        }
        ConfigCommands::Init { force } => {
            if path.exists() && !force {
                note_warn(&format!(
                    "{} already exists; pass --force to overwrite",
                    path.display()
                ));
                return Ok(());
            }
            write_config(&initial_config(config), path).await?;
            note_success(&format!("Wrote {}", path.display()));
        }
    }
    Ok(())
}

/// Defaults, keeping the backend URL the user is running with.
fn initial_config(current: &SnaptextConfig) -> SnaptextConfig {
    let mut config = apply_all_defaults(SnaptextConfig::default());
    config.set_backend_url(current.backend_url());
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use snaptext_config::{config_file_path, load_config};

    #[tokio::test]
    async fn init_writes_defaults_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = config_file_path(dir.path());
        let mut current = SnaptextConfig::default();
        current.set_backend_url("https://ocr.example.com");

        run(ConfigCommands::Init { force: false }, &current, &path)
            .await
            .unwrap();
        let written = load_config(&path).await.unwrap();
        assert_eq!(written.backend_url(), "https://ocr.example.com");
        assert_eq!(written.jpeg_quality(), 90);

        std::fs::write(&path, "backend:\n  baseUrl: http://localhost:1\n").unwrap();
        run(ConfigCommands::Init { force: false }, &current, &path)
            .await
            .unwrap();
        let kept = load_config(&path).await.unwrap();
        assert_eq!(kept.backend_url(), "http://localhost:1");
    }
}
