//! CLI Status Command
//!
//! Probes the OCR backend's base URL and reports what it answered.

use anyhow::{bail, Result};
use snaptext_config::SnaptextConfig;
use snaptext_core::OcrBackend;
use snaptext_upload::UploadClient;

use crate::terminal_output::{note_error, note_info, note_success, note_warn};

pub async fn run(config: &SnaptextConfig) -> Result<()> {
    let client = UploadClient::new(config.backend_url())?;
    note_info(&format!("OCR endpoint: {}", client.endpoint()));

    match client.probe().await {
        Ok(status) if status.is_up() => {
            note_success(&format!("Backend up at {} ({})", status.url, status.status));
            if !status.body.trim().is_empty() {
                println!("{}", status.body.trim());
            }
            Ok(())
        }
        Ok(status) => {
            note_warn(&format!(
                "Backend at {} answered {}: {}",
                status.url,
                status.status,
                status.body.trim()
            ));
            Ok(())
        }
        Err(e) => {
            note_error(&e.to_string());
            bail!("backend unreachable at {}", client.base_url());
        }
    }
}
