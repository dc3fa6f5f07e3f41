//! Text artifact export.
//!
//! The terminal stand-in for a browser download: the artifact is written
//! next to its final name and renamed into place, so a half-written
//! `ocr_result.txt` is never visible.

use std::path::{Path, PathBuf};

use bytes::Bytes;
use snaptext_core::OcrError;
use tokio::fs;
use tracing::{info, warn};

/// Name of every exported result file.
pub const RESULT_FILENAME: &str = "ocr_result.txt";

/// MIME type of exported results.
pub const TEXT_MIME: &str = "text/plain";

/// A downloadable text file held in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextArtifact {
    filename: String,
    mime_type: String,
    data: Bytes,
}

impl TextArtifact {
    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// Write the artifact into `dir`, replacing an earlier export.
    pub async fn save_to(&self, dir: &Path) -> Result<PathBuf, OcrError> {
        fs::create_dir_all(dir)
            .await
            .map_err(|e| OcrError::ExportFailed(format!("{}: {e}", dir.display())))?;

        let target = dir.join(&self.filename);
        let tmp = dir.join(format!(".{}.tmp", self.filename));

        if let Err(e) = fs::write(&tmp, &self.data).await {
            discard(&tmp).await;
            return Err(OcrError::ExportFailed(format!("{}: {e}", tmp.display())));
        }
        if let Err(e) = fs::rename(&tmp, &target).await {
            discard(&tmp).await;
            return Err(OcrError::ExportFailed(format!("{}: {e}", target.display())));
        }

        info!(path = %target.display(), bytes = self.data.len(), "Exported OCR result");
        Ok(target)
    }
}

async fn discard(tmp: &Path) {
    if let Err(e) = fs::remove_file(tmp).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            warn!(path = %tmp.display(), error = %e, "Failed to remove temporary export");
        }
    }
}

/// Package buffer text as `ocr_result.txt` (`text/plain`, UTF-8).
pub fn export_as_file(text: &str) -> TextArtifact {
    TextArtifact {
        filename: RESULT_FILENAME.to_string(),
        mime_type: TEXT_MIME.to_string(),
        data: Bytes::copy_from_slice(text.as_bytes()),
    }
}
