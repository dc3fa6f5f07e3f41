//! Files picked by the user, loaded into upload-ready blobs.

use std::path::Path;

use snaptext_core::{ImageBlob, OcrError};
use tokio::fs;
use tracing::{info, warn};

use crate::mime_detect::{detect_mime_type, is_recognizable};

/// Read a file from disk as the current selection.
///
/// The filename and MIME type come from the path. Types the service is not
/// known to read are still accepted, with a warning.
pub async fn load_selection(path: &Path) -> Result<ImageBlob, OcrError> {
    let data = fs::read(path)
        .await
        .map_err(|e| OcrError::SelectionFailed(format!("{}: {e}", path.display())))?;

    let mime = detect_mime_type(path);
    if !is_recognizable(mime) {
        warn!(path = %path.display(), mime, "Selected file does not look like an image");
    }

    let mut blob = ImageBlob::new(data, mime);
    if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
        blob = blob.with_filename(name);
    }

    info!(path = %path.display(), bytes = blob.len(), mime, "File selected");
    Ok(blob)
}
