//! MIME type detection for selected files.
//!
//! Used to label the multipart part of files picked from disk.

use std::path::Path;

/// Detect MIME type by file extension.
pub fn detect_mime_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png"          => "image/png",
        "gif"          => "image/gif",
        "webp"         => "image/webp",
        "bmp"          => "image/bmp",
        "tiff" | "tif" => "image/tiff",
        "pdf"          => "application/pdf",
        _              => "application/octet-stream",
    }
}

/// Whether a MIME type is for an image.
pub fn is_image(mime: &str) -> bool {
    mime.starts_with("image/")
}

/// Whether the OCR service can read this type (images and PDFs).
pub fn is_recognizable(mime: &str) -> bool {
    is_image(mime) || mime == "application/pdf"
}
