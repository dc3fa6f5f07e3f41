use thiserror::Error;

/// Every failure a user-triggered action can end in.
///
/// None of these are fatal: the front-end reports them and the user may
/// trigger the action again.
#[derive(Debug, Error)]
pub enum OcrError {
    #[error("no image selected: pick a file or capture a photo first")]
    NoImageSelected,

    #[error("camera unavailable: {0}")]
    CameraUnavailable(String),

    #[error("OCR request failed ({status}): {body}")]
    UploadRejected { status: u16, body: String },

    #[error("network error: {0}")]
    NetworkError(String),

    #[error("malformed OCR response: {0}")]
    MalformedResponse(String),

    #[error("capture failed: {0}")]
    CaptureFailed(String),

    #[error("could not read selected file: {0}")]
    SelectionFailed(String),

    #[error("export failed: {0}")]
    ExportFailed(String),

    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl OcrError {
    /// Short stable label, used as the `kind` field of failure events.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NoImageSelected => "no_image_selected",
            Self::CameraUnavailable(_) => "camera_unavailable",
            Self::UploadRejected { .. } => "upload_rejected",
            Self::NetworkError(_) => "network_error",
            Self::MalformedResponse(_) => "malformed_response",
            Self::CaptureFailed(_) => "capture_failed",
            Self::SelectionFailed(_) => "selection_failed",
            Self::ExportFailed(_) => "export_failed",
            Self::ConfigError(_) => "config_error",
            Self::Other(_) => "other",
        }
    }
}
