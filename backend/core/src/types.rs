use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// MIME type of every camera capture.
pub const JPEG_MIME: &str = "image/jpeg";

/// Filename given to a captured frame when it is sent for recognition.
pub const CAPTURE_FILENAME: &str = "photo.jpg";

/// One still image, ready to upload.
///
/// Cloning is cheap: the bytes are reference counted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBlob {
    data: Bytes,
    mime_type: String,
    filename: Option<String>,
}

impl ImageBlob {
    pub fn new(data: impl Into<Bytes>, mime_type: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            mime_type: mime_type.into(),
            filename: None,
        }
    }

    /// An encoded JPEG with no filename yet.
    pub fn jpeg(data: impl Into<Bytes>) -> Self {
        Self::new(data, JPEG_MIME)
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    pub fn data(&self) -> &Bytes {
        &self.data
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Text recognized by the remote service for one image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OcrResult {
    pub text: String,
    /// Filename echoed back by the service, when it sends one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

impl OcrResult {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            filename: None,
        }
    }
}

/// The user actions the front-end can fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    Capture,
    Upload,
    Download,
}

impl Trigger {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Capture => "capture",
            Self::Upload => "upload",
            Self::Download => "download",
        }
    }
}

impl std::str::FromStr for Trigger {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "capture" | "snap" => Ok(Self::Capture),
            "upload" | "ocr" => Ok(Self::Upload),
            "download" | "save" => Ok(Self::Download),
            other => Err(format!("unknown trigger '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blob_accessors() {
        let blob = ImageBlob::jpeg(vec![0xFF, 0xD8, 0xFF]).with_filename("a.jpg");
        assert_eq!(blob.mime_type(), JPEG_MIME);
        assert_eq!(blob.filename(), Some("a.jpg"));
        assert_eq!(blob.len(), 3);
        assert!(!blob.is_empty());
    }

    #[test]
    fn parses_trigger_aliases() {
        assert_eq!("snap".parse::<Trigger>().unwrap(), Trigger::Capture);
        assert_eq!(" Upload ".parse::<Trigger>().unwrap(), Trigger::Upload);
        assert_eq!("save".parse::<Trigger>().unwrap(), Trigger::Download);
        assert!("dance".parse::<Trigger>().is_err());
    }
}
