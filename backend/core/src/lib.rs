pub mod error;
pub mod traits;
pub mod types;

pub use error::OcrError;
pub use traits::{OcrBackend, VideoSource};
pub use types::{ImageBlob, OcrResult, Trigger, CAPTURE_FILENAME, JPEG_MIME};
