use anyhow::Result;
use async_trait::async_trait;
use image::DynamicImage;

use crate::error::OcrError;
use crate::types::{ImageBlob, OcrResult};

/// A live video feed a still frame can be taken from.
#[async_trait]
pub trait VideoSource: Send + Sync {
    /// Human-readable device name (e.g., "/dev/video0").
    fn name(&self) -> &str;

    /// Native stream resolution as `(width, height)`; `(0, 0)` when the
    /// stream does not report one.
    fn dimensions(&self) -> (u32, u32);

    /// Grab the frame currently on screen.
    async fn current_frame(&self) -> Result<DynamicImage>;
}

/// A remote service that turns an image into text.
#[async_trait]
pub trait OcrBackend: Send + Sync {
    /// The URL requests are sent to.
    fn endpoint(&self) -> &str;

    /// Send one image and wait for the recognized text. One attempt, no retry.
    async fn recognize(&self, image: &ImageBlob) -> Result<OcrResult, OcrError>;
}
