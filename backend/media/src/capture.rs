//! Pending-capture state and the capture/resolve operations.

use snaptext_core::{ImageBlob, OcrError, VideoSource, CAPTURE_FILENAME};
use tracing::{debug, info};

use crate::raster::{self, DEFAULT_HEIGHT, DEFAULT_JPEG_QUALITY, DEFAULT_WIDTH};

/// Holds at most one captured image waiting to be uploaded.
#[derive(Debug, Default)]
pub struct CaptureState {
    pending: Option<ImageBlob>,
}

impl CaptureState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> Option<&ImageBlob> {
        self.pending.as_ref()
    }

    /// Store a new capture, returning the one it supersedes.
    pub fn replace(&mut self, blob: ImageBlob) -> Option<ImageBlob> {
        self.pending.replace(blob)
    }
}

/// How camera frames are rasterized and encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureSettings {
    pub default_width: u32,
    pub default_height: u32,
    pub jpeg_quality: u8,
}

impl Default for CaptureSettings {
    fn default() -> Self {
        Self {
            default_width: DEFAULT_WIDTH,
            default_height: DEFAULT_HEIGHT,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

/// A finished camera capture.
#[derive(Debug, Clone)]
pub struct Capture {
    pub blob: ImageBlob,
    pub width: u32,
    pub height: u32,
}

/// Grab the current frame, encode it as JPEG and make it the pending image.
pub async fn capture_from_camera(
    source: &dyn VideoSource,
    state: &mut CaptureState,
    settings: &CaptureSettings,
) -> Result<Capture, OcrError> {
    let (width, height) = raster::raster_size(
        source.dimensions(),
        (settings.default_width, settings.default_height),
    );

    let frame = source
        .current_frame()
        .await
        .map_err(|e| OcrError::CaptureFailed(format!("{}: {e:#}", source.name())))?;

    debug!(
        camera = source.name(),
        frame_width = frame.width(),
        frame_height = frame.height(),
        width,
        height,
        "Rasterizing camera frame"
    );

    let quality = settings.jpeg_quality;
    let jpeg = tokio::task::spawn_blocking(move || {
        raster::encode_jpeg(raster::draw_frame(&frame, width, height), quality)
    })
    .await
    .map_err(|e| OcrError::CaptureFailed(format!("encoder task failed: {e}")))?
    .map_err(|e| OcrError::CaptureFailed(format!("JPEG encoding failed: {e}")))?;

    let blob = ImageBlob::jpeg(jpeg);
    if state.replace(blob.clone()).is_some() {
        debug!("Replaced previous pending capture");
    }

    info!(bytes = blob.len(), width, height, "Photo captured");
    Ok(Capture {
        blob,
        width,
        height,
    })
}

/// Pick the image an upload should send.
///
/// A file selection always wins; otherwise the pending capture is sent as
/// `photo.jpg`.
pub fn resolve_pending_image(
    selection: Option<&ImageBlob>,
    pending: Option<&ImageBlob>,
) -> Result<ImageBlob, OcrError> {
    if let Some(file) = selection {
        return Ok(file.clone());
    }
    match pending {
        Some(blob) => Ok(ImageBlob::jpeg(blob.data().clone()).with_filename(CAPTURE_FILENAME)),
        None => Err(OcrError::NoImageSelected),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use async_trait::async_trait;
    use image::{DynamicImage, Rgba, RgbaImage};
    use snaptext_core::JPEG_MIME;
    use std::sync::atomic::{AtomicU8, Ordering};

    /// Serves solid frames whose shade changes on every grab.
    struct FakeCamera {
        reported: (u32, u32),
        frame_size: (u32, u32),
        shade: AtomicU8,
    }

    impl FakeCamera {
        fn new(reported: (u32, u32), frame_size: (u32, u32)) -> Self {
            Self {
                reported,
                frame_size,
                shade: AtomicU8::new(0),
            }
        }
    }

    #[async_trait]
    impl VideoSource for FakeCamera {
        fn name(&self) -> &str {
            "fake"
        }

        fn dimensions(&self) -> (u32, u32) {
            self.reported
        }

        async fn current_frame(&self) -> Result<DynamicImage> {
            let shade = self.shade.fetch_add(100, Ordering::SeqCst);
            let (w, h) = self.frame_size;
            Ok(DynamicImage::ImageRgba8(RgbaImage::from_pixel(
                w,
                h,
                Rgba([shade, shade, shade, 255]),
            )))
        }
    }

    struct BrokenCamera;

    #[async_trait]
    impl VideoSource for BrokenCamera {
        fn name(&self) -> &str {
            "broken"
        }

        fn dimensions(&self) -> (u32, u32) {
            (320, 240)
        }

        async fn current_frame(&self) -> Result<DynamicImage> {
            anyhow::bail!("device unplugged")
        }
    }

    fn blob(tag: u8) -> ImageBlob {
        ImageBlob::new(vec![tag; 4], "image/png").with_filename(format!("{tag}.png"))
    }

    #[tokio::test]
    async fn capture_uses_native_resolution() {
        let camera = FakeCamera::new((64, 48), (64, 48));
        let mut state = CaptureState::new();
        let capture = capture_from_camera(&camera, &mut state, &CaptureSettings::default())
            .await
            .unwrap();

        assert_eq!((capture.width, capture.height), (64, 48));
        assert_eq!(capture.blob.mime_type(), JPEG_MIME);
        let decoded = image::load_from_memory(capture.blob.data()).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (64, 48));
        assert_eq!(state.pending(), Some(&capture.blob));
    }

    #[tokio::test]
    async fn capture_falls_back_to_default_size() {
        let camera = FakeCamera::new((0, 0), (10, 10));
        let mut state = CaptureState::new();
        let capture = capture_from_camera(&camera, &mut state, &CaptureSettings::default())
            .await
            .unwrap();

        let decoded = image::load_from_memory(capture.blob.data()).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (640, 480));
    }

    #[tokio::test]
    async fn repeated_captures_keep_only_the_latest() {
        let camera = FakeCamera::new((16, 16), (16, 16));
        let mut state = CaptureState::new();
        let settings = CaptureSettings::default();

        let first = capture_from_camera(&camera, &mut state, &settings).await.unwrap();
        let second = capture_from_camera(&camera, &mut state, &settings).await.unwrap();

        assert_ne!(first.blob.data(), second.blob.data());
        assert_eq!(state.pending(), Some(&second.blob));
        let resolved = resolve_pending_image(None, state.pending()).unwrap();
        assert_eq!(resolved.data(), second.blob.data());
    }

    #[tokio::test]
    async fn failed_grab_keeps_previous_capture() {
        let mut state = CaptureState::new();
        state.replace(blob(1));

        let err = capture_from_camera(&BrokenCamera, &mut state, &CaptureSettings::default())
            .await
            .unwrap_err();

        assert!(matches!(err, OcrError::CaptureFailed(msg) if msg.contains("device unplugged")));
        assert_eq!(state.pending(), Some(&blob(1)));
    }

    #[test]
    fn selection_wins_over_capture() {
        let selected = blob(7);
        let resolved = resolve_pending_image(Some(&selected), Some(&blob(9))).unwrap();
        assert_eq!(resolved, selected);
    }

    #[test]
    fn capture_is_renamed_photo_jpg() {
        let resolved = resolve_pending_image(None, Some(&blob(3))).unwrap();
        assert_eq!(resolved.filename(), Some("photo.jpg"));
        assert_eq!(resolved.mime_type(), "image/jpeg");
        assert_eq!(resolved.data(), blob(3).data());
    }

    #[test]
    fn nothing_to_send() {
        let err = resolve_pending_image(None, None).unwrap_err();
        assert!(matches!(err, OcrError::NoImageSelected));
    }
}
