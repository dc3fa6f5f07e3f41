use std::path::{Path, PathBuf};

use snaptext_config::SnaptextConfig;
use snaptext_core::{ImageBlob, OcrBackend, OcrError, OcrResult, Trigger};
use snaptext_logging::{EventLogger, SessionEvent};
use snaptext_media::{
    capture_from_camera, init_camera, load_selection, resolve_pending_image, CameraOptions,
    CameraSession, CaptureSettings, CaptureState,
};
use snaptext_sink::ResultSink;
use snaptext_upload::UploadClient;
use tracing::{info, warn};

/// What a successful trigger produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Captured { bytes: usize, width: u32, height: u32 },
    Recognized(OcrResult),
    Exported { path: PathBuf, bytes: usize },
}

/// One front-end session: the file selection, the pending capture, the
/// result buffer, and the handlers for each trigger.
///
/// Handlers take `&mut self`, so uploads never overlap.
pub struct OcrSession {
    backend: Box<dyn OcrBackend>,
    camera: Option<CameraSession>,
    capture_settings: CaptureSettings,
    capture: CaptureState,
    selection: Option<ImageBlob>,
    sink: ResultSink,
    download_dir: PathBuf,
    events: EventLogger,
}

impl OcrSession {
    pub fn new(backend: Box<dyn OcrBackend>, download_dir: impl Into<PathBuf>) -> Self {
        Self {
            backend,
            camera: None,
            capture_settings: CaptureSettings::default(),
            capture: CaptureState::new(),
            selection: None,
            sink: ResultSink::new(),
            download_dir: download_dir.into(),
            events: EventLogger::new(),
        }
    }

    /// Build a session from prepared config. The camera is only opened when
    /// `with_camera` is set; a missing camera is not an error.
    pub async fn from_config(config: &SnaptextConfig, with_camera: bool) -> Result<Self, OcrError> {
        let client = UploadClient::new(config.backend_url())?;
        let (default_width, default_height) = config.default_raster();
        let mut session = Self::new(Box::new(client), config.download_dir()).with_capture_settings(
            CaptureSettings {
                default_width,
                default_height,
                jpeg_quality: config.jpeg_quality(),
            },
        );

        if with_camera {
            let options = CameraOptions {
                enabled: config.camera_enabled(),
                device: config.camera_device(),
                prefer_rear: config.prefer_rear_camera(),
                grabber: config.grabber().to_string(),
            };
            session.camera = init_camera(&options).await;
        }

        info!(
            session_id = %session.events.session_id(),
            endpoint = session.backend.endpoint(),
            camera = session.camera.as_ref().map(|c| c.name()).unwrap_or("none"),
            "Session started"
        );
        Ok(session)
    }

    pub fn with_camera(mut self, camera: Option<CameraSession>) -> Self {
        self.camera = camera;
        self
    }

    pub fn with_capture_settings(mut self, settings: CaptureSettings) -> Self {
        self.capture_settings = settings;
        self
    }

    pub fn has_camera(&self) -> bool {
        self.camera.is_some()
    }

    pub fn endpoint(&self) -> &str {
        self.backend.endpoint()
    }

    pub fn download_dir(&self) -> &Path {
        &self.download_dir
    }

    pub fn selection(&self) -> Option<&ImageBlob> {
        self.selection.as_ref()
    }

    pub fn pending_capture(&self) -> Option<&ImageBlob> {
        self.capture.pending()
    }

    /// Current content of the result buffer.
    pub fn text(&self) -> &str {
        self.sink.text()
    }

    /// Replace the result buffer with user-edited text.
    pub fn edit(&mut self, text: impl Into<String>) {
        self.sink.edit(text);
    }

    /// Pick a file to upload. A failed read keeps the previous selection.
    pub async fn select_file(&mut self, path: &Path) -> Result<&ImageBlob, OcrError> {
        let blob = load_selection(path).await?;
        self.events.log_event(SessionEvent::FileSelected {
            filename: blob.filename().map(str::to_string),
            mime: blob.mime_type().to_string(),
            bytes: blob.len(),
        });
        Ok(&*self.selection.insert(blob))
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Route a trigger to its handler.
    pub async fn dispatch(&mut self, trigger: Trigger) -> Result<Outcome, OcrError> {
        match trigger {
            Trigger::Capture => self.on_capture().await,
            Trigger::Upload => self.on_upload().await,
            Trigger::Download => self.on_download().await,
        }
    }

    pub async fn on_capture(&mut self) -> Result<Outcome, OcrError> {
        let result = self.capture_frame().await;
        self.track(Trigger::Capture, result)
    }

    pub async fn on_upload(&mut self) -> Result<Outcome, OcrError> {
        let result = self.upload_pending().await;
        self.track(Trigger::Upload, result)
    }

    pub async fn on_download(&mut self) -> Result<Outcome, OcrError> {
        let result = self.export_buffer().await;
        self.track(Trigger::Download, result)
    }

    async fn capture_frame(&mut self) -> Result<Outcome, OcrError> {
        let camera = self
            .camera
            .as_ref()
            .ok_or_else(|| OcrError::CameraUnavailable("no camera session".into()))?;

        let capture =
            capture_from_camera(camera.source(), &mut self.capture, &self.capture_settings).await?;

        self.events.log_event(SessionEvent::Captured {
            bytes: capture.blob.len(),
            width: capture.width,
            height: capture.height,
        });
        Ok(Outcome::Captured {
            bytes: capture.blob.len(),
            width: capture.width,
            height: capture.height,
        })
    }

    async fn upload_pending(&mut self) -> Result<Outcome, OcrError> {
        let image = resolve_pending_image(self.selection.as_ref(), self.capture.pending())?;

        self.events.log_event(SessionEvent::UploadStarted {
            endpoint: self.backend.endpoint().to_string(),
            filename: image.filename().unwrap_or_default().to_string(),
            bytes: image.len(),
        });

        let result = self.backend.recognize(&image).await?;
        self.sink.render(&result.text);

        self.events.log_event(SessionEvent::Recognized {
            chars: result.text.chars().count(),
        });
        Ok(Outcome::Recognized(result))
    }

    async fn export_buffer(&mut self) -> Result<Outcome, OcrError> {
        let artifact = self.sink.export();
        let path = artifact.save_to(&self.download_dir).await?;
        let bytes = artifact.data().len();

        self.events.log_event(SessionEvent::Exported {
            path: path.display().to_string(),
            bytes,
        });
        Ok(Outcome::Exported { path, bytes })
    }

    fn track(&self, trigger: Trigger, result: Result<Outcome, OcrError>) -> Result<Outcome, OcrError> {
        if let Err(e) = &result {
            warn!(trigger = trigger.name(), error = %e, "Trigger failed");
            self.events.log_event(SessionEvent::Failed {
                trigger: trigger.name().to_string(),
                kind: e.kind().to_string(),
                error: e.to_string(),
            });
        }
        result
    }
}
