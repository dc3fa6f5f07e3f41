//! Config defaults: applies default values to parsed config.

use std::path::PathBuf;

use crate::schema::{BackendConfig, CameraConfig, LoggingConfig, OutputConfig, SnaptextConfig};

/// Backend base URL, fixed at build time through `SNAPTEXT_BACKEND_URL`.
pub const DEFAULT_BACKEND_URL: &str = match option_env!("SNAPTEXT_BACKEND_URL") {
    Some(url) => url,
    None => "http://localhost:8000",
};

/// Grabber, raster size and JPEG quality come from the capture pipeline itself.
pub use snaptext_media::camera::DEFAULT_GRABBER;
pub use snaptext_media::raster::{
    DEFAULT_HEIGHT as DEFAULT_RASTER_HEIGHT, DEFAULT_JPEG_QUALITY, DEFAULT_WIDTH as DEFAULT_RASTER_WIDTH,
};

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// The user's download directory, or the working directory.
pub fn default_download_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// Apply all defaults to a freshly loaded config.
pub fn apply_all_defaults(config: SnaptextConfig) -> SnaptextConfig {
    let config = apply_backend_defaults(config);
    let config = apply_camera_defaults(config);
    let config = apply_output_defaults(config);
    apply_logging_defaults(config)
}

fn apply_backend_defaults(mut config: SnaptextConfig) -> SnaptextConfig {
    let backend = config.backend.get_or_insert_with(BackendConfig::default);
    if backend.base_url.is_none() {
        backend.base_url = Some(DEFAULT_BACKEND_URL.to_string());
    }
    config
}

/// Camera on, rear-facing preferred, 640x480 fallback, quality 90.
fn apply_camera_defaults(mut config: SnaptextConfig) -> SnaptextConfig {
    let camera = config.camera.get_or_insert_with(CameraConfig::default);
    camera.enabled.get_or_insert(true);
    camera.prefer_rear.get_or_insert(true);
    camera
        .grabber
        .get_or_insert_with(|| DEFAULT_GRABBER.to_string());
    camera.default_width.get_or_insert(DEFAULT_RASTER_WIDTH);
    camera.default_height.get_or_insert(DEFAULT_RASTER_HEIGHT);
    camera.jpeg_quality.get_or_insert(DEFAULT_JPEG_QUALITY);
    config
}

fn apply_output_defaults(mut config: SnaptextConfig) -> SnaptextConfig {
    let output = config.output.get_or_insert_with(OutputConfig::default);
    if output.download_dir.is_none() {
        output.download_dir = Some(default_download_dir().display().to_string());
    }
    config
}

fn apply_logging_defaults(mut config: SnaptextConfig) -> SnaptextConfig {
    let logging = config.logging.get_or_insert_with(LoggingConfig::default);
    if logging.level.is_none() {
        logging.level = Some(DEFAULT_LOG_LEVEL.to_string());
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_every_section() {
        let cfg = apply_all_defaults(SnaptextConfig::default());
        let camera = cfg.camera.as_ref().unwrap();
        assert_eq!(camera.jpeg_quality, Some(90));
        assert_eq!(camera.default_width, Some(640));
        assert_eq!(camera.default_height, Some(480));
        assert_eq!(camera.prefer_rear, Some(true));
        assert_eq!(cfg.backend.unwrap().base_url.unwrap(), DEFAULT_BACKEND_URL);
        assert!(cfg.output.unwrap().download_dir.is_some());
        assert_eq!(cfg.logging.unwrap().level.unwrap(), "info");
    }

    #[test]
    fn camera_defaults_match_capture_settings() {
        let cfg = apply_all_defaults(SnaptextConfig::default());
        let capture = snaptext_media::CaptureSettings::default();
        assert_eq!(cfg.default_raster(), (capture.default_width, capture.default_height));
        assert_eq!(cfg.jpeg_quality(), capture.jpeg_quality);
        assert_eq!(cfg.grabber(), snaptext_media::CameraOptions::default().grabber);
    }

    #[test]
    fn does_not_override_user_values() {
        let cfg = SnaptextConfig {
            camera: Some(CameraConfig {
                jpeg_quality: Some(60),
                enabled: Some(false),
                ..Default::default()
            }),
            ..Default::default()
        };
        let cfg = apply_all_defaults(cfg);
        let camera = cfg.camera.unwrap();
        assert_eq!(camera.jpeg_quality, Some(60));
        assert_eq!(camera.enabled, Some(false));
        assert_eq!(camera.grabber.as_deref(), Some("ffmpeg"));
    }
}
