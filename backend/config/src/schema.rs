//! snaptext configuration schema.
//!
//! Every field is optional in the file; `apply_all_defaults` fills the gaps
//! and the accessors below fall back to the same defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::defaults::{
    DEFAULT_BACKEND_URL, DEFAULT_GRABBER, DEFAULT_JPEG_QUALITY, DEFAULT_LOG_LEVEL,
    DEFAULT_RASTER_HEIGHT, DEFAULT_RASTER_WIDTH,
};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Root configuration, as read from `config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnaptextConfig {
    /// Remote OCR service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend: Option<BackendConfig>,

    /// Camera capture
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera: Option<CameraConfig>,

    /// Where exported results go
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<OutputConfig>,

    /// Logging configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendConfig {
    /// Base URL of the OCR service; `/ocr` is appended when uploading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// Fixed device path, e.g. `/dev/video2`. Discovered when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefer_rear: Option<bool>,
    /// Frame grabber program.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grabber: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_height: Option<u32>,
    /// 1-100
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jpeg_quality: Option<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_dir: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggingConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    /// Directory for rolling NDJSON logs; console only when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
}

// ---------------------------------------------------------------------------
// Accessors
// ---------------------------------------------------------------------------

impl SnaptextConfig {
    pub fn backend_url(&self) -> &str {
        self.backend
            .as_ref()
            .and_then(|b| b.base_url.as_deref())
            .unwrap_or(DEFAULT_BACKEND_URL)
    }

    /// Override the backend URL (e.g. from a CLI flag).
    pub fn set_backend_url(&mut self, url: impl Into<String>) {
        self.backend
            .get_or_insert_with(BackendConfig::default)
            .base_url = Some(url.into());
    }

    pub fn camera_enabled(&self) -> bool {
        self.camera.as_ref().and_then(|c| c.enabled).unwrap_or(true)
    }

    pub fn camera_device(&self) -> Option<PathBuf> {
        self.camera
            .as_ref()
            .and_then(|c| c.device.as_deref())
            .map(PathBuf::from)
    }

    pub fn prefer_rear_camera(&self) -> bool {
        self.camera.as_ref().and_then(|c| c.prefer_rear).unwrap_or(true)
    }

    pub fn grabber(&self) -> &str {
        self.camera
            .as_ref()
            .and_then(|c| c.grabber.as_deref())
            .unwrap_or(DEFAULT_GRABBER)
    }

    /// Raster size used when the camera reports none.
    pub fn default_raster(&self) -> (u32, u32) {
        let camera = self.camera.as_ref();
        (
            camera.and_then(|c| c.default_width).unwrap_or(DEFAULT_RASTER_WIDTH),
            camera.and_then(|c| c.default_height).unwrap_or(DEFAULT_RASTER_HEIGHT),
        )
    }

    pub fn jpeg_quality(&self) -> u8 {
        self.camera
            .as_ref()
            .and_then(|c| c.jpeg_quality)
            .unwrap_or(DEFAULT_JPEG_QUALITY)
    }

    pub fn download_dir(&self) -> PathBuf {
        self.output
            .as_ref()
            .and_then(|o| o.download_dir.as_deref())
            .map(PathBuf::from)
            .unwrap_or_else(crate::defaults::default_download_dir)
    }

    pub fn log_level(&self) -> &str {
        self.logging
            .as_ref()
            .and_then(|l| l.level.as_deref())
            .unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn log_dir(&self) -> Option<PathBuf> {
        self.logging
            .as_ref()
            .and_then(|l| l.dir.as_deref())
            .map(PathBuf::from)
    }
}
