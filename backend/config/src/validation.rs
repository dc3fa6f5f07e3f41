//! Config validation with field paths in every message.

use crate::schema::SnaptextConfig;
use thiserror::Error;

/// Levels `EnvFilter` understands as a bare directive.
const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// A config validation error with field path and message.
#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// A collection of validation errors found in one pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

/// Validate the config and return a report of all errors and warnings.
pub fn validate(config: &SnaptextConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_backend(config, &mut report);
    validate_camera(config, &mut report);
    validate_logging(config, &mut report);
    report
}

fn validate_backend(config: &SnaptextConfig, report: &mut ValidationReport) {
    let Some(url) = config.backend.as_ref().and_then(|b| b.base_url.as_deref()) else {
        return;
    };
    let url = url.trim();
    if url.is_empty() {
        report.error("backend.baseUrl", "Backend URL cannot be empty");
    } else if !(url.starts_with("http://") || url.starts_with("https://")) {
        report.error("backend.baseUrl", format!("'{url}' must start with http:// or https://"));
    } else if url.starts_with("http://") && !is_local(url) {
        report.warn("backend.baseUrl", "Images will be sent over plain HTTP");
    }
}

fn is_local(url: &str) -> bool {
    let host = url.trim_start_matches("http://");
    ["localhost", "127.0.0.1", "[::1]"]
        .iter()
        .any(|local| host.starts_with(local))
}

fn validate_camera(config: &SnaptextConfig, report: &mut ValidationReport) {
    let Some(camera) = &config.camera else { return };
    if let Some(quality) = camera.jpeg_quality {
        if !(1..=100).contains(&quality) {
            report.error("camera.jpegQuality", format!("{quality} is outside 1-100"));
        }
    }
    if camera.default_width == Some(0) {
        report.error("camera.defaultWidth", "defaultWidth must be > 0");
    }
    if camera.default_height == Some(0) {
        report.error("camera.defaultHeight", "defaultHeight must be > 0");
    }
    if let Some(grabber) = &camera.grabber {
        if grabber.trim().is_empty() {
            report.error("camera.grabber", "Frame grabber cannot be empty");
        }
    }
}

fn validate_logging(config: &SnaptextConfig, report: &mut ValidationReport) {
    let Some(level) = config.logging.as_ref().and_then(|l| l.level.as_deref()) else {
        return;
    };
    // Anything with '=' or ',' is a full filter directive; leave it to EnvFilter.
    if !level.contains(['=', ',']) && !LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
        report.warn("logging.level", format!("Unknown log level '{level}'"));
    }
}
