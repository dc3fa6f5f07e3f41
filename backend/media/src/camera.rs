//! Camera discovery and the command-driven video source.
//!
//! Devices are found through `/sys/class/video4linux`. Frames are grabbed by
//! running an external program (ffmpeg by default) that writes one encoded
//! image to stdout.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use image::DynamicImage;
use snaptext_core::{OcrError, VideoSource};
use tokio::process::Command;
use tracing::{debug, info, warn};

/// Frame grabber used when none is configured.
pub const DEFAULT_GRABBER: &str = "ffmpeg";

/// Where the kernel lists video capture devices.
const SYSFS_VIDEO_ROOT: &str = "/sys/class/video4linux";

/// Device-name fragments that mark a camera facing away from the user.
const REAR_HINTS: &[&str] = &["back", "rear", "environment", "world"];

/// A video device found on the system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraDevice {
    pub path: PathBuf,
    pub name: String,
}

impl CameraDevice {
    fn is_rear_facing(&self) -> bool {
        let name = self.name.to_lowercase();
        REAR_HINTS.iter().any(|hint| name.contains(hint))
    }
}

/// How the camera should be acquired.
#[derive(Debug, Clone)]
pub struct CameraOptions {
    pub enabled: bool,
    /// Use this device instead of discovering one.
    pub device: Option<PathBuf>,
    pub prefer_rear: bool,
    /// Program that grabs one frame.
    pub grabber: String,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            device: None,
            prefer_rear: true,
            grabber: DEFAULT_GRABBER.to_string(),
        }
    }
}

/// List capture devices registered under `sysfs_root`, sorted by path.
pub fn list_devices_in(sysfs_root: &Path) -> Vec<CameraDevice> {
    let Ok(entries) = std::fs::read_dir(sysfs_root) else {
        return Vec::new();
    };

    let mut devices: Vec<CameraDevice> = entries
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| {
            let node = entry.file_name().to_str()?.to_string();
            if !node.starts_with("video") {
                return None;
            }
            let name = std::fs::read_to_string(entry.path().join("name"))
                .map(|n| n.trim().to_string())
                .unwrap_or_else(|_| node.clone());
            Some(CameraDevice {
                path: PathBuf::from("/dev").join(&node),
                name,
            })
        })
        .collect();

    devices.sort_by(|a, b| a.path.cmp(&b.path));
    devices
}

/// List the system's capture devices.
pub fn list_devices() -> Vec<CameraDevice> {
    list_devices_in(Path::new(SYSFS_VIDEO_ROOT))
}

/// Pick the device to open: a rear-facing one when asked for and available,
/// otherwise the first.
pub fn pick_preferred(devices: &[CameraDevice], prefer_rear: bool) -> Option<&CameraDevice> {
    if prefer_rear {
        if let Some(rear) = devices.iter().find(|d| d.is_rear_facing()) {
            return Some(rear);
        }
    }
    devices.first()
}

/// Grabs frames by running an external program once per frame.
pub struct CommandCamera {
    device: CameraDevice,
    grabber: String,
    dimensions: (u32, u32),
}

impl CommandCamera {
    /// Probe the device with one grab and remember the frame size it reports.
    pub async fn open(device: CameraDevice, grabber: impl Into<String>) -> Result<Self> {
        let mut camera = Self {
            device,
            grabber: grabber.into(),
            dimensions: (0, 0),
        };
        let probe = camera.grab().await?;
        camera.dimensions = (probe.width(), probe.height());
        Ok(camera)
    }

    fn grabber_args(&self) -> Vec<String> {
        let device = self.device.path.display().to_string();
        let program = Path::new(&self.grabber)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default();

        if program == DEFAULT_GRABBER {
            [
                "-hide_banner", "-loglevel", "error",
                "-f", "v4l2", "-i", device.as_str(),
                "-frames:v", "1",
                "-f", "image2pipe", "-vcodec", "png", "-",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect()
        } else {
            vec![device]
        }
    }

    async fn grab(&self) -> Result<DynamicImage> {
        let args = self.grabber_args();
        debug!(grabber = %self.grabber, ?args, "Grabbing frame");

        let output = Command::new(&self.grabber)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .await
            .with_context(|| format!("Failed to run frame grabber '{}'", self.grabber))?;

        if !output.status.success() {
            bail!(
                "Frame grabber exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        image::load_from_memory(&output.stdout).context("Frame grabber produced no decodable image")
    }
}

#[async_trait]
impl VideoSource for CommandCamera {
    fn name(&self) -> &str {
        &self.device.name
    }

    fn dimensions(&self) -> (u32, u32) {
        self.dimensions
    }

    async fn current_frame(&self) -> Result<DynamicImage> {
        self.grab().await
    }
}

/// A live camera stream, held for the rest of the process.
pub struct CameraSession {
    source: Box<dyn VideoSource>,
}

impl CameraSession {
    pub fn new(source: Box<dyn VideoSource>) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &dyn VideoSource {
        self.source.as_ref()
    }

    pub fn name(&self) -> &str {
        self.source.name()
    }
}

/// Acquire the camera, or `None` if there is none to use.
///
/// Failure is logged and swallowed: file selection keeps working without a
/// camera.
pub async fn init_camera(options: &CameraOptions) -> Option<CameraSession> {
    match open_camera(options).await {
        Ok(session) => {
            let (width, height) = session.source().dimensions();
            info!(camera = session.name(), width, height, "Camera ready");
            Some(session)
        }
        Err(e) => {
            warn!(error = %e, "Camera not available");
            None
        }
    }
}

async fn open_camera(options: &CameraOptions) -> Result<CameraSession, OcrError> {
    if !options.enabled {
        return Err(OcrError::CameraUnavailable("disabled in config".into()));
    }

    let device = match &options.device {
        Some(path) => CameraDevice {
            path: path.clone(),
            name: path.display().to_string(),
        },
        None => {
            let devices = list_devices();
            pick_preferred(&devices, options.prefer_rear)
                .cloned()
                .ok_or_else(|| OcrError::CameraUnavailable("no video device found".into()))?
        }
    };

    let camera = CommandCamera::open(device, options.grabber.clone())
        .await
        .map_err(|e| OcrError::CameraUnavailable(format!("{e:#}")))?;
    Ok(CameraSession::new(Box::new(camera)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn device(node: &str, name: &str) -> CameraDevice {
        CameraDevice {
            path: PathBuf::from("/dev").join(node),
            name: name.to_string(),
        }
    }

    #[test]
    fn prefers_rear_camera() {
        let devices = vec![
            device("video0", "Integrated Camera: Front"),
            device("video2", "Back Camera"),
        ];
        assert_eq!(pick_preferred(&devices, true).unwrap().name, "Back Camera");
        assert_eq!(
            pick_preferred(&devices, false).unwrap().name,
            "Integrated Camera: Front"
        );
    }

    #[test]
    fn falls_back_to_first_device() {
        let devices = vec![device("video0", "USB Webcam"), device("video1", "USB Webcam")];
        assert_eq!(pick_preferred(&devices, true).unwrap().path, PathBuf::from("/dev/video0"));
        assert!(pick_preferred(&[], true).is_none());
    }

    #[test]
    fn lists_sysfs_devices() {
        let root = tempfile::tempdir().unwrap();
        for (node, name) in [("video2", "Rear Camera\n"), ("video0", "Front Camera\n")] {
            let dir = root.path().join(node);
            std::fs::create_dir(&dir).unwrap();
            std::fs::write(dir.join("name"), name).unwrap();
        }
        std::fs::create_dir(root.path().join("v4l-subdev0")).unwrap();

        let devices = list_devices_in(root.path());
        assert_eq!(
            devices,
            vec![device("video0", "Front Camera"), device("video2", "Rear Camera")]
        );
    }

    #[test]
    fn missing_sysfs_root_lists_nothing() {
        let root = tempfile::tempdir().unwrap();
        assert!(list_devices_in(&root.path().join("absent")).is_empty());
    }

    #[test]
    fn ffmpeg_grabs_one_png_frame() {
        let camera = CommandCamera {
            device: device("video0", "cam"),
            grabber: "/usr/bin/ffmpeg".into(),
            dimensions: (0, 0),
        };
        let args = camera.grabber_args();
        assert!(args.windows(2).any(|w| w == ["-i", "/dev/video0"]));
        assert!(args.windows(2).any(|w| w == ["-frames:v", "1"]));
        assert_eq!(args.last().map(String::as_str), Some("-"));
    }

    #[test]
    fn other_grabbers_get_the_device_path() {
        let camera = CommandCamera {
            device: device("video1", "cam"),
            grabber: "snapframe".into(),
            dimensions: (0, 0),
        };
        assert_eq!(camera.grabber_args(), vec!["/dev/video1".to_string()]);
    }

    #[tokio::test]
    async fn disabled_camera_is_unavailable() {
        let options = CameraOptions {
            enabled: false,
            ..Default::default()
        };
        assert!(init_camera(&options).await.is_none());
    }

    #[tokio::test]
    async fn missing_grabber_is_unavailable() {
        let options = CameraOptions {
            device: Some(PathBuf::from("/dev/video-none")),
            grabber: "snaptext-no-such-grabber".into(),
            ..Default::default()
        };
        let err = open_camera(&options).await.err().unwrap();
        assert!(matches!(err, OcrError::CameraUnavailable(_)));
    }
}
