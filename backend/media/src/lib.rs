//! Capture source for snaptext.
//!
//! Resolves the image to send: a file picked by the user or a frame grabbed
//! from a live camera and encoded as JPEG.

pub mod camera;
pub mod capture;
pub mod mime_detect;
pub mod raster;
pub mod selection;

pub use camera::{
    init_camera, list_devices, pick_preferred, CameraDevice, CameraOptions, CameraSession,
    CommandCamera,
};
pub use capture::{capture_from_camera, resolve_pending_image, Capture, CaptureSettings, CaptureState};
pub use mime_detect::{detect_mime_type, is_recognizable};
pub use selection::load_selection;
