//! Front-end session for snaptext: holds the user's selection, the pending
//! capture and the result buffer, and runs the capture/upload/download
//! triggers against them.

pub mod session;

pub use session::{OcrSession, Outcome};
