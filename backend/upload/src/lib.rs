//! Upload client for the remote OCR service.
//!
//! One multipart POST per upload, field `file`, JSON `{"text": ...}` back.

pub mod client;

pub use client::{resolve_endpoint, BackendStatus, UploadClient, FILE_FIELD, OCR_PATH};
