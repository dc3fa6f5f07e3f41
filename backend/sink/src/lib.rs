//! Where recognized text ends up: an editable display buffer and a
//! downloadable `ocr_result.txt`.

pub mod buffer;
pub mod export;

pub use buffer::ResultSink;
pub use export::{export_as_file, TextArtifact, RESULT_FILENAME, TEXT_MIME};
