use tracing::debug;

use crate::export::{export_as_file, TextArtifact};

/// The editable result buffer shown to the user.
#[derive(Debug, Default)]
pub struct ResultSink {
    buffer: String,
}

impl ResultSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show freshly recognized text, replacing whatever was there.
    pub fn render(&mut self, text: &str) {
        debug!(chars = text.chars().count(), "Rendering OCR text");
        self.buffer.clear();
        self.buffer.push_str(text);
    }

    /// Replace the buffer with user-edited text.
    pub fn edit(&mut self, text: impl Into<String>) {
        self.buffer = text.into();
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Package the current buffer, edits included, for download.
    pub fn export(&self) -> TextArtifact {
        export_as_file(&self.buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_replaces_previous_text() {
        let mut sink = ResultSink::new();
        sink.render("first result");
        sink.render("hello");
        assert_eq!(sink.text(), "hello");
    }

    #[test]
    fn export_includes_edits() {
        let mut sink = ResultSink::new();
        sink.render("helo");
        sink.edit("hello");
        assert_eq!(sink.export().data().as_ref(), b"hello");
    }
}
