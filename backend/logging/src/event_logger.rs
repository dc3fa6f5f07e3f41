//! Session Event Logger
//!
//! One structured event per user action (file picked, photo captured,
//! upload, result, export, failure), emitted as a JSON line under the
//! `ocr_events` tracing target.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    FileSelected {
        filename: Option<String>,
        mime: String,
        bytes: usize,
    },
    Captured {
        bytes: usize,
        width: u32,
        height: u32,
    },
    /// Sent before the request goes out; `Recognized` or `Failed` follows.
    UploadStarted {
        endpoint: String,
        filename: String,
        bytes: usize,
    },
    Recognized {
        chars: usize,
    },
    Exported {
        path: String,
        bytes: usize,
    },
    Failed {
        trigger: String,
        kind: String,
        error: String,
    },
}

#[derive(Debug, Serialize)]
pub struct EventLogEntry {
    pub session_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub event: SessionEvent,
}

/// Stamps events with one session id for the lifetime of a front-end session.
#[derive(Debug, Clone)]
pub struct EventLogger {
    session_id: Uuid,
}

impl EventLogger {
    pub fn new() -> Self {
        Self::with_session_id(Uuid::new_v4())
    }

    pub fn with_session_id(session_id: Uuid) -> Self {
        Self { session_id }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Emit one event and hand back the entry that was logged.
    pub fn log_event(&self, event: SessionEvent) -> EventLogEntry {
        let entry = EventLogEntry {
            session_id: self.session_id,
            timestamp: Utc::now(),
            event,
        };

        match serde_json::to_string(&entry) {
            Ok(json) => info!(target: "ocr_events", entry = %json, "Session event"),
            Err(_) => info!(target: "ocr_events", entry = ?entry, "Session event"),
        }
        entry
    }
}

impl Default for EventLogger {
    fn default() -> Self {
        Self::new()
    }
}
