//! Structured logging for snaptext.
//!
//! Console plus optional rolling NDJSON file output, and typed session
//! events for every user action.

pub mod event_logger;
pub mod logger;

pub use event_logger::{EventLogEntry, EventLogger, SessionEvent};
pub use logger::init_logger;
