//! Terminal output: ANSI notes on stderr/stdout and outcome formatting.
//!
//! OCR text itself always goes to stdout unadorned so it can be piped.

use snaptext_core::OcrError;
use snaptext_session::Outcome;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

/// Severity of a status line. Every note goes to stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Note {
    Info,
    Warn,
    Error,
    Success,
}

impl Note {
    fn color(self) -> &'static str {
        match self {
            Self::Info => "\x1b[36m",
            Self::Warn => "\x1b[33m",
            Self::Error => "\x1b[31m",
            Self::Success => "\x1b[32m",
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            Self::Info => "ℹ",
            Self::Warn => "⚠",
            Self::Error => "✗",
            Self::Success => "✓",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
            Self::Success => "OK",
        }
    }
}

/// NO_COLOR wins; otherwise color unless the terminal is dumb.
fn supports_color() -> bool {
    std::env::var("NO_COLOR").is_err()
        && (std::env::var("COLORTERM").is_ok()
            || std::env::var("TERM")
                .map(|t| t != "dumb")
                .unwrap_or(false))
}

fn format_note(note: Note, msg: &str, color: bool) -> String {
    if color {
        format!("{}{BOLD}{}{RESET} {msg}", note.color(), note.symbol())
    } else {
        format!("{}: {msg}", note.label())
    }
}

fn emit(note: Note, msg: &str) {
    eprintln!("{}", format_note(note, msg, supports_color()));
}

pub fn note_info(msg: &str) {
    emit(Note::Info, msg);
}

pub fn note_warn(msg: &str) {
    emit(Note::Warn, msg);
}

pub fn note_error(msg: &str) {
    emit(Note::Error, msg);
}

pub fn note_success(msg: &str) {
    emit(Note::Success, msg);
}

/// Human-readable byte count.
pub fn format_bytes(bytes: usize) -> String {
    const KIB: f64 = 1024.0;
    let b = bytes as f64;
    if b < KIB {
        format!("{bytes} B")
    } else if b < KIB * KIB {
        format!("{:.1} KiB", b / KIB)
    } else {
        format!("{:.1} MiB", b / (KIB * KIB))
    }
}

/// One-line summary of what a trigger did.
pub fn describe_outcome(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Captured {
            bytes,
            width,
            height,
        } => format!("Captured {width}x{height} photo ({})", format_bytes(*bytes)),
        Outcome::Recognized(result) => {
            let chars = result.text.chars().count();
            match &result.filename {
                Some(name) => format!("Recognized {chars} characters from {name}"),
                None => format!("Recognized {chars} characters"),
            }
        }
        Outcome::Exported { path, bytes } => {
            format!("Saved {} to {}", format_bytes(*bytes), path.display())
        }
    }
}

/// Print a trigger's outcome as a success note.
pub fn report_outcome(outcome: &Outcome) {
    note_success(&describe_outcome(outcome));
}

/// Print a trigger failure. Missing input gets a hint instead of a bare error.
pub fn report_error(err: &OcrError) {
    match err {
        OcrError::NoImageSelected => {
            note_warn("Please select or capture an image first.");
        }
        OcrError::CameraUnavailable(_) => {
            note_warn(&format!("{err}. Pick a file instead."));
        }
        _ => note_error(&err.to_string()),
    }
}

/// Print OCR text to stdout between dim rules.
pub fn print_text(text: &str) {
    if supports_color() {
        println!("{DIM}----{RESET}");
        println!("{text}");
        println!("{DIM}----{RESET}");
    } else {
        println!("{text}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snaptext_core::OcrResult;
    use std::path::PathBuf;

    #[test]
    fn plain_notes_carry_a_label() {
        assert_eq!(format_note(Note::Warn, "no camera", false), "WARN: no camera");
        assert_eq!(format_note(Note::Success, "saved", false), "OK: saved");
        let colored = format_note(Note::Error, "boom", true);
        assert!(colored.starts_with("\x1b[31m"));
        assert!(colored.ends_with("✗\x1b[0m boom"));
    }

    #[test]
    fn formats_byte_counts() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.0 KiB");
        assert_eq!(format_bytes(3 * 1024 * 1024), "3.0 MiB");
    }

    #[test]
    fn describes_each_outcome() {
        let captured = Outcome::Captured {
            bytes: 100,
            width: 640,
            height: 480,
        };
        assert_eq!(describe_outcome(&captured), "Captured 640x480 photo (100 B)");

        let mut result = OcrResult::new("héllo");
        result.filename = Some("page.png".into());
        assert_eq!(
            describe_outcome(&Outcome::Recognized(result)),
            "Recognized 5 characters from page.png"
        );

        let exported = Outcome::Exported {
            path: PathBuf::from("/tmp/ocr_result.txt"),
            bytes: 5,
        };
        assert!(describe_outcome(&exported).ends_with("/tmp/ocr_result.txt"));
    }
}
