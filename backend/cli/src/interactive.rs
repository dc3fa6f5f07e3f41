//! Interactive session: a line-oriented stand-in for the browser page.
//!
//! Each line is one user action. Trigger failures are printed and the loop
//! keeps going.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use snaptext_core::Trigger;
use snaptext_session::{OcrSession, Outcome};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::terminal_output::{
    format_bytes, note_info, note_success, note_warn, print_text, report_error, report_outcome,
};

const HELP: &str = "\
Commands:
  file <path>        select an image file (takes precedence over captures)
  clear              drop the file selection
  capture | snap     grab a photo from the camera
  upload  | ocr      send the selected file or last photo for OCR
  download | save    save the result text as ocr_result.txt
  show               print the result text
  edit [text]        replace the result text; without text, read lines until '.'
  help               show this list
  quit | exit        leave";

/// One parsed input line.
#[derive(Debug, PartialEq)]
pub enum Command {
    Select(PathBuf),
    Clear,
    Fire(Trigger),
    Show,
    Edit(Option<String>),
    Help,
    Quit,
    Empty,
}

pub fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word.to_ascii_lowercase().as_str() {
        "" => Ok(Command::Empty),
        "file" | "select" if rest.is_empty() => Err("usage: file <path>".into()),
        "file" | "select" => Ok(Command::Select(PathBuf::from(rest))),
        "clear" => Ok(Command::Clear),
        "show" | "text" => Ok(Command::Show),
        "edit" if rest.is_empty() => Ok(Command::Edit(None)),
        "edit" => Ok(Command::Edit(Some(rest.to_string()))),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        other => other
            .parse::<Trigger>()
            .map(Command::Fire)
            .map_err(|_| format!("unknown command '{other}' (try 'help')")),
    }
}

pub async fn run(mut session: OcrSession) -> Result<()> {
    note_info(&format!("OCR endpoint: {}", session.endpoint()));
    if !session.has_camera() {
        note_warn("No camera available; use 'file <path>' to pick an image.");
    }
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt();
        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(msg) => {
                note_warn(&msg);
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Empty => {}
            Command::Help => println!("{HELP}"),
            Command::Select(path) => match session.select_file(&path).await {
                Ok(blob) => note_success(&format!(
                    "Selected {} ({}, {})",
                    blob.filename().unwrap_or("file"),
                    blob.mime_type(),
                    format_bytes(blob.len())
                )),
                Err(e) => report_error(&e),
            },
            Command::Clear => {
                session.clear_selection();
                note_info("Selection cleared");
            }
            Command::Fire(trigger) => match session.dispatch(trigger).await {
                Ok(outcome) => {
                    report_outcome(&outcome);
                    if let Outcome::Recognized(result) = &outcome {
                        print_text(&result.text);
                    }
                }
                Err(e) => report_error(&e),
            },
            Command::Show => {
                if session.text().is_empty() {
                    note_info("No text yet");
                } else {
                    print_text(session.text());
                }
            }
            Command::Edit(Some(text)) => {
                session.edit(text);
                note_success("Text replaced");
            }
            Command::Edit(None) => {
                note_info("Enter the new text; finish with a line containing only '.'");
                let mut buffer = Vec::new();
                while let Some(line) = lines.next_line().await? {
                    if line == "." {
                        break;
                    }
                    buffer.push(line);
                }
                session.edit(buffer.join("\n"));
                note_success("Text replaced");
            }
        }
    }
    Ok(())
}

fn prompt() {
    let mut stderr = std::io::stderr();
    let _ = write!(stderr, "snaptext> ");
    let _ = stderr.flush();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_selection_with_spaces() {
        assert_eq!(
            parse_command("file  scans/my page.png ").unwrap(),
            Command::Select(PathBuf::from("scans/my page.png"))
        );
        assert!(parse_command("file").is_err());
    }

    #[test]
    fn triggers_accept_aliases() {
        assert_eq!(parse_command("snap").unwrap(), Command::Fire(Trigger::Capture));
        assert_eq!(parse_command("OCR").unwrap(), Command::Fire(Trigger::Upload));
        assert_eq!(parse_command("download").unwrap(), Command::Fire(Trigger::Download));
    }

    #[test]
    fn edit_inline_or_multiline() {
        assert_eq!(parse_command("edit").unwrap(), Command::Edit(None));
        assert_eq!(
            parse_command("edit fixed text").unwrap(),
            Command::Edit(Some("fixed text".into()))
        );
    }

    #[test]
    fn blank_and_unknown_lines() {
        assert_eq!(parse_command("   ").unwrap(), Command::Empty);
        assert_eq!(parse_command("exit").unwrap(), Command::Quit);
        assert!(parse_command("dance").unwrap_err().contains("dance"));
    }
}
