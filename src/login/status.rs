//! User-visible status of a login submission.
//!
//! `Idle -> Submitting -> {Success, Failure}`; every submission starts again at
//! `Submitting`.

use clap::builder::styling::{AnsiColor, Effects, Style};
use std::io::{self, IsTerminal, Write};

pub const SUBMITTING_MESSAGE: &str = "Sending login...";
pub const FAILURE_MESSAGE: &str = "Error while logging in.";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Status {
    #[default]
    Idle,
    Submitting,
    /// Pretty-printed JSON body returned by the identity API.
    Success(String),
    Failure,
}

/// Presentation class of a status.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Neutral,
    Pending,
    Success,
    Failure,
}

impl Status {
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Status::Idle => "",
            Status::Submitting => SUBMITTING_MESSAGE,
            Status::Success(body) => body,
            Status::Failure => FAILURE_MESSAGE,
        }
    }

    #[must_use]
    pub fn tone(&self) -> Tone {
        match self {
            Status::Idle => Tone::Neutral,
            Status::Submitting => Tone::Pending,
            Status::Success(_) => Tone::Success,
            Status::Failure => Tone::Failure,
        }
    }
}

/// Receives every status transition of a submission.
pub trait StatusSink {
    fn show(&self, status: &Status);
}

/// Renders statuses on the terminal: the response body on stdout, progress and
/// failures on stderr. Colors only when the stream is a terminal.
#[derive(Clone, Copy, Debug, Default)]
pub struct TerminalStatus;

impl TerminalStatus {
    fn style(tone: Tone) -> Style {
        match tone {
            Tone::Neutral => Style::new(),
            Tone::Pending => AnsiColor::Yellow.on_default(),
            Tone::Success => AnsiColor::Green.on_default(),
            Tone::Failure => AnsiColor::Red.on_default() | Effects::BOLD,
        }
    }

    fn write(mut out: impl Write, colored: bool, status: &Status) -> io::Result<()> {
        if colored {
            let style = Self::style(status.tone());
            writeln!(
                out,
                "{}{}{}",
                style.render(),
                status.message(),
                style.render_reset()
            )
        } else {
            writeln!(out, "{}", status.message())
        }
    }
}

impl StatusSink for TerminalStatus {
    fn show(&self, status: &Status) {
        let result = match status {
            Status::Idle => Ok(()),
            Status::Success(_) => {
                let stdout = io::stdout();
                let colored = stdout.is_terminal();
                Self::write(stdout.lock(), colored, status)
            }
            Status::Submitting | Status::Failure => {
                let stderr = io::stderr();
                let colored = stderr.is_terminal();
                Self::write(stderr.lock(), colored, status)
            }
        };

        if let Err(err) = result {
            tracing::warn!("failed to render status: {}", err);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_state() {
        assert_eq!(Status::Idle.message(), "");
        assert_eq!(Status::Submitting.message(), "Sending login...");
        assert_eq!(Status::Failure.message(), "Error while logging in.");
        assert_eq!(
            Status::Success("{\n  \"token\": \"abc\"\n}".to_string()).message(),
            "{\n  \"token\": \"abc\"\n}"
        );
    }

    #[test]
    fn plain_output_has_no_escape_codes() {
        let mut out = Vec::new();
        TerminalStatus::write(&mut out, false, &Status::Failure).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Error while logging in.\n");
    }

    #[test]
    fn colored_output_wraps_message() {
        let mut out = Vec::new();
        TerminalStatus::write(&mut out, true, &Status::Submitting).unwrap();
        let rendered = String::from_utf8_lossy(&out);
        assert!(rendered.starts_with("\u{1b}["));
        assert!(rendered.contains("Sending login..."));
        assert_ne!(TerminalStatus::style(Tone::Success), TerminalStatus::style(Tone::Failure));
    }
}
