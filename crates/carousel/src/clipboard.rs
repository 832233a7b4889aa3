use std::io::Write;
use std::process::{Command, ExitStatus, Stdio};
use strum::Display as StrumDisplay;
use thiserror::Error;

pub const DEFAULT_FALLBACK_COMMAND: &str = "wl-copy";

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("Clipboard is not available")]
    Unavailable,
    #[error("Clipboard command is empty")]
    EmptyCommand,
    #[error("Invalid clipboard command: {0}")]
    Parse(#[from] shell_words::ParseError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("Clipboard command exited with {0}")]
    Status(ExitStatus),
}

pub trait ClipboardSink {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, StrumDisplay)]
pub enum CopyStatus {
    #[strum(serialize = "Copied")]
    Copied,
    #[strum(serialize = "Copy failed")]
    Failed,
}

impl CopyStatus {
    pub fn is_copied(&self) -> bool {
        matches!(self, Self::Copied)
    }
}

/// Pipes the text into an external program such as `wl-copy` or `xclip -selection clipboard`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandClipboard {
    program: String,
    args: Vec<String>,
}

impl CommandClipboard {
    pub fn parse(command: &str) -> Result<Self, ClipboardError> {
        let mut words = shell_words::split(command)?.into_iter();
        let program = words.next().ok_or(ClipboardError::EmptyCommand)?;
        Ok(Self {
            program,
            args: words.collect(),
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Default for CommandClipboard {
    fn default() -> Self {
        Self {
            program: DEFAULT_FALLBACK_COMMAND.to_string(),
            args: Vec::new(),
        }
    }
}

impl ClipboardSink for CommandClipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(text.as_bytes())?;
        }

        let status = child.wait()?;
        if status.success() {
            Ok(())
        } else {
            Err(ClipboardError::Status(status))
        }
    }
}

/// Tries `primary`, then `fallback`. Failures are logged and reported, never retried.
pub fn copy_with_fallback(
    primary: &dyn ClipboardSink,
    fallback: &dyn ClipboardSink,
    text: &str,
) -> CopyStatus {
    match primary.write_text(text) {
        Ok(()) => CopyStatus::Copied,
        Err(e) => {
            log::warn!("Clipboard write failed, trying fallback: {}", e);
            match fallback.write_text(text) {
                Ok(()) => CopyStatus::Copied,
                Err(e) => {
                    log::warn!("Fallback clipboard write failed: {}", e);
                    CopyStatus::Failed
                }
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Records every write; fails all of them when `reject` is set.
    #[derive(Default)]
    pub(crate) struct FakeClipboard {
        pub reject: bool,
        pub writes: RefCell<Vec<String>>,
    }

    impl FakeClipboard {
        pub fn rejecting() -> Self {
            Self {
                reject: true,
                ..Self::default()
            }
        }
    }

    impl ClipboardSink for FakeClipboard {
        fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
            self.writes.borrow_mut().push(text.to_string());
            if self.reject {
                Err(ClipboardError::Unavailable)
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn test_primary_success_skips_fallback() {
        let primary = FakeClipboard::default();
        let fallback = FakeClipboard::default();

        let status = copy_with_fallback(&primary, &fallback, "https://a.example");

        assert_eq!(status, CopyStatus::Copied);
        assert_eq!(*primary.writes.borrow(), vec!["https://a.example"]);
        assert!(fallback.writes.borrow().is_empty());
    }

    #[test]
    fn test_rejected_primary_uses_fallback() {
        let primary = FakeClipboard::rejecting();
        let fallback = FakeClipboard::default();

        let status = copy_with_fallback(&primary, &fallback, "https://a.example");

        assert_eq!(status, CopyStatus::Copied);
        assert_eq!(fallback.writes.borrow().len(), 1);
    }

    #[test]
    fn test_both_rejected_reports_failure_once() {
        let primary = FakeClipboard::rejecting();
        let fallback = FakeClipboard::rejecting();

        let status = copy_with_fallback(&primary, &fallback, "https://a.example");

        assert_eq!(status, CopyStatus::Failed);
        assert_eq!(status.to_string(), "Copy failed");
        assert_eq!(primary.writes.borrow().len(), 1);
        assert_eq!(fallback.writes.borrow().len(), 1);
    }

    #[test]
    fn test_parse_command() {
        let clipboard = CommandClipboard::parse("xclip -selection clipboard").unwrap();
        assert_eq!(clipboard.program(), "xclip");
        assert_eq!(clipboard.args, vec!["-selection", "clipboard"]);

        assert!(matches!(
            CommandClipboard::parse("   "),
            Err(ClipboardError::EmptyCommand)
        ));
        assert!(matches!(
            CommandClipboard::parse("xclip 'unterminated"),
            Err(ClipboardError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_program_is_an_error() {
        let clipboard = CommandClipboard::parse("showcase-no-such-clipboard-tool").unwrap();
        assert!(matches!(
            clipboard.write_text("x"),
            Err(ClipboardError::Io(_))
        ));
    }
}
