use crate::item::ItemUrl;
use std::process::{Command, Stdio};
use thiserror::Error;

pub const DEFAULT_OPEN_COMMAND: &str = "xdg-open";

#[derive(Debug, Error)]
pub enum OpenError {
    #[error("Refusing to open an empty url")]
    EmptyUrl,
    #[error("Open command is empty")]
    EmptyCommand,
    #[error("Invalid open command: {0}")]
    Parse(#[from] shell_words::ParseError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub trait UrlOpener {
    fn open(&self, url: &ItemUrl) -> Result<(), OpenError>;
}

/// Hands the url to an external program, detached from our stdio.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOpener {
    program: String,
    args: Vec<String>,
}

impl CommandOpener {
    pub fn parse(command: &str) -> Result<Self, OpenError> {
        let mut words = shell_words::split(command)?.into_iter();
        let program = words.next().ok_or(OpenError::EmptyCommand)?;
        Ok(Self {
            program,
            args: words.collect(),
        })
    }

    pub fn command_line(&self, url: &ItemUrl) -> Vec<String> {
        std::iter::once(self.program.clone())
            .chain(self.args.iter().cloned())
            .chain(std::iter::once(url.to_string()))
            .collect()
    }
}

impl Default for CommandOpener {
    fn default() -> Self {
        Self {
            program: DEFAULT_OPEN_COMMAND.to_string(),
            args: Vec::new(),
        }
    }
}

impl UrlOpener for CommandOpener {
    fn open(&self, url: &ItemUrl) -> Result<(), OpenError> {
        if url.trim().is_empty() {
            return Err(OpenError::EmptyUrl);
        }

        Command::new(&self.program)
            .args(&self.args)
            .arg(url.as_str())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_line() {
        let opener = CommandOpener::parse("firefox --new-tab").unwrap();
        let url = ItemUrl::new("https://github.com/AII-projects/slackbot");
        assert_eq!(
            opener.command_line(&url),
            vec![
                "firefox",
                "--new-tab",
                "https://github.com/AII-projects/slackbot"
            ]
        );

        let default = CommandOpener::default();
        assert_eq!(default.command_line(&url)[0], "xdg-open");
    }

    #[test]
    fn test_rejects_empty_input() {
        assert!(matches!(
            CommandOpener::parse(""),
            Err(OpenError::EmptyCommand)
        ));
        assert!(matches!(
            CommandOpener::default().open(&ItemUrl::new(" ")),
            Err(OpenError::EmptyUrl)
        ));
    }
}
