use crate::selection::SelectionMode;
use crate::time::{ParseTimeError, TimeValue};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const SOCKET_PATH: &str = "/tmp/timedial.sock";

/// One line of the control socket protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlCommand {
    Show,
    Hide,
    ToggleMode,
    Mode(SelectionMode),
    ToggleKeyboard,
    Set(TimeValue),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command '{0}'")]
    Unknown(String),
    #[error("'set' needs a time as HH:MM")]
    MissingTime,
    #[error(transparent)]
    Time(#[from] ParseTimeError),
}

impl fmt::Display for ControlCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Show => write!(f, "show"),
            Self::Hide => write!(f, "hide"),
            Self::ToggleMode => write!(f, "toggle-mode"),
            Self::Mode(mode) => write!(f, "{}", mode),
            Self::ToggleKeyboard => write!(f, "keyboard"),
            Self::Set(time) => write!(f, "set {}", time),
        }
    }
}

impl FromStr for ControlCommand {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let line = s.trim();
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map(|(w, r)| (w, r.trim()))
            .unwrap_or((line, ""));

        match word {
            "show" => Ok(Self::Show),
            "hide" => Ok(Self::Hide),
            "toggle-mode" => Ok(Self::ToggleMode),
            "keyboard" => Ok(Self::ToggleKeyboard),
            "set" if rest.is_empty() => Err(CommandError::MissingTime),
            "set" => Ok(Self::Set(rest.parse()?)),
            other => other
                .parse::<SelectionMode>()
                .map(Self::Mode)
                .map_err(|_| CommandError::Unknown(line.to_string())),
        }
    }
}
