use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Action bound to a voice command, written as a `kind:argument` token
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Action {
    /// Jump to a page section, e.g. `navigate:contact`
    Navigate(String),
    ScrollTop,
    ScrollBottom,
    ToggleTheme,
    DownloadResume,
    /// List the available voice commands
    ShowHelp,
    StopListening,
}

#[derive(Debug, Error, PartialEq)]
pub enum ActionError {
    #[error("unknown action kind '{0}'")]
    UnknownKind(String),

    #[error("action '{0}' requires an argument")]
    MissingArgument(String),

    #[error("unknown argument '{argument}' for action '{kind}'")]
    UnknownArgument { kind: String, argument: String },

    #[error("failed to perform {action}: {reason}")]
    Failed { action: Action, reason: String },
}

impl FromStr for Action {
    type Err = ActionError;

    /// Parse an action token such as "navigate:projects" or "THEME:toggle"
    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let token = token.trim();
        let (kind, argument) = match token.split_once(':') {
            Some((k, a)) => (k.trim().to_lowercase(), a.trim().to_lowercase()),
            None => (token.to_lowercase(), String::new()),
        };

        match kind.as_str() {
            "navigate" | "goto" => {
                if argument.is_empty() {
                    Err(ActionError::MissingArgument(kind.clone()))
                } else {
                    Ok(Action::Navigate(argument.clone()))
                }
            }
            "scroll" => match argument.as_str() {
                "top" | "up" => Ok(Action::ScrollTop),
                "bottom" | "down" => Ok(Action::ScrollBottom),
                "" => Err(ActionError::MissingArgument(kind.clone())),
                _ => Err(unknown_argument(&kind, &argument)),
            },
            "theme" => match argument.as_str() {
                "toggle" | "" => Ok(Action::ToggleTheme),
                _ => Err(unknown_argument(&kind, &argument)),
            },
            "resume" => match argument.as_str() {
                "download" | "" => Ok(Action::DownloadResume),
                _ => Err(unknown_argument(&kind, &argument)),
            },
            "voice" => match argument.as_str() {
                "help" => Ok(Action::ShowHelp),
                "stop" => Ok(Action::StopListening),
                "" => Err(ActionError::MissingArgument(kind.clone())),
                _ => Err(unknown_argument(&kind, &argument)),
            },
            _ => Err(ActionError::UnknownKind(kind.clone())),
        }
    }
}

fn unknown_argument(kind: &str, argument: &str) -> ActionError {
    ActionError::UnknownArgument {
        kind: kind.to_string(),
        argument: argument.to_string(),
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Navigate(section) => write!(f, "navigate:{section}"),
            Action::ScrollTop => f.write_str("scroll:top"),
            Action::ScrollBottom => f.write_str("scroll:bottom"),
            Action::ToggleTheme => f.write_str("theme:toggle"),
            Action::DownloadResume => f.write_str("resume:download"),
            Action::ShowHelp => f.write_str("voice:help"),
            Action::StopListening => f.write_str("voice:stop"),
        }
    }
}

impl TryFrom<String> for Action {
    type Error = ActionError;

    fn try_from(token: String) -> Result<Self, Self::Error> {
        token.parse()
    }
}

impl From<Action> for String {
    fn from(action: Action) -> Self {
        action.to_string()
    }
}

/// Performs actions for the dispatcher. Implemented by the calling layer.
pub trait ActionHandler {
    fn perform(&mut self, action: &Action) -> Result<(), ActionError>;
}

/// Handler that only logs, used by the CLI
#[derive(Debug, Default)]
pub struct LogActionHandler {
    /// Last performed action
    pub last: Option<Action>,
    /// Number of actions performed
    pub performed: usize,
}

impl ActionHandler for LogActionHandler {
    fn perform(&mut self, action: &Action) -> Result<(), ActionError> {
        match action {
            Action::Navigate(section) => log::info!("navigating to #{section}"),
            Action::ShowHelp => log::info!("showing voice command help"),
            Action::StopListening => log::info!("voice recognition stopped"),
            other => log::info!("performing {other}"),
        }
        self.last = Some(action.clone());
        self.performed += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tokens() {
        assert_eq!(
            "navigate:contact".parse::<Action>(),
            Ok(Action::Navigate("contact".to_string()))
        );
        assert_eq!(
            " Navigate : Projects ".parse::<Action>(),
            Ok(Action::Navigate("projects".to_string()))
        );
        assert_eq!("scroll:up".parse::<Action>(), Ok(Action::ScrollTop));
        assert_eq!("scroll:bottom".parse::<Action>(), Ok(Action::ScrollBottom));
        assert_eq!("theme".parse::<Action>(), Ok(Action::ToggleTheme));
        assert_eq!("resume:download".parse::<Action>(), Ok(Action::DownloadResume));
        assert_eq!("voice:help".parse::<Action>(), Ok(Action::ShowHelp));
        assert_eq!("VOICE:STOP".parse::<Action>(), Ok(Action::StopListening));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "launch:rocket".parse::<Action>(),
            Err(ActionError::UnknownKind("launch".to_string()))
        );
        assert_eq!(
            "navigate".parse::<Action>(),
            Err(ActionError::MissingArgument("navigate".to_string()))
        );
        assert_eq!(
            "navigate:".parse::<Action>(),
            Err(ActionError::MissingArgument("navigate".to_string()))
        );
        assert_eq!(
            "scroll:sideways".parse::<Action>(),
            Err(ActionError::UnknownArgument {
                kind: "scroll".to_string(),
                argument: "sideways".to_string(),
            })
        );
    }

    #[test]
    fn test_display_parses_back() {
        let actions = [
            Action::Navigate("about".to_string()),
            Action::ScrollTop,
            Action::ScrollBottom,
            Action::ToggleTheme,
            Action::DownloadResume,
            Action::ShowHelp,
            Action::StopListening,
        ];
        for action in actions {
            assert_eq!(action.to_string().parse::<Action>(), Ok(action));
        }
    }

    #[test]
    fn test_serde_as_token() {
        let json = serde_json::to_string(&Action::Navigate("skills".to_string())).unwrap();
        assert_eq!(json, "\"navigate:skills\"");

        let action: Action = serde_json::from_str("\"theme:toggle\"").unwrap();
        assert_eq!(action, Action::ToggleTheme);

        assert!(serde_json::from_str::<Action>("\"bogus\"").is_err());
    }

    #[test]
    fn test_log_handler_records_last_action() {
        let mut handler = LogActionHandler::default();
        handler.perform(&Action::ScrollTop).unwrap();
        handler.perform(&Action::Navigate("home".to_string())).unwrap();
        assert_eq!(handler.last, Some(Action::Navigate("home".to_string())));
        assert_eq!(handler.performed, 2);
    }
}
