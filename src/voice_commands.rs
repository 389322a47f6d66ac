use crate::actions::{Action, ActionError, ActionHandler};
use crate::config::{AppConfig, VoiceCommandEntry};
use crate::matcher::best_match;
use serde::Serialize;
use thiserror::Error;

/// Scores at or below this are reported as unrecognized
pub const ACCEPT_THRESHOLD: f64 = 0.6;

#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    #[error("voice command phrase is empty")]
    EmptyPhrase,

    #[error("duplicate voice command phrase '{0}'")]
    DuplicatePhrase(String),

    #[error("invalid action for '{phrase}': {source}")]
    InvalidAction {
        phrase: String,
        #[source]
        source: ActionError,
    },
}

/// Voice command catalog: phrase → action, in declaration order
#[derive(Debug, Clone, Default)]
pub struct CommandCatalog {
    entries: Vec<(String, Action)>,
}

impl CommandCatalog {
    /// Build from `(phrase, action)` pairs. Phrases are normalized; empty and
    /// duplicate phrases are rejected.
    pub fn new(entries: Vec<(String, Action)>) -> Result<Self, CatalogError> {
        let mut normalized: Vec<(String, Action)> = Vec::with_capacity(entries.len());
        for (phrase, action) in entries {
            let phrase = normalize_utterance(&phrase, true);
            if phrase.is_empty() {
                return Err(CatalogError::EmptyPhrase);
            }
            if normalized.iter().any(|(p, _)| *p == phrase) {
                return Err(CatalogError::DuplicatePhrase(phrase));
            }
            normalized.push((phrase, action));
        }
        Ok(Self {
            entries: normalized,
        })
    }

    /// Build from configuration entries, parsing each action token
    pub fn from_entries(entries: &[VoiceCommandEntry]) -> Result<Self, CatalogError> {
        let pairs = entries
            .iter()
            .map(|entry| {
                entry
                    .action
                    .parse::<Action>()
                    .map(|action| (entry.phrase.clone(), action))
                    .map_err(|source| CatalogError::InvalidAction {
                        phrase: entry.phrase.clone(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(pairs)
    }

    pub fn phrases(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(p, _)| p.as_str())
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &Action)> {
        self.entries.iter().map(|(p, a)| (p.as_str(), a))
    }

    pub fn action_for(&self, phrase: &str) -> Option<&Action> {
        self.entries
            .iter()
            .find(|(p, _)| p == phrase)
            .map(|(_, a)| a)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Trim and lower-case a transcript, optionally collapsing inner whitespace
pub fn normalize_utterance(raw: &str, collapse_whitespace: bool) -> String {
    let lowered = raw.trim().to_lowercase();
    if collapse_whitespace {
        lowered.split_whitespace().collect::<Vec<_>>().join(" ")
    } else {
        lowered
    }
}

/// Result of handling one utterance
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DispatchOutcome {
    /// Matched a catalog phrase above the threshold
    Command {
        utterance: String,
        phrase: String,
        action: Action,
        score: f64,
    },
    /// Nothing scored above the threshold
    Unrecognized {
        utterance: String,
        best: Option<String>,
        score: f64,
    },
}

impl DispatchOutcome {
    pub fn is_command(&self) -> bool {
        matches!(self, DispatchOutcome::Command { .. })
    }

    pub fn action(&self) -> Option<&Action> {
        match self {
            DispatchOutcome::Command { action, .. } => Some(action),
            DispatchOutcome::Unrecognized { .. } => None,
        }
    }

    pub fn score(&self) -> f64 {
        match self {
            DispatchOutcome::Command { score, .. } | DispatchOutcome::Unrecognized { score, .. } => {
                *score
            }
        }
    }

    /// Line shown to the user
    pub fn message(&self) -> String {
        match self {
            DispatchOutcome::Command {
                phrase, action, ..
            } => format!("[command] {phrase} → {action}"),
            DispatchOutcome::Unrecognized { utterance, .. } => {
                format!("Command not recognized: \"{utterance}\"")
            }
        }
    }
}

/// Maps utterances onto the catalog and hands matched actions to a handler
#[derive(Debug, Clone)]
pub struct VoiceCommandDispatcher {
    catalog: CommandCatalog,
    threshold: f64,
    collapse_whitespace: bool,
}

impl VoiceCommandDispatcher {
    pub fn new(catalog: CommandCatalog) -> Self {
        Self {
            catalog,
            threshold: ACCEPT_THRESHOLD,
            collapse_whitespace: true,
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, CatalogError> {
        let catalog = CommandCatalog::from_entries(&config.voice_commands)?;
        Ok(Self::new(catalog)
            .with_threshold(config.voice.threshold)
            .with_collapse_whitespace(config.voice.collapse_whitespace))
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_collapse_whitespace(mut self, collapse: bool) -> Self {
        self.collapse_whitespace = collapse;
        self
    }

    pub fn catalog(&self) -> &CommandCatalog {
        &self.catalog
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Match an utterance without performing anything
    pub fn recognize(&self, raw: &str) -> DispatchOutcome {
        let utterance = normalize_utterance(raw, self.collapse_whitespace);
        if utterance.is_empty() {
            return DispatchOutcome::Unrecognized {
                utterance,
                best: None,
                score: 0.0,
            };
        }

        let result = best_match(&utterance, self.catalog.phrases());
        log::debug!(
            "best match for \"{}\": {:?} ({:.3})",
            utterance,
            result.phrase,
            result.score
        );

        let action = result
            .phrase
            .filter(|_| result.accepted(self.threshold))
            .and_then(|phrase| self.catalog.action_for(phrase).map(|a| (phrase, a)));

        match action {
            Some((phrase, action)) => {
                log::info!("voice command: {} → {} ({:.2})", utterance, action, result.score);
                DispatchOutcome::Command {
                    utterance,
                    phrase: phrase.to_string(),
                    action: action.clone(),
                    score: result.score,
                }
            }
            None => {
                log::warn!("unrecognized voice command: \"{}\"", utterance);
                DispatchOutcome::Unrecognized {
                    utterance,
                    best: result.phrase.map(str::to_string),
                    score: result.score,
                }
            }
        }
    }

    /// Recognize an utterance and perform the matched action
    pub fn dispatch<H: ActionHandler + ?Sized>(
        &self,
        raw: &str,
        handler: &mut H,
    ) -> Result<DispatchOutcome, ActionError> {
        let outcome = self.recognize(raw);
        if let Some(action) = outcome.action() {
            handler.perform(action)?;
        }
        Ok(outcome)
    }
}
