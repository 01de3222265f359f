//! Lifecycle states of a form instance.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a form instance is in its submit cycle.
///
/// A rejected submission is reported to the caller as an error and the
/// form goes straight back to `Editing`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormState {
    /// Accepting input.
    #[default]
    Editing,
    /// Checking a frozen input snapshot.
    Validating,
    /// Waiting for the transport to answer.
    AwaitingTransport,
    /// The last submission was accepted by the server.
    Submitted,
    /// The instance was torn down; every later submit is cancelled.
    TornDown,
}

impl FormState {
    /// True while a submission is running.
    #[must_use]
    pub fn is_busy(self) -> bool {
        matches!(self, Self::Validating | Self::AwaitingTransport)
    }

    /// True when a new submission may start.
    #[must_use]
    pub fn accepts_submit(self) -> bool {
        matches!(self, Self::Editing | Self::Submitted)
    }
}

impl fmt::Display for FormState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Editing => "editing",
            Self::Validating => "validating",
            Self::AwaitingTransport => "awaiting_transport",
            Self::Submitted => "submitted",
            Self::TornDown => "torn_down",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_busy_states() {
        assert!(FormState::Validating.is_busy());
        assert!(FormState::AwaitingTransport.is_busy());
        assert!(!FormState::Editing.is_busy());
        assert!(!FormState::TornDown.is_busy());
    }

    #[test]
    fn test_accepts_submit() {
        assert!(FormState::Editing.accepts_submit());
        assert!(FormState::Submitted.accepts_submit());
        assert!(!FormState::AwaitingTransport.accepts_submit());
        assert!(!FormState::TornDown.accepts_submit());
    }

    #[test]
    fn test_display_matches_serde() {
        for state in [FormState::Editing, FormState::AwaitingTransport, FormState::TornDown] {
            assert_eq!(serde_json::to_value(state).unwrap(), serde_json::json!(state.to_string()));
        }
    }
}
