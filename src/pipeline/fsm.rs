use crate::{Error, Result};
use tracing::{debug, info, warn};

// Analyze pipeline states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyzeState {
    Idle,
    ParsingForm,
    Validating,
    Normalizing,
    Composing,
    Generating,
    ParsingResult,
    Responding,
    Failed,
}

// Analyze pipeline events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyzeEvent {
    RequestReceived,
    FormParsed,
    FieldsValidated,
    ImageNormalized,
    PromptComposed,
    TextGenerated,
    ResultParsed,
    ErrorOccurred,
}

/// Tracks one request through the analyze pipeline.
pub struct AnalyzeStateMachine {
    state: AnalyzeState,
    last_error: Option<String>,
}

impl AnalyzeStateMachine {
    pub fn new() -> Self {
        Self {
            state: AnalyzeState::Idle,
            last_error: None,
        }
    }

    pub fn current_state(&self) -> AnalyzeState {
        self.state
    }

    pub fn transition(&mut self, event: AnalyzeEvent) -> Result<()> {
        let old_state = self.state;
        debug!("🔄 FSM processing event {:?} in state {:?}", event, old_state);

        let new_state = match (old_state, event) {
            (AnalyzeState::Idle, AnalyzeEvent::RequestReceived) => AnalyzeState::ParsingForm,
            (AnalyzeState::ParsingForm, AnalyzeEvent::FormParsed) => AnalyzeState::Validating,
            (AnalyzeState::Validating, AnalyzeEvent::FieldsValidated) => AnalyzeState::Normalizing,
            (AnalyzeState::Normalizing, AnalyzeEvent::ImageNormalized) => AnalyzeState::Composing,
            (AnalyzeState::Composing, AnalyzeEvent::PromptComposed) => AnalyzeState::Generating,
            (AnalyzeState::Generating, AnalyzeEvent::TextGenerated) => AnalyzeState::ParsingResult,
            (AnalyzeState::ParsingResult, AnalyzeEvent::ResultParsed) => AnalyzeState::Responding,
            (state, AnalyzeEvent::ErrorOccurred) if !Self::is_terminal_state(state) => {
                AnalyzeState::Failed
            }
            _ => {
                warn!(
                    "❌ Invalid FSM transition from {:?} with event {:?}",
                    old_state, event
                );
                return Err(Error::InvalidTransition {
                    current: format!("{:?}", old_state),
                    requested: format!("{:?}", event),
                });
            }
        };

        debug!(
            "🎯 FSM state transition: {:?} -> {:?} (event: {:?})",
            old_state, new_state, event
        );

        self.state = new_state;
        Ok(())
    }

    /// Moves to `Failed` and remembers why.
    pub fn fail(&mut self, error: &Error) {
        let failed_in = self.state;
        self.last_error = Some(error.to_string());
        if self.transition(AnalyzeEvent::ErrorOccurred).is_ok() {
            info!("Analyze pipeline failed in state {:?}: {}", failed_in, error);
        }
    }

    pub fn is_terminal(&self) -> bool {
        Self::is_terminal_state(self.state)
    }

    pub fn get_last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    fn is_terminal_state(state: AnalyzeState) -> bool {
        matches!(state, AnalyzeState::Responding | AnalyzeState::Failed)
    }
}

impl Default for AnalyzeStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const HAPPY_PATH: [(AnalyzeEvent, AnalyzeState); 7] = [
        (AnalyzeEvent::RequestReceived, AnalyzeState::ParsingForm),
        (AnalyzeEvent::FormParsed, AnalyzeState::Validating),
        (AnalyzeEvent::FieldsValidated, AnalyzeState::Normalizing),
        (AnalyzeEvent::ImageNormalized, AnalyzeState::Composing),
        (AnalyzeEvent::PromptComposed, AnalyzeState::Generating),
        (AnalyzeEvent::TextGenerated, AnalyzeState::ParsingResult),
        (AnalyzeEvent::ResultParsed, AnalyzeState::Responding),
    ];

    #[test]
    fn test_fsm_initial_state() {
        let fsm = AnalyzeStateMachine::new();
        assert_eq!(fsm.current_state(), AnalyzeState::Idle);
        assert!(!fsm.is_terminal());
        assert!(fsm.get_last_error().is_none());
    }

    #[test]
    fn test_happy_path() {
        let mut fsm = AnalyzeStateMachine::new();
        for (event, expected) in HAPPY_PATH {
            fsm.transition(event).unwrap();
            assert_eq!(fsm.current_state(), expected);
        }
        assert!(fsm.is_terminal());
    }

    #[test]
    fn test_failure_reachable_from_every_non_terminal_state() {
        for steps in 0..HAPPY_PATH.len() {
            let mut fsm = AnalyzeStateMachine::new();
            for (event, _) in &HAPPY_PATH[..steps] {
                fsm.transition(*event).unwrap();
            }

            fsm.fail(&Error::generation("boom"));

            assert_eq!(fsm.current_state(), AnalyzeState::Failed);
            assert!(fsm.get_last_error().unwrap().contains("boom"));
        }
    }

    #[test]
    fn test_terminal_states_reject_events() {
        let mut fsm = AnalyzeStateMachine::new();
        fsm.fail(&Error::validation("Missing required fields"));

        assert!(fsm.transition(AnalyzeEvent::ErrorOccurred).is_err());
        assert!(fsm.transition(AnalyzeEvent::RequestReceived).is_err());
        assert_eq!(fsm.current_state(), AnalyzeState::Failed);
    }

    #[test]
    fn test_skipping_a_stage_is_invalid() {
        let mut fsm = AnalyzeStateMachine::new();
        fsm.transition(AnalyzeEvent::RequestReceived).unwrap();

        let result = fsm.transition(AnalyzeEvent::PromptComposed);

        let err = result.unwrap_err();
        assert!(matches!(err, Error::InvalidTransition { .. }));
        assert_eq!(err.status_code(), axum::http::StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.client_message(), "Internal Server Error");
        assert_eq!(fsm.current_state(), AnalyzeState::ParsingForm);
    }
}
