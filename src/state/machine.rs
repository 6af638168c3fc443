use super::error::{StateError, StateResult};
use super::event::{EventKind, StateTransition, SubmissionEvent};
use super::model::{SubmissionPhase, SubmissionState};

#[derive(Debug)]
pub struct SubmissionMachine {
    state: SubmissionState,
    transition_history: Vec<StateTransition>,
}

impl SubmissionMachine {
    pub fn new() -> Self {
        Self {
            state: SubmissionState::default(),
            transition_history: Vec::new(),
        }
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.state.phase()
    }

    pub fn can_transition(&self, event: EventKind) -> bool {
        self.next_phase(event).is_some()
    }

    /// Transition table. `Submit` while `Loading` is the one rejected
    /// user-reachable combination; it enforces at most one in-flight
    /// submission.
    fn next_phase(&self, event: EventKind) -> Option<SubmissionPhase> {
        use EventKind::*;
        match (self.state.phase(), event) {
            (_, Reset) => Some(SubmissionPhase::Idle),
            (_, NewSelection) => Some(SubmissionPhase::Idle),
            (SubmissionPhase::Loading, Submit) => None,
            (_, Submit) => Some(SubmissionPhase::Loading),
            (SubmissionPhase::Loading, Complete) => Some(SubmissionPhase::Success),
            (_, Fail) => Some(SubmissionPhase::Error),
            _ => None,
        }
    }

    pub fn transition(&mut self, event: SubmissionEvent) -> StateResult<&SubmissionState> {
        let from = self.state.phase();
        let kind = event.kind();
        tracing::debug!(from = ?from, event = ?kind, "request state transition");
        if self.next_phase(kind).is_none() {
            tracing::warn!(from = ?from, event = ?kind, "invalid state transition requested");
            return Err(StateError::InvalidStateTransition { from, event: kind });
        }

        let next = match event {
            SubmissionEvent::NewSelection | SubmissionEvent::Reset => SubmissionState::Idle,
            SubmissionEvent::Submit => SubmissionState::Loading,
            SubmissionEvent::Complete(result) => SubmissionState::Success(result),
            SubmissionEvent::Fail(message) => SubmissionState::Error(message),
        };

        let record = StateTransition::new(from, kind, next.phase());
        self.state = next;
        self.transition_history.push(record);

        Ok(&self.state)
    }
}

#[cfg(test)]
impl SubmissionMachine {
    fn history(&self) -> &[StateTransition] {
        &self.transition_history
    }
}

impl Default for SubmissionMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SubmissionMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SubmissionState::{:?}", self.state.phase())
    }
}
