use super::model::SubmissionPhase;
use crate::client::ExtractionResult;

/// Inputs that drive the submission lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionEvent {
    /// A new image was accepted from the picker or a drop gesture.
    NewSelection,
    /// The user triggered a submission with an image acquired.
    Submit,
    /// The extraction round trip finished with a parsed result.
    Complete(ExtractionResult),
    /// Submission failed, locally or remotely, with a user-visible message.
    Fail(String),
    /// Unconditional return to the initial state.
    Reset,
}

impl SubmissionEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::NewSelection => EventKind::NewSelection,
            Self::Submit => EventKind::Submit,
            Self::Complete(_) => EventKind::Complete,
            Self::Fail(_) => EventKind::Fail,
            Self::Reset => EventKind::Reset,
        }
    }
}

/// Payload-free discriminant of [`SubmissionEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    NewSelection,
    Submit,
    Complete,
    Fail,
    Reset,
}

/// One applied transition, kept for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateTransition {
    pub from: SubmissionPhase,
    pub event: EventKind,
    pub to: SubmissionPhase,
}

impl StateTransition {
    pub fn new(from: SubmissionPhase, event: EventKind, to: SubmissionPhase) -> Self {
        Self { from, event, to }
    }
}
