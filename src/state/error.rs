use super::event::EventKind;
use super::model::SubmissionPhase;
use thiserror::Error;

pub type StateResult<T> = std::result::Result<T, StateError>;

#[derive(Debug, Error)]
pub enum StateError {
    #[error("invalid state transition: from {from:?} using event {event:?}")]
    InvalidStateTransition {
        from: SubmissionPhase,
        event: EventKind,
    },
}
