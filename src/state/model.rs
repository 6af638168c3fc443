use crate::client::ExtractionResult;

/// Mutually exclusive submission lifecycle states.
///
/// Exactly one variant holds at any time. `Success` and `Error` carry their
/// payload inside the variant, so a stale result can never linger next to a
/// newer state.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SubmissionState {
    #[default]
    Idle,
    Loading,
    Success(ExtractionResult),
    Error(String),
}

impl SubmissionState {
    pub fn phase(&self) -> SubmissionPhase {
        match self {
            Self::Idle => SubmissionPhase::Idle,
            Self::Loading => SubmissionPhase::Loading,
            Self::Success(_) => SubmissionPhase::Success,
            Self::Error(_) => SubmissionPhase::Error,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn result(&self) -> Option<&ExtractionResult> {
        match self {
            Self::Success(result) => Some(result),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// Copyable discriminant of [`SubmissionState`], used for guard checks and
/// transition records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionPhase {
    Idle,
    Loading,
    Success,
    Error,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_matches_each_variant() {
        assert_eq!(SubmissionState::Idle.phase(), SubmissionPhase::Idle);
        assert_eq!(SubmissionState::Loading.phase(), SubmissionPhase::Loading);
        assert_eq!(
            SubmissionState::Success(ExtractionResult::default()).phase(),
            SubmissionPhase::Success
        );
        assert_eq!(
            SubmissionState::Error("boom".to_string()).phase(),
            SubmissionPhase::Error
        );
    }

    #[test]
    fn default_state_is_idle() {
        assert_eq!(SubmissionState::default(), SubmissionState::Idle);
    }

    #[test]
    fn accessors_expose_payload_only_for_matching_variant() {
        let success = SubmissionState::Success(ExtractionResult::default());
        assert!(success.result().is_some());
        assert!(success.error_message().is_none());

        let error = SubmissionState::Error("offline".to_string());
        assert_eq!(error.error_message(), Some("offline"));
        assert!(error.result().is_none());
    }
}
