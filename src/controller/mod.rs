use crate::acquire::{self, AcquiredImage};
use crate::client::{ExtractResult, ExtractionResult, TextExtractor};
use crate::preview::PreviewRepresentation;
use crate::state::{SubmissionEvent, SubmissionMachine, SubmissionPhase, SubmissionState};

pub const NO_IMAGE_MESSAGE: &str = "Please select an image first";

/// Identifies which acquisition an in-flight preview render belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewTicket(u64);

/// Identifies which acquisition an in-flight submission belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionTicket(u64);

/// Owner of the submission lifecycle: the state machine plus the two
/// independent cells (acquired image, preview representation).
///
/// Acquisitions are numbered so that work finishing after a newer selection
/// or a reset is recognized as stale and discarded.
#[derive(Debug, Default)]
pub struct SubmissionController {
    machine: SubmissionMachine,
    image: Option<AcquiredImage>,
    preview: Option<PreviewRepresentation>,
    acquisition_seq: u64,
}

impl SubmissionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SubmissionState {
        self.machine.state()
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.machine.phase()
    }

    pub fn image(&self) -> Option<&AcquiredImage> {
        self.image.as_ref()
    }

    pub fn preview(&self) -> Option<&PreviewRepresentation> {
        self.preview.as_ref()
    }

    /// Picker acceptance is unconditional.
    pub fn select_from_picker(&mut self, file: AcquiredImage) -> PreviewTicket {
        self.accept(file)
    }

    /// Drop acceptance requires an image-typed first file; anything else
    /// leaves every cell untouched and returns `None`.
    pub fn select_from_drop(&mut self, files: Vec<AcquiredImage>) -> Option<PreviewTicket> {
        let file = acquire::first_dropped_image(files)?;
        Some(self.accept(file))
    }

    fn accept(&mut self, file: AcquiredImage) -> PreviewTicket {
        // State first: a stale Success or Error must never display against
        // the incoming image.
        let _ = self.machine.transition(SubmissionEvent::NewSelection);
        self.acquisition_seq += 1;
        self.image = Some(file);
        self.preview = None;
        PreviewTicket(self.acquisition_seq)
    }

    /// Install an asynchronously rendered preview, unless a newer selection
    /// or a reset superseded it.
    pub fn publish_preview(
        &mut self,
        ticket: PreviewTicket,
        preview: PreviewRepresentation,
    ) -> bool {
        if ticket.0 != self.acquisition_seq || self.image.is_none() {
            tracing::debug!(
                ticket = ticket.0,
                current = self.acquisition_seq,
                "discarding stale preview"
            );
            return false;
        }
        self.preview = Some(preview);
        true
    }

    /// The submit control is enabled only with an image acquired and no
    /// submission in flight.
    pub fn can_submit(&self) -> bool {
        self.image.is_some() && !self.machine.state().is_loading()
    }

    /// First half of [`submit`](Self::submit): runs the guards and, when
    /// they pass, moves to Loading and hands out the payload for the
    /// network round trip.
    ///
    /// With no image acquired this lands directly in `Error` without any
    /// network call. While Loading it has no effect at all.
    pub fn begin_submission(&mut self) -> Option<(SubmissionTicket, AcquiredImage)> {
        if self.machine.state().is_loading() {
            tracing::debug!("submission ignored while one is in flight");
            return None;
        }
        let Some(image) = self.image.clone() else {
            let _ = self
                .machine
                .transition(SubmissionEvent::Fail(NO_IMAGE_MESSAGE.to_string()));
            return None;
        };
        let _ = self.machine.transition(SubmissionEvent::Submit);
        Some((SubmissionTicket(self.acquisition_seq), image))
    }

    /// Second half of [`submit`](Self::submit): lands the outcome unless
    /// `reset` or a newer selection already retired this submission.
    pub fn finish_submission(
        &mut self,
        ticket: SubmissionTicket,
        outcome: ExtractResult<ExtractionResult>,
    ) -> bool {
        if ticket.0 != self.acquisition_seq || !self.machine.state().is_loading() {
            tracing::debug!(
                ticket = ticket.0,
                current = self.acquisition_seq,
                "discarding outcome of a retired submission"
            );
            return false;
        }
        let event = match outcome {
            Ok(result) => SubmissionEvent::Complete(result),
            Err(err) => SubmissionEvent::Fail(err.user_message()),
        };
        let _ = self.machine.transition(event);
        true
    }

    /// Full submission round trip against an extraction backend.
    pub async fn submit<E>(&mut self, extractor: &E) -> &SubmissionState
    where
        E: TextExtractor + ?Sized,
    {
        if let Some((ticket, image)) = self.begin_submission() {
            let outcome = extractor.extract(&image).await;
            self.finish_submission(ticket, outcome);
        }
        self.machine.state()
    }

    /// Unconditional return to the initial state with no acquired image.
    pub fn reset(&mut self) {
        let _ = self.machine.transition(SubmissionEvent::Reset);
        self.image = None;
        self.preview = None;
    }
}
