use crate::client::ExtractionResult;
use crate::clipboard::{ClipboardBackend, ClipboardResult};

pub const NO_TEXT_PLACEHOLDER: &str = "No text detected";

/// Read-only projection of a successful extraction.
///
/// Holds no state of its own; everything is derived from the borrowed
/// result on each call.
#[derive(Debug, Clone, Copy)]
pub struct ResultReport<'a> {
    result: &'a ExtractionResult,
}

impl<'a> ResultReport<'a> {
    pub fn new(result: &'a ExtractionResult) -> Self {
        Self { result }
    }

    /// Raw pass, verbatim; placeholder when the engine detected nothing.
    pub fn raw_display(&self) -> &'a str {
        self.result.raw_text.as_deref().unwrap_or(NO_TEXT_PLACEHOLDER)
    }

    /// Refined pass, falling back to the raw pass.
    pub fn refined_display(&self) -> &'a str {
        self.result
            .refined_text
            .as_deref()
            .or(self.result.raw_text.as_deref())
            .unwrap_or(NO_TEXT_PLACEHOLDER)
    }

    /// Character count of the raw pass; 0 when absent. Counted in
    /// characters, not bytes, so non-ASCII scripts report their visible
    /// length.
    pub fn raw_char_count(&self) -> usize {
        self.result
            .raw_text
            .as_deref()
            .map_or(0, |text| text.chars().count())
    }

    /// Character count of the refined pass as displayed, so a missing
    /// refinement mirrors the raw statistic.
    pub fn refined_char_count(&self) -> usize {
        self.result
            .refined_text
            .as_deref()
            .or(self.result.raw_text.as_deref())
            .map_or(0, |text| text.chars().count())
    }

    /// Copy the refined text to the clipboard. Operates on the refined pass
    /// only; an absent refinement is a no-op returning `false`. Submission
    /// state is never touched.
    pub fn copy_refined(&self, backend: &dyn ClipboardBackend) -> ClipboardResult<bool> {
        match self.result.refined_text.as_deref() {
            Some(text) => backend.copy_text(text).map(|()| true),
            None => Ok(false),
        }
    }
}
