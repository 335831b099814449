//! The upload form state machine.
//!
//! [`UploadSession`] owns everything the form knows: the selected
//! file, the requested percentage, current validation errors, and the
//! upload status. It is deliberately I/O-free — `submit` hands back a
//! [`TransformationRequest`] for a transport layer to send, and the
//! transport reports back through [`UploadSession::complete`].
//!
//! Status transitions: `Idle -> Uploading -> {Success, Error}`.
//! `reset` returns to `Idle` from anywhere; a corrected `submit` moves
//! `Error` straight back to `Uploading`. No accepted submission ever
//! skips `Uploading`.

use mozaiku_pipeline::{Dimensions, Percentage};
use serde::{Deserialize, Serialize};

use crate::status::UploadStatus;
use crate::validation::{ValidationErrorKind, ValidationErrors};

/// A file chosen in the form: raw bytes plus the declared media type.
///
/// The media type is whatever the picker declared; content sniffing is
/// the endpoint's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedFile {
    /// Raw file bytes as read from the picker.
    pub bytes: Vec<u8>,
    /// Declared media type, e.g. `image/png`.
    pub media_type: String,
    /// Original file name, used for the multipart field.
    pub file_name: String,
}

/// One outbound transformation request, built by an accepted `submit`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformationRequest {
    /// The file to pixelate.
    pub image: SelectedFile,
    /// Validated pixelation percentage.
    pub percentage: Percentage,
}

/// What the transport observed for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransformationOutcome {
    /// The endpoint replied with the output dimensions.
    Completed(Dimensions),
    /// The request failed (non-success response or transport error).
    Failed(String),
}

/// Form state for one upload: file, percentage, errors, and status.
///
/// Created once per form, mutated by every input event, and reset in
/// place by "Try Again" rather than recreated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadSession {
    selected_file: Option<SelectedFile>,
    requested_percentage: Option<Percentage>,
    errors: ValidationErrors,
    status: UploadStatus,
}

impl UploadSession {
    /// Create a fresh session: no file, no percentage, no errors, `Idle`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the selected file unconditionally.
    ///
    /// The file picker already restricts what can be chosen, so no
    /// content validation happens here. Clears a pending `MissingFile`
    /// error since the field is now satisfied.
    pub fn set_file(&mut self, file: SelectedFile) {
        self.selected_file = Some(file);
        self.errors.clear(ValidationErrorKind::MissingFile);
    }

    /// Re-validate and store the percentage field.
    ///
    /// Called on every keystroke. A value that does not parse to an
    /// integer in `[1, 100]` raises `PercentageRange` (replacing any
    /// prior message, never duplicating) and leaves the stored value
    /// untouched. A valid value clears `PercentageRange` and
    /// `MissingPercentage` and is stored.
    pub fn set_percentage(&mut self, raw: &str) {
        match Percentage::parse(raw) {
            Ok(percentage) => {
                self.requested_percentage = Some(percentage);
                self.errors.clear(ValidationErrorKind::PercentageRange);
                self.errors.clear(ValidationErrorKind::MissingPercentage);
            }
            Err(_) => {
                self.errors.raise(ValidationErrorKind::PercentageRange);
            }
        }
    }

    /// Attempt to start an upload.
    ///
    /// Returns `Some(request)` and transitions to `Uploading` only
    /// when a file and a valid percentage are both present and no
    /// request is already in flight. Missing inputs raise
    /// `MissingFile` / `MissingPercentage` validation errors and
    /// nothing is sent (see DESIGN.md for the recorded-errors choice).
    ///
    /// A session already in `Uploading` or `Success` refuses the
    /// submit outright: re-submission requires the response to land or
    /// a `reset` first. `Error` accepts a corrected re-submit.
    #[must_use]
    pub fn submit(&mut self) -> Option<TransformationRequest> {
        if matches!(
            self.status,
            UploadStatus::Uploading | UploadStatus::Success { .. }
        ) {
            return None;
        }

        if self.selected_file.is_none() {
            self.errors.raise(ValidationErrorKind::MissingFile);
        }
        if self.requested_percentage.is_none() {
            self.errors.raise(ValidationErrorKind::MissingPercentage);
        }

        let (Some(image), Some(percentage)) =
            (self.selected_file.clone(), self.requested_percentage)
        else {
            return None;
        };

        self.status = UploadStatus::Uploading;
        Some(TransformationRequest { image, percentage })
    }

    /// Record the outcome of the in-flight request.
    ///
    /// Transitions `Uploading -> Success` or `Uploading -> Error`. An
    /// outcome arriving in any other state (e.g. after a `reset`) is
    /// stale and ignored.
    pub fn complete(&mut self, outcome: TransformationOutcome) {
        if !self.status.is_uploading() {
            return;
        }
        self.status = match outcome {
            TransformationOutcome::Completed(result) => UploadStatus::Success { result },
            TransformationOutcome::Failed(message) => UploadStatus::Error { message },
        };
    }

    /// Return the session to its initial state ("Try Again").
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// The currently selected file, if any.
    #[must_use]
    pub const fn selected_file(&self) -> Option<&SelectedFile> {
        self.selected_file.as_ref()
    }

    /// The last successfully validated percentage, if any.
    #[must_use]
    pub const fn requested_percentage(&self) -> Option<Percentage> {
        self.requested_percentage
    }

    /// Current validation errors, one message per kind.
    #[must_use]
    pub const fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Current upload status.
    #[must_use]
    pub const fn status(&self) -> &UploadStatus {
        &self.status
    }
}
