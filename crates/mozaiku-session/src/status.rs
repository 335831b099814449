//! Tagged upload status.

use mozaiku_pipeline::Dimensions;
use serde::{Deserialize, Serialize};

/// The single source of truth for where an upload stands.
///
/// Modeled as one tagged state instead of parallel boolean flags so
/// impossible combinations (uploading *and* done) cannot be
/// represented. The result dimensions live inside [`Success`] and
/// therefore exist exactly when the upload succeeded.
///
/// [`Success`]: UploadStatus::Success
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum UploadStatus {
    /// No request in flight and no result yet.
    #[default]
    Idle,
    /// Exactly one transformation request is in flight.
    Uploading,
    /// The last request completed; holds the output dimensions.
    Success {
        /// Dimensions reported by the endpoint.
        result: Dimensions,
    },
    /// The last request failed; holds a display message.
    Error {
        /// Failure message for the result pane.
        message: String,
    },
}

impl UploadStatus {
    /// Whether a request is currently in flight.
    #[must_use]
    pub const fn is_uploading(&self) -> bool {
        matches!(self, Self::Uploading)
    }

    /// The result dimensions, present iff the status is [`Success`].
    ///
    /// [`Success`]: UploadStatus::Success
    #[must_use]
    pub const fn result(&self) -> Option<Dimensions> {
        match self {
            Self::Success { result } => Some(*result),
            _ => None,
        }
    }
}
