//! mozaiku-session: Upload form state machine.
//!
//! Models the browser-side upload controller as an explicit,
//! transport-agnostic state machine: file selection, per-keystroke
//! percentage validation, submit gating, and result tracking. A
//! transport (the CLI, or any HTTP client) turns the
//! [`TransformationRequest`] handed out by
//! [`UploadSession::submit`] into a real request and feeds the
//! response back via [`UploadSession::complete`].

pub mod session;
pub mod status;
pub mod validation;

pub use session::{SelectedFile, TransformationOutcome, TransformationRequest, UploadSession};
pub use status::UploadStatus;
pub use validation::{ValidationErrorKind, ValidationErrors};
