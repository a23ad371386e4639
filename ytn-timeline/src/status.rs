//! Annotation review status transitions
//!
//! ```text
//!            ┌──────────▶ Accepted ◀─┐
//! Pending ───┤                       │
//!            └──────────▶ Rejected ◀─┘
//! ```
//!
//! Pending is the only initial state and nothing leads back to it.
//! Re-requesting the current Accepted/Rejected status is allowed; the server
//! treats it as an idempotent update.

use ytn_common::{AnnotationStatus, Error, Result};

/// Whether `from → to` may be requested
pub fn can_transition(from: AnnotationStatus, to: AnnotationStatus) -> bool {
    match (from, to) {
        (_, AnnotationStatus::Pending) => false,
        (_, AnnotationStatus::Accepted) | (_, AnnotationStatus::Rejected) => true,
    }
}

/// Validate a requested transition before it is sent to the API
pub fn validate_transition(from: AnnotationStatus, to: AnnotationStatus) -> Result<()> {
    if can_transition(from, to) {
        Ok(())
    } else {
        Err(Error::InvalidStatus(format!(
            "cannot change status from {from} to {to}"
        )))
    }
}
