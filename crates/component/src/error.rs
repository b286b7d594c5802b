//! Request-to-outcome mapping.
//!
//! Translates the two internal failure categories onto the protocol error
//! vocabulary. Nothing else produces error stanzas.

use channelpush_core::error::CoreError;

use crate::stanza::{ErrorCondition, Iq};

/// Return type of every IQ handler.
pub type HandlerResult = Result<Iq, CoreError>;

/// Build the error response for a failed request.
///
/// Validation failures map to `feature-not-implemented`; they are expected
/// caller misuse and not logged as errors. Storage faults map to
/// `internal-server-error` and are logged with the owner identity; the
/// repository has already rolled back, so prior state is preserved and the
/// caller must resubmit.
pub fn error_response(request: &Iq, error: &CoreError) -> Iq {
    let condition = match error {
        CoreError::MalformedRequest(reason) => {
            tracing::debug!(owner = %request.from_bare(), reason = %reason, "Rejected malformed request");
            ErrorCondition::FeatureNotImplemented
        }
        CoreError::Storage(err) => {
            tracing::error!(owner = %request.from_bare(), error = %err, "Storage failure while handling request");
            ErrorCondition::InternalServerError
        }
    };
    Iq::error_of(request, condition)
}
