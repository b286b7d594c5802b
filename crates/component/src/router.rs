//! IQ dispatch.
//!
//! Selects a handler by (payload namespace, request type) and maps handler
//! failures onto protocol error stanzas. Requests are independent; nothing
//! here carries state across calls, so the surrounding transport is free to
//! process them concurrently.

use channelpush_core::error::CoreError;

use crate::error::error_response;
use crate::handlers;
use crate::stanza::{Iq, IqType};
use crate::state::Component;

/// Namespace of the notification-settings protocol.
pub const SETTINGS_NS: &str = "http://channelpush.org/notification-settings";

/// Standard in-band registration namespace, used for unregistration.
pub const REGISTER_NS: &str = "jabber:iq:register";

impl Component {
    /// Dispatch an incoming IQ and always produce exactly one response:
    /// either the handler's result or a mapped error stanza.
    pub async fn handle_iq(&self, iq: &Iq) -> Iq {
        let outcome = match (iq.namespace(), iq.kind) {
            (Some(SETTINGS_NS), IqType::Get) => {
                handlers::query_settings::handle(&self.pool, iq).await
            }
            (Some(SETTINGS_NS), IqType::Set) => {
                handlers::update_settings::handle(&self.pool, iq).await
            }
            (Some(REGISTER_NS), IqType::Set) => handlers::unregister::handle(&self.pool, iq).await,
            _ => Err(CoreError::MalformedRequest("no handler for this request shape")),
        };

        match outcome {
            Ok(response) => response,
            Err(error) => error_response(iq, &error),
        }
    }
}
