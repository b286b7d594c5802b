//! channelpush notification-settings component.
//!
//! Stores per-subscriber notification preferences and negotiates them over
//! IQ-style request/response payloads: a partial-update codec, per-namespace
//! request handlers, and the mapping from internal failures onto the protocol
//! error vocabulary. The XMPP transport itself plugs in from outside; this
//! crate only consumes and produces stanzas.

pub mod codec;
pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod stanza;
pub mod state;
