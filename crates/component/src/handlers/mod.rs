//! Per-namespace IQ handlers.
//!
//! Each handler is a stateless function of (request, pool) producing either
//! a result IQ or a domain error; the router maps errors onto protocol
//! error stanzas. Validation always happens before any persistence call, so
//! a rejected request leaves no visible state change.

pub mod query_settings;
pub mod unregister;
pub mod update_settings;
