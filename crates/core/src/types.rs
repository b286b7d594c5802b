//! Primitive domain types shared across the workspace.

/// A bare subscriber address (`user@domain`, no resource part).
pub type BareJid = String;

/// Strip the resource part from a JID, yielding its bare form.
///
/// Preference rows are always keyed by the bare address, regardless of
/// which resource sent the request.
pub fn to_bare(jid: &str) -> &str {
    match jid.find('/') {
        Some(idx) => &jid[..idx],
        None => jid,
    }
}
