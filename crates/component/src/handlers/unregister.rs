//! Handler for `set` IQs in the `jabber:iq:register` namespace.

use channelpush_core::error::CoreError;
use channelpush_db::repositories::NotificationSettingsRepo;
use channelpush_db::DbPool;

use crate::error::HandlerResult;
use crate::stanza::Iq;

/// Remove every settings row for the sender.
///
/// The request must carry an explicit `<remove/>` marker; without it the
/// shape is not recognized and nothing is touched. Removal is idempotent:
/// unregistering an owner with no remaining rows still succeeds.
pub async fn handle(pool: &DbPool, iq: &Iq) -> HandlerResult {
    let payload = iq
        .payload
        .as_ref()
        .ok_or(CoreError::MalformedRequest("missing query payload"))?;

    if payload.child("remove").is_none() {
        return Err(CoreError::MalformedRequest("missing remove element"));
    }

    let owner = iq.from_bare();
    let removed = NotificationSettingsRepo::remove_all(pool, owner).await?;
    tracing::debug!(owner = %owner, removed, "Unregistered subscriber");

    Ok(Iq::result_of(iq, None))
}
