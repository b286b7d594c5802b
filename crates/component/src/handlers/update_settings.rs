//! Handler for `set` IQs in the settings namespace.

use channelpush_core::error::CoreError;
use channelpush_db::repositories::NotificationSettingsRepo;
use channelpush_db::DbPool;

use crate::codec;
use crate::error::HandlerResult;
use crate::router::SETTINGS_NS;
use crate::stanza::{Element, Iq};

/// Merge a partial update into the sender's stored settings.
///
/// The payload must carry a settings container with a `type` child naming
/// the category; both are validation requirements checked before any
/// persistence call. The merged row is echoed back in full.
pub async fn handle(pool: &DbPool, iq: &Iq) -> HandlerResult {
    let payload = iq
        .payload
        .as_ref()
        .ok_or(CoreError::MalformedRequest("missing query payload"))?;

    let settings_el = payload
        .child(codec::SETTINGS_ELEMENT)
        .ok_or(CoreError::MalformedRequest("missing notificationSettings element"))?;

    let update = codec::decode(settings_el);
    let category = update
        .category
        .clone()
        .ok_or(CoreError::MalformedRequest("missing type element"))?;

    let owner = iq.from_bare();
    let merged = NotificationSettingsRepo::upsert(pool, owner, &category, &update).await?;

    let response = Element::new("query")
        .with_attr("xmlns", SETTINGS_NS)
        .with_child(codec::encode(Some(&merged)));

    Ok(Iq::result_of(iq, Some(response)))
}
