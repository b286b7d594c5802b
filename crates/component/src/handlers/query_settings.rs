//! Handler for `get` IQs in the settings namespace.

use channelpush_core::error::CoreError;
use channelpush_db::repositories::NotificationSettingsRepo;
use channelpush_db::DbPool;

use crate::codec;
use crate::error::HandlerResult;
use crate::router::SETTINGS_NS;
use crate::stanza::{Element, Iq};

/// Return the sender's stored settings.
///
/// A `type` child inside the request's settings container selects a single
/// category; its absence means "all categories". An owner or category with
/// nothing stored yields an empty container rather than an error.
pub async fn handle(pool: &DbPool, iq: &Iq) -> HandlerResult {
    let payload = iq
        .payload
        .as_ref()
        .ok_or(CoreError::MalformedRequest("missing query payload"))?;

    let owner = iq.from_bare();
    let category = payload
        .child(codec::SETTINGS_ELEMENT)
        .and_then(|el| codec::decode(el).category);

    let mut response = Element::new("query").with_attr("xmlns", SETTINGS_NS);

    match category {
        Some(category) => {
            let row = NotificationSettingsRepo::get_by_category(pool, owner, &category).await?;
            response.add_child(codec::encode(row.as_ref()));
        }
        None => {
            let rows = NotificationSettingsRepo::list_for_owner(pool, owner).await?;
            if rows.is_empty() {
                response.add_child(codec::encode(None));
            } else {
                for row in &rows {
                    response.add_child(codec::encode(Some(row)));
                }
            }
        }
    }

    Ok(Iq::result_of(iq, Some(response)))
}
