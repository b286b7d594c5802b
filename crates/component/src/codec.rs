//! Wire codec for `notificationSettings` payloads.
//!
//! Decoding is tri-state: an absent child means "unspecified", which is how
//! partial updates express "leave the stored value unchanged". Encoding only
//! emits fields that are actually specified and never invents a value.

use channelpush_db::models::notification_settings::{
    NotificationSettings, UpdateNotificationSettings,
};

use crate::stanza::Element;

/// Name of the settings container element.
pub const SETTINGS_ELEMENT: &str = "notificationSettings";

/// Encode a settings row, or its absence, as a settings container.
///
/// An absent row encodes to an empty container: "no preferences configured".
/// A present row emits every known field.
pub fn encode(settings: Option<&NotificationSettings>) -> Element {
    match settings {
        Some(settings) => encode_update(&settings.to_update()),
        None => Element::new(SETTINGS_ELEMENT),
    }
}

/// Encode a partial update, emitting only the fields it specifies.
pub fn encode_update(update: &UpdateNotificationSettings) -> Element {
    let mut el = Element::new(SETTINGS_ELEMENT);
    append_text(&mut el, "target", update.target.as_deref());
    append_text(&mut el, "type", update.category.as_deref());
    append_bool(&mut el, "postAfterMe", update.post_after_me);
    append_bool(&mut el, "postMentionedMe", update.post_mentioned_me);
    append_bool(&mut el, "postOnMyChannel", update.post_on_my_channel);
    append_bool(&mut el, "postOnSubscribedChannel", update.post_on_subscribed_channel);
    append_bool(&mut el, "followMyChannel", update.follow_my_channel);
    append_bool(&mut el, "followRequest", update.follow_request);
    el
}

/// Decode a settings container into a partial update.
///
/// Absent children decode to unspecified; unknown children are ignored, so
/// decoding never fails and stays forward compatible.
pub fn decode(el: &Element) -> UpdateNotificationSettings {
    UpdateNotificationSettings {
        target: text_child(el, "target"),
        category: text_child(el, "type"),
        post_after_me: bool_child(el, "postAfterMe"),
        post_mentioned_me: bool_child(el, "postMentionedMe"),
        post_on_my_channel: bool_child(el, "postOnMyChannel"),
        post_on_subscribed_channel: bool_child(el, "postOnSubscribedChannel"),
        follow_my_channel: bool_child(el, "followMyChannel"),
        follow_request: bool_child(el, "followRequest"),
    }
}

fn append_text(el: &mut Element, name: &str, value: Option<&str>) {
    if let Some(value) = value {
        el.add_child(Element::new(name).with_text(value));
    }
}

fn append_bool(el: &mut Element, name: &str, value: Option<bool>) {
    if let Some(value) = value {
        el.add_child(Element::new(name).with_text(if value { "true" } else { "false" }));
    }
}

fn text_child(el: &Element, name: &str) -> Option<String> {
    el.child(name).map(|c| c.text().to_string())
}

// Boolean text is "true" (case-sensitive); any other text is false.
fn bool_child(el: &Element, name: &str) -> Option<bool> {
    el.child(name).map(|c| c.text() == "true")
}
