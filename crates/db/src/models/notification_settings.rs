//! Notification settings row model and partial-update DTO.

use channelpush_core::types::BareJid;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `notification_settings` table.
///
/// One row per `(jid, type)` pair; the repository's merge-write keeps that
/// invariant. Every boolean flag is concrete once persisted, never null.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct NotificationSettings {
    pub jid: BareJid,
    pub target: Option<String>,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub category: String,
    pub post_after_me: bool,
    pub post_mentioned_me: bool,
    pub post_on_my_channel: bool,
    pub post_on_subscribed_channel: bool,
    pub follow_my_channel: bool,
    pub follow_request: bool,
}

/// Tri-state partial update for a settings row.
///
/// `None` means "unspecified": leave the stored value unchanged on merge,
/// or resolve to the schema default on first write. `Some(_)` overwrites.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateNotificationSettings {
    pub target: Option<String>,
    #[serde(rename = "type")]
    pub category: Option<String>,
    pub post_after_me: Option<bool>,
    pub post_mentioned_me: Option<bool>,
    pub post_on_my_channel: Option<bool>,
    pub post_on_subscribed_channel: Option<bool>,
    pub follow_my_channel: Option<bool>,
    pub follow_request: Option<bool>,
}

impl NotificationSettings {
    /// Apply a partial update in place: specified fields overwrite,
    /// unspecified fields keep their stored value.
    ///
    /// The row's `jid` and `category` are never touched here; the merge key
    /// always comes from the caller, not the partial.
    pub fn apply(&mut self, update: &UpdateNotificationSettings) {
        if let Some(target) = &update.target {
            self.target = Some(target.clone());
        }
        if let Some(v) = update.post_after_me {
            self.post_after_me = v;
        }
        if let Some(v) = update.post_mentioned_me {
            self.post_mentioned_me = v;
        }
        if let Some(v) = update.post_on_my_channel {
            self.post_on_my_channel = v;
        }
        if let Some(v) = update.post_on_subscribed_channel {
            self.post_on_subscribed_channel = v;
        }
        if let Some(v) = update.follow_my_channel {
            self.follow_my_channel = v;
        }
        if let Some(v) = update.follow_request {
            self.follow_request = v;
        }
    }

    /// Project the row into a fully-specified partial.
    ///
    /// Used when encoding responses, where every known field is emitted.
    pub fn to_update(&self) -> UpdateNotificationSettings {
        UpdateNotificationSettings {
            target: self.target.clone(),
            category: Some(self.category.clone()),
            post_after_me: Some(self.post_after_me),
            post_mentioned_me: Some(self.post_mentioned_me),
            post_on_my_channel: Some(self.post_on_my_channel),
            post_on_subscribed_channel: Some(self.post_on_subscribed_channel),
            follow_my_channel: Some(self.follow_my_channel),
            follow_request: Some(self.follow_request),
        }
    }
}

impl UpdateNotificationSettings {
    /// Resolve this partial into a fresh row for `(jid, category)`.
    ///
    /// Unspecified booleans become `false`. Any category carried by the
    /// partial is ignored; the caller-supplied one wins.
    pub fn into_settings(self, jid: &str, category: &str) -> NotificationSettings {
        NotificationSettings {
            jid: jid.to_string(),
            target: self.target,
            category: category.to_string(),
            post_after_me: self.post_after_me.unwrap_or(false),
            post_mentioned_me: self.post_mentioned_me.unwrap_or(false),
            post_on_my_channel: self.post_on_my_channel.unwrap_or(false),
            post_on_subscribed_channel: self.post_on_subscribed_channel.unwrap_or(false),
            follow_my_channel: self.follow_my_channel.unwrap_or(false),
            follow_request: self.follow_request.unwrap_or(false),
        }
    }
}
