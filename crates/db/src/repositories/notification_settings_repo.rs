//! Repository for the `notification_settings` table.

use crate::models::notification_settings::{NotificationSettings, UpdateNotificationSettings};
use crate::DbPool;

/// Column list for `notification_settings` queries.
const COLUMNS: &str = "jid, target, type, post_after_me, post_mentioned_me, \
    post_on_my_channel, post_on_subscribed_channel, follow_my_channel, follow_request";

/// Provides read and merge-write operations for notification settings.
///
/// The repository is the sole writer of the table; handlers never touch
/// rows directly.
pub struct NotificationSettingsRepo;

impl NotificationSettingsRepo {
    /// List every owner with at least one stored settings row.
    pub async fn list_owners(pool: &DbPool) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT jid FROM notification_settings ORDER BY jid",
        )
        .fetch_all(pool)
        .await
    }

    /// List all settings rows for an owner, across every category.
    pub async fn list_for_owner(
        pool: &DbPool,
        jid: &str,
    ) -> Result<Vec<NotificationSettings>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM notification_settings WHERE jid = ?");
        sqlx::query_as::<_, NotificationSettings>(&query)
            .bind(jid)
            .fetch_all(pool)
            .await
    }

    /// Get the settings row for a specific category, if any.
    pub async fn get_by_category(
        pool: &DbPool,
        jid: &str,
        category: &str,
    ) -> Result<Option<NotificationSettings>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM notification_settings WHERE jid = ? AND type = ?");
        sqlx::query_as::<_, NotificationSettings>(&query)
            .bind(jid)
            .bind(category)
            .fetch_optional(pool)
            .await
    }

    /// Merge-write a partial update for `(jid, category)`.
    ///
    /// Reads the current row and merges specified fields over it; when no
    /// row exists the partial resolves against the schema defaults (every
    /// unspecified boolean becomes `false`). The merged row then replaces
    /// any existing one via delete-then-insert inside a single transaction,
    /// so a failure at any point rolls back and leaves the prior row
    /// untouched. One code path whether or not the row existed.
    pub async fn upsert(
        pool: &DbPool,
        jid: &str,
        category: &str,
        update: &UpdateNotificationSettings,
    ) -> Result<NotificationSettings, sqlx::Error> {
        let merged = match Self::get_by_category(pool, jid, category).await? {
            Some(mut current) => {
                current.apply(update);
                current
            }
            None => update.clone().into_settings(jid, category),
        };

        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM notification_settings WHERE jid = ? AND type = ?")
            .bind(jid)
            .bind(category)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            "INSERT INTO notification_settings \
                (jid, target, type, post_after_me, post_mentioned_me, post_on_my_channel, \
                 post_on_subscribed_channel, follow_my_channel, follow_request) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&merged.jid)
        .bind(&merged.target)
        .bind(&merged.category)
        .bind(merged.post_after_me)
        .bind(merged.post_mentioned_me)
        .bind(merged.post_on_my_channel)
        .bind(merged.post_on_subscribed_channel)
        .bind(merged.follow_my_channel)
        .bind(merged.follow_request)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(merged)
    }

    /// Delete every settings row for an owner.
    ///
    /// Idempotent: deleting zero rows is success. Returns the number of
    /// rows removed.
    pub async fn remove_all(pool: &DbPool, jid: &str) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM notification_settings WHERE jid = ?")
            .bind(jid)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
