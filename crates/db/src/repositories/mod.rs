//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&DbPool` as the first argument.

pub mod notification_settings_repo;

pub use notification_settings_repo::NotificationSettingsRepo;
