use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::types::{
    CalendarEvent, NotificationPreferences, ProfileRecord, SuggestionRecord, SuggestionUsage,
};
use crate::error::ApiError;

/// Reads per-user notification settings.
#[async_trait]
pub trait PreferencesReader: Send + Sync {
    /// `Ok(None)` when the user has never saved preferences.
    async fn notification_preferences(
        &self,
        user_id: &str,
    ) -> Result<Option<NotificationPreferences>, ApiError>;
}

/// Reads busy intervals from a user's calendar.
#[async_trait]
pub trait CalendarReader: Send + Sync {
    /// Events intersecting `[start, end]`.
    async fn calendar_events(
        &self,
        user_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<CalendarEvent>, ApiError>;
}

/// Reads partner profile attributes.
#[async_trait]
pub trait ProfileReader: Send + Sync {
    async fn partner_profile(&self, user_id: &str) -> Result<Option<ProfileRecord>, ApiError>;
}

/// Persists suggestion records. Errors are never swallowed by callers.
#[async_trait]
pub trait SuggestionStore: Send + Sync {
    /// Insert a record and return the id the store assigned.
    async fn insert_suggestion(&self, record: &SuggestionRecord) -> Result<String, ApiError>;

    async fn update_suggestion_usage(
        &self,
        suggestion_id: &str,
        usage: &SuggestionUsage,
    ) -> Result<(), ApiError>;
}
