//! In-process backend backed by a JSON fixture.
//!
//! Implements every collaborator trait so the scheduler and engine can run
//! without a server. Tests use the read counter and the failing switch to
//! observe the degrade-on-error paths.

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::traits::{CalendarReader, PreferencesReader, ProfileReader, SuggestionStore};
use super::types::{
    CalendarEvent, NotificationPreferences, ProfileRecord, SuggestionRecord, SuggestionUsage,
};
use crate::error::{ApiError, CoreError};

/// Serialized contents of a [`MemoryApi`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Fixture {
    #[serde(default)]
    pub preferences: HashMap<String, NotificationPreferences>,
    #[serde(default)]
    pub events: HashMap<String, Vec<CalendarEvent>>,
    #[serde(default)]
    pub profiles: HashMap<String, ProfileRecord>,
    #[serde(default)]
    pub suggestions: Vec<SuggestionRecord>,
    #[serde(default)]
    pub usage: HashMap<String, SuggestionUsage>,
}

#[derive(Debug, Default)]
pub struct MemoryApi {
    state: RwLock<Fixture>,
    calendar_reads: AtomicUsize,
    failing: AtomicBool,
}

impl MemoryApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_fixture(fixture: Fixture) -> Self {
        Self {
            state: RwLock::new(fixture),
            ..Self::default()
        }
    }

    /// Load a fixture file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not a valid fixture.
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let content = std::fs::read_to_string(path)?;
        let fixture: Fixture = serde_json::from_str(&content)?;
        Ok(Self::from_fixture(fixture))
    }

    /// Write the current state back to `path`.
    pub fn save(&self, path: &Path) -> Result<(), CoreError> {
        let content = serde_json::to_string_pretty(&*self.read())?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn snapshot(&self) -> Fixture {
        self.read().clone()
    }

    pub fn set_preferences(&self, user_id: &str, prefs: NotificationPreferences) {
        self.write().preferences.insert(user_id.to_string(), prefs);
    }

    pub fn add_event(&self, user_id: &str, event: CalendarEvent) {
        self.write()
            .events
            .entry(user_id.to_string())
            .or_default()
            .push(event);
    }

    pub fn set_profile(&self, user_id: &str, profile: ProfileRecord) {
        self.write().profiles.insert(user_id.to_string(), profile);
    }

    /// Make every read and write fail with [`ApiError::Unavailable`].
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of calendar reads served (or refused) so far.
    pub fn calendar_reads(&self) -> usize {
        self.calendar_reads.load(Ordering::SeqCst)
    }

    pub fn stored_suggestions(&self) -> Vec<SuggestionRecord> {
        self.read().suggestions.clone()
    }

    pub fn usage_for(&self, suggestion_id: &str) -> Option<SuggestionUsage> {
        self.read().usage.get(suggestion_id).cloned()
    }

    fn check_available(&self) -> Result<(), ApiError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(ApiError::Unavailable("memory backend switched off".into()))
        } else {
            Ok(())
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Fixture> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Fixture> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl PreferencesReader for MemoryApi {
    async fn notification_preferences(
        &self,
        user_id: &str,
    ) -> Result<Option<NotificationPreferences>, ApiError> {
        self.check_available()?;
        Ok(self.read().preferences.get(user_id).cloned())
    }
}

#[async_trait]
impl CalendarReader for MemoryApi {
    async fn calendar_events(
        &self,
        user_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<CalendarEvent>, ApiError> {
        self.calendar_reads.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        Ok(self
            .read()
            .events
            .get(user_id)
            .map(|events| {
                events
                    .iter()
                    .filter(|e| e.intersects(start, end))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}

#[async_trait]
impl ProfileReader for MemoryApi {
    async fn partner_profile(&self, user_id: &str) -> Result<Option<ProfileRecord>, ApiError> {
        self.check_available()?;
        Ok(self.read().profiles.get(user_id).cloned())
    }
}

#[async_trait]
impl SuggestionStore for MemoryApi {
    async fn insert_suggestion(&self, record: &SuggestionRecord) -> Result<String, ApiError> {
        self.check_available()?;
        self.write().suggestions.push(record.clone());
        Ok(record.id.clone())
    }

    async fn update_suggestion_usage(
        &self,
        suggestion_id: &str,
        usage: &SuggestionUsage,
    ) -> Result<(), ApiError> {
        self.check_available()?;
        let mut state = self.write();
        if !state.suggestions.iter().any(|s| s.id == suggestion_id) {
            return Err(ApiError::Status {
                status: 404,
                body: format!("suggestion {suggestion_id} not found"),
            });
        }
        state.usage.insert(suggestion_id.to_string(), usage.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[tokio::test]
    async fn calendar_reads_filter_by_range_and_count() {
        let api = MemoryApi::new();
        let base = Utc.with_ymd_and_hms(2024, 5, 3, 0, 0, 0).unwrap();
        api.add_event("u1", CalendarEvent::new(base + Duration::hours(9), base + Duration::hours(10)));
        api.add_event("u1", CalendarEvent::new(base + Duration::days(2), base + Duration::days(2) + Duration::hours(1)));

        let events = api
            .calendar_events("u1", base, base + Duration::days(1))
            .await
            .unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(api.calendar_reads(), 1);

        let none = api.calendar_events("nobody", base, base + Duration::days(1)).await.unwrap();
        assert!(none.is_empty());
        assert_eq!(api.calendar_reads(), 2);
    }

    #[tokio::test]
    async fn failing_switch_rejects_reads_and_writes() {
        let api = MemoryApi::new();
        api.set_failing(true);
        assert!(api.notification_preferences("u1").await.is_err());
        assert!(api.partner_profile("u1").await.is_err());

        let usage = SuggestionUsage { used_index: 0, feedback: None, used_at: Utc::now() };
        assert!(api.update_suggestion_usage("s1", &usage).await.is_err());
    }

    #[tokio::test]
    async fn usage_update_requires_existing_suggestion() {
        let api = MemoryApi::new();
        let usage = SuggestionUsage { used_index: 1, feedback: Some("loved it".into()), used_at: Utc::now() };
        let err = api.update_suggestion_usage("missing", &usage).await.unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 404, .. }));
    }

    #[test]
    fn fixture_round_trips_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fixture.json");
        std::fs::write(
            &path,
            r#"{"preferences":{"u1":{"daily_question_time":"08:00"}},"profiles":{"u2":{"display_name":"Alex"}}}"#,
        )
        .unwrap();

        let api = MemoryApi::load(&path).unwrap();
        api.set_profile("u3", ProfileRecord::default());
        api.save(&path).unwrap();

        let reloaded = MemoryApi::load(&path).unwrap().snapshot();
        assert_eq!(reloaded.preferences["u1"].daily_question_time.as_deref(), Some("08:00"));
        assert_eq!(reloaded.profiles.len(), 2);
    }
}
