//! Records exchanged with the external stores.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::suggestions::NeedCategory;

/// Per-user send-time configuration as stored by the preferences service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotificationPreferences {
    /// `HH:MM`
    #[serde(default)]
    pub daily_question_time: Option<String>,
    /// `HH:MM` entries
    #[serde(default)]
    pub needs_suggestion_times: Option<Vec<String>>,
    /// English weekday names, e.g. `"friday"`
    #[serde(default)]
    pub date_suggestion_days: Option<Vec<String>>,
    /// `morning`, `afternoon` or `evening`
    #[serde(default)]
    pub date_suggestion_time_preference: Option<String>,
}

impl NotificationPreferences {
    /// Resolved time-of-day preference; evening when missing or unrecognized.
    pub fn time_preference(&self) -> TimeOfDay {
        self.date_suggestion_time_preference
            .as_deref()
            .map(TimeOfDay::parse_lenient)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    #[default]
    Evening,
}

impl TimeOfDay {
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "morning" => TimeOfDay::Morning,
            "afternoon" => TimeOfDay::Afternoon,
            _ => TimeOfDay::Evening,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeOfDay::Morning => "morning",
            TimeOfDay::Afternoon => "afternoon",
            TimeOfDay::Evening => "evening",
        }
    }
}

/// A busy interval on a user's calendar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl CalendarEvent {
    pub fn new(start_time: DateTime<Utc>, end_time: DateTime<Utc>) -> Self {
        Self {
            id: None,
            title: None,
            start_time,
            end_time,
        }
    }

    /// Inclusive at both ends.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start_time <= instant && instant <= self.end_time
    }

    /// Whether the event touches the closed range `[start, end]`.
    pub fn intersects(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.start_time <= end && self.end_time >= start
    }
}

/// Raw partner attributes; every field is optional on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecord {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub love_language: Option<String>,
    #[serde(default)]
    pub communication_style: Option<String>,
    #[serde(default)]
    pub favorite_activities: Option<Vec<String>>,
    #[serde(default)]
    pub budget_comfort: Option<String>,
    #[serde(default)]
    pub energy_level: Option<String>,
    #[serde(default)]
    pub long_distance: Option<bool>,
}

/// A persisted need response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionRecord {
    pub id: String,
    pub need_id: String,
    pub requester_id: String,
    pub receiver_id: String,
    pub need_category: NeedCategory,
    pub response: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

/// Which suggestion the receiver acted on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionUsage {
    pub used_index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
    pub used_at: DateTime<Utc>,
}
