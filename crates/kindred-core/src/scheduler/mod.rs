//! Availability scheduler for partner notifications.
//!
//! Picks send times for daily questions, needs-suggestion nudges and
//! date-night reminders that do not collide with calendar events:
//! - Reads send-time preferences per user
//! - Checks candidate instants against the calendar of the whole local day
//! - Probes forward in fixed steps when the preferred daily time is taken
//!
//! Read failures never surface: they are logged and treated as "no
//! preferences" or "not busy".

pub mod clock;

use std::sync::Arc;

use chrono::{DateTime, Datelike, Days, Duration, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::api::{CalendarReader, NotificationPreferences, PreferencesReader, TimeOfDay};
pub use clock::{parse_clock_time, weekday_name, LocalClock};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    DailyQuestion,
    NeedsSuggestion,
    DateSuggestion,
}

/// A computed send recommendation. Not persisted here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledNotification {
    pub notification_type: NotificationType,
    pub user_id: String,
    pub scheduled_time: DateTime<Utc>,
    pub reason: String,
}

impl ScheduledNotification {
    pub fn new(
        notification_type: NotificationType,
        user_id: &str,
        scheduled_time: DateTime<Utc>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            notification_type,
            user_id: user_id.to_string(),
            scheduled_time,
            reason: reason.into(),
        }
    }
}

/// Scheduler configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Offset of the users' wall clock from UTC (minutes)
    #[serde(default)]
    pub utc_offset_minutes: i32,
    /// Step between daily-question probes (minutes)
    #[serde(default = "default_probe_step")]
    pub probe_step_minutes: i64,
    /// Latest probe, measured from the preferred time (minutes)
    #[serde(default = "default_probe_ceiling")]
    pub probe_ceiling_minutes: i64,
    /// Days scanned for date suggestions, today included
    #[serde(default = "default_date_scan_days")]
    pub date_scan_days: u32,
    #[serde(default = "default_max_date_suggestions")]
    pub max_date_suggestions: usize,
    #[serde(default = "default_morning_hour")]
    pub morning_hour: u32,
    #[serde(default = "default_afternoon_hour")]
    pub afternoon_hour: u32,
    #[serde(default = "default_evening_hour")]
    pub evening_hour: u32,
}

fn default_probe_step() -> i64 {
    30
}
fn default_probe_ceiling() -> i64 {
    120
}
fn default_date_scan_days() -> u32 {
    7
}
fn default_max_date_suggestions() -> usize {
    3
}
fn default_morning_hour() -> u32 {
    9
}
fn default_afternoon_hour() -> u32 {
    14
}
fn default_evening_hour() -> u32 {
    19
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            utc_offset_minutes: 0,
            probe_step_minutes: default_probe_step(),
            probe_ceiling_minutes: default_probe_ceiling(),
            date_scan_days: default_date_scan_days(),
            max_date_suggestions: default_max_date_suggestions(),
            morning_hour: default_morning_hour(),
            afternoon_hour: default_afternoon_hour(),
            evening_hour: default_evening_hour(),
        }
    }
}

impl SchedulerConfig {
    /// Candidate wall-clock time for a date suggestion.
    pub fn time_for(&self, preference: TimeOfDay) -> Option<NaiveTime> {
        let hour = match preference {
            TimeOfDay::Morning => self.morning_hour,
            TimeOfDay::Afternoon => self.afternoon_hour,
            TimeOfDay::Evening => self.evening_hour,
        };
        NaiveTime::from_hms_opt(hour, 0, 0)
    }
}

pub struct AvailabilityScheduler {
    preferences: Arc<dyn PreferencesReader>,
    calendar: Arc<dyn CalendarReader>,
    config: SchedulerConfig,
}

impl AvailabilityScheduler {
    /// Create a new scheduler with default config
    pub fn new(preferences: Arc<dyn PreferencesReader>, calendar: Arc<dyn CalendarReader>) -> Self {
        Self::with_config(preferences, calendar, SchedulerConfig::default())
    }

    /// Create with custom config
    pub fn with_config(
        preferences: Arc<dyn PreferencesReader>,
        calendar: Arc<dyn CalendarReader>,
        config: SchedulerConfig,
    ) -> Self {
        Self {
            preferences,
            calendar,
            config,
        }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    fn clock(&self) -> LocalClock {
        LocalClock::from_offset_minutes(self.config.utc_offset_minutes)
    }

    async fn load_preferences(&self, user_id: &str) -> Option<NotificationPreferences> {
        match self.preferences.notification_preferences(user_id).await {
            Ok(prefs) => prefs,
            Err(err) => {
                warn!(user_id, "preferences read failed, skipping recommendation: {err}");
                None
            }
        }
    }

    fn parse_preferred(user_id: &str, raw: &str) -> Option<NaiveTime> {
        match parse_clock_time(raw) {
            Ok(time) => Some(time),
            Err(err) => {
                warn!(user_id, "ignoring preference: {err}");
                None
            }
        }
    }

    /// Whether `user_id` has an event covering `instant`, ends included.
    ///
    /// Events are fetched for the whole local day containing `instant`. A
    /// failed read counts as free.
    pub async fn is_busy(&self, user_id: &str, instant: DateTime<Utc>) -> bool {
        let (day_start, day_end) = self.clock().day_bounds(instant);
        match self
            .calendar
            .calendar_events(user_id, day_start, day_end)
            .await
        {
            Ok(events) => events.iter().any(|e| e.contains(instant)),
            Err(err) => {
                warn!(user_id, %instant, "calendar read failed, treating slot as free: {err}");
                false
            }
        }
    }

    async fn is_open_slot(&self, user_id: &str, candidate: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        candidate > now && !self.is_busy(user_id, candidate).await
    }

    pub async fn best_time_for_daily_question(&self, user_id: &str) -> Option<ScheduledNotification> {
        self.best_time_for_daily_question_at(user_id, Utc::now()).await
    }

    /// Preferred daily-question time today if it is free and still ahead,
    /// otherwise the first free probe within the ceiling.
    pub async fn best_time_for_daily_question_at(
        &self,
        user_id: &str,
        now: DateTime<Utc>,
    ) -> Option<ScheduledNotification> {
        let prefs = self.load_preferences(user_id).await?;
        let preferred = Self::parse_preferred(user_id, prefs.daily_question_time.as_deref()?)?;

        let clock = self.clock();
        let base = clock.at(clock.date_of(now), preferred)?;
        let (Some(step), Some(ceiling)) = (
            Duration::try_minutes(self.config.probe_step_minutes.max(1)),
            Duration::try_minutes(self.config.probe_ceiling_minutes.max(0)),
        ) else {
            warn!(
                user_id,
                step = self.config.probe_step_minutes,
                ceiling = self.config.probe_ceiling_minutes,
                "probe window out of range, skipping daily question"
            );
            return None;
        };
        // Probes never leave the day they started on.
        let ceiling = ceiling.min(Duration::days(1));

        let mut shift = Duration::zero();
        while shift <= ceiling {
            let candidate = base.checked_add_signed(shift)?;
            if self.is_open_slot(user_id, candidate, now).await {
                let reason = if shift.is_zero() {
                    "Preferred daily question time".to_string()
                } else {
                    format!(
                        "Shifted {} minutes past preferred time to avoid a calendar conflict",
                        shift.num_minutes()
                    )
                };
                debug!(user_id, %candidate, "daily question slot found");
                return Some(ScheduledNotification::new(
                    NotificationType::DailyQuestion,
                    user_id,
                    candidate,
                    reason,
                ));
            }
            shift = match shift.checked_add(&step) {
                Some(next) => next,
                None => break,
            };
        }

        debug!(user_id, "no free daily question slot within ceiling");
        None
    }

    pub async fn best_times_for_needs_suggestions(&self, user_id: &str) -> Vec<ScheduledNotification> {
        self.best_times_for_needs_suggestions_at(user_id, Utc::now()).await
    }

    /// Preferred suggestion times left today that are free. No probing.
    pub async fn best_times_for_needs_suggestions_at(
        &self,
        user_id: &str,
        now: DateTime<Utc>,
    ) -> Vec<ScheduledNotification> {
        let Some(times) = self
            .load_preferences(user_id)
            .await
            .and_then(|p| p.needs_suggestion_times)
        else {
            return Vec::new();
        };

        let clock = self.clock();
        let today = clock.date_of(now);
        let mut scheduled = Vec::new();
        for raw in &times {
            let Some(candidate) = Self::parse_preferred(user_id, raw).and_then(|t| clock.at(today, t))
            else {
                continue;
            };
            if self.is_open_slot(user_id, candidate, now).await {
                scheduled.push(ScheduledNotification::new(
                    NotificationType::NeedsSuggestion,
                    user_id,
                    candidate,
                    "Preferred suggestion time",
                ));
            }
        }
        scheduled
    }

    pub async fn best_times_for_date_suggestions(
        &self,
        user_id: &str,
        partner_id: Option<&str>,
    ) -> Vec<ScheduledNotification> {
        self.best_times_for_date_suggestions_at(user_id, partner_id, Utc::now())
            .await
    }

    /// Upcoming preferred days on which the user (and partner, if given) is
    /// free at the preferred time of day, in day order.
    pub async fn best_times_for_date_suggestions_at(
        &self,
        user_id: &str,
        partner_id: Option<&str>,
        now: DateTime<Utc>,
    ) -> Vec<ScheduledNotification> {
        let Some(prefs) = self.load_preferences(user_id).await else {
            return Vec::new();
        };
        let days: Vec<String> = prefs
            .date_suggestion_days
            .iter()
            .flatten()
            .map(|d| d.trim().to_ascii_lowercase())
            .collect();
        if days.is_empty() {
            return Vec::new();
        }
        let preference = prefs.time_preference();
        let Some(time) = self.config.time_for(preference) else {
            warn!(user_id, "configured {} hour is out of range", preference.as_str());
            return Vec::new();
        };

        let clock = self.clock();
        let today = clock.date_of(now);
        let mut scheduled = Vec::new();
        for offset in 0..self.config.date_scan_days {
            if scheduled.len() >= self.config.max_date_suggestions {
                break;
            }
            let Some(date) = today.checked_add_days(Days::new(u64::from(offset))) else {
                break;
            };
            let day_name = weekday_name(date.weekday());
            if !days.iter().any(|d| d == day_name) {
                continue;
            }
            let Some(candidate) = clock.at(date, time) else {
                continue;
            };
            if !self.is_open_slot(user_id, candidate, now).await {
                continue;
            }
            if let Some(partner) = partner_id {
                if self.is_busy(partner, candidate).await {
                    debug!(user_id, partner, %candidate, "partner busy, skipping day");
                    continue;
                }
            }

            let mut label = day_name.to_string();
            label[..1].make_ascii_uppercase();
            let reason = match partner_id {
                Some(_) => format!("Both partners are free on {label} {}", preference.as_str()),
                None => format!("Free on {label} {}", preference.as_str()),
            };
            scheduled.push(ScheduledNotification::new(
                NotificationType::DateSuggestion,
                user_id,
                candidate,
                reason,
            ));
        }
        scheduled
    }
}
