//! # Kindred Core Library
//!
//! Relationship-nudge engine for a couples app. It decides when to send a
//! partner a notification and what to suggest they say or do.
//!
//! ## Architecture
//!
//! - **Scheduler**: calendar-aware send times for daily questions,
//!   needs-suggestion nudges and date reminders
//! - **Suggestions**: template-driven messages, actions and date ideas keyed
//!   by love language and communication style
//! - **API**: async collaborator traits with a REST client and an in-memory
//!   fixture backend
//! - **Config**: TOML configuration at `~/.config/kindred/config.toml`
//!
//! ## Key Components
//!
//! - [`AvailabilityScheduler`]: notification timing
//! - [`SuggestionEngine`]: message suggestions, refreshes and persistence
//! - [`RestClient`] / [`MemoryApi`]: collaborator implementations
//! - [`Config`]: application configuration management

pub mod api;
pub mod config;
pub mod error;
pub mod scheduler;
pub mod suggestions;

pub use api::{CalendarEvent, MemoryApi, NotificationPreferences, RestClient};
pub use config::Config;
pub use error::{ApiError, ConfigError, CoreError, ValidationError};
pub use scheduler::{AvailabilityScheduler, NotificationType, ScheduledNotification, SchedulerConfig};
pub use suggestions::{
    CommunicationStyle, LoveLanguage, MessageContext, NeedCategory, NeedResponse, PartnerProfile,
    RelationshipNeed, SuggestionEngine, SuggestionType,
};
