//! External collaborators: preferences, calendar, profiles, suggestion store.
//!
//! The scheduler and the suggestion engine only see the traits in
//! [`traits`]. [`RestClient`] talks to the application's REST backend and
//! [`MemoryApi`] serves a local fixture.

pub mod memory;
pub mod rest;
pub mod traits;
pub mod types;

pub use memory::{Fixture, MemoryApi};
pub use rest::RestClient;
pub use traits::{CalendarReader, PreferencesReader, ProfileReader, SuggestionStore};
pub use types::{
    CalendarEvent, NotificationPreferences, ProfileRecord, SuggestionRecord, SuggestionUsage,
    TimeOfDay,
};
