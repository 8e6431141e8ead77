//! Template-driven message and action suggestions.
//!
//! - [`templates`]: the static (love language × suggestion type) table
//! - [`engine`]: message suggestions, refreshes, persistence
//! - [`needs`]: responses to a submitted relationship need
//! - [`dates`]: date-night ideas

pub mod dates;
pub mod engine;
pub mod needs;
pub mod profile;
pub mod templates;
pub mod types;

pub use dates::{generate_date_suggestion, DateSuggestion};
pub use engine::{MessageContext, SuggestionEngine};
pub use needs::generate_need_response;
pub use profile::{PartnerProfile, ProfileDefaults};
pub use templates::{get_all_variations, need_category_suggestion_type, template, SuggestionTemplate};
pub use types::{
    ActionKind, ActionSuggestion, BudgetComfort, CommunicationStyle, EnergyLevel, LoveLanguage,
    MessageSuggestion, NeedCategory, NeedResponse, RelationshipNeed, SuggestionType, Tone, Urgency,
};
