//! Date-night ideas.
//!
//! A fixed idea list stands in for a generative step; selection is a
//! filtered first-match, not a search.

use serde::{Deserialize, Serialize};

use super::profile::PartnerProfile;
use super::types::{BudgetComfort, LoveLanguage};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateSuggestion {
    pub title: String,
    pub description: String,
    pub love_language_alignment: LoveLanguage,
    pub long_distance_friendly: bool,
    pub estimated_cost: BudgetComfort,
}

struct DateIdea {
    title: &'static str,
    description: &'static str,
    love_language: LoveLanguage,
    long_distance_friendly: bool,
    cost: BudgetComfort,
}

const DATE_IDEAS: &[DateIdea] = &[
    DateIdea {
        title: "Phone-free picnic",
        description: "Pack a simple picnic, leave the phones in the bag, and spend an unhurried afternoon just talking.",
        love_language: LoveLanguage::QualityTime,
        long_distance_friendly: false,
        cost: BudgetComfort::Free,
    },
    DateIdea {
        title: "Memory lane dinner",
        description: "Cook dinner together and take turns sharing a favorite memory of each other between courses.",
        love_language: LoveLanguage::Words,
        long_distance_friendly: false,
        cost: BudgetComfort::Moderate,
    },
    DateIdea {
        title: "Thrift-store gift swap",
        description: "Set a small budget, split up in a thrift store, and surprise each other with the perfect find.",
        love_language: LoveLanguage::Gifts,
        long_distance_friendly: false,
        cost: BudgetComfort::Moderate,
    },
    DateIdea {
        title: "Favorite-meal night",
        description: "Prepare their favorite meal from scratch while they relax, then clean up together.",
        love_language: LoveLanguage::Acts,
        long_distance_friendly: false,
        cost: BudgetComfort::Moderate,
    },
    DateIdea {
        title: "Massage and slow dance night in",
        description: "Dim the lights, trade back rubs, and end the evening with a slow dance in the living room.",
        love_language: LoveLanguage::Touch,
        long_distance_friendly: false,
        cost: BudgetComfort::Free,
    },
    DateIdea {
        title: "Watch-party date",
        description: "Start the same movie at the same time on a video call and keep the call open the whole way through.",
        love_language: LoveLanguage::QualityTime,
        long_distance_friendly: true,
        cost: BudgetComfort::Free,
    },
    DateIdea {
        title: "Open-when letters",
        description: "Write a few letters labeled for specific moments, like \"open when you miss me\", and mail them.",
        love_language: LoveLanguage::Words,
        long_distance_friendly: true,
        cost: BudgetComfort::Free,
    },
    DateIdea {
        title: "Surprise delivery",
        description: "Have their favorite treat delivered and open a video call so you can watch them unwrap it.",
        love_language: LoveLanguage::Gifts,
        long_distance_friendly: true,
        cost: BudgetComfort::Moderate,
    },
];

impl DateIdea {
    fn to_suggestion(&self) -> DateSuggestion {
        DateSuggestion {
            title: self.title.to_string(),
            description: self.description.to_string(),
            love_language_alignment: self.love_language,
            long_distance_friendly: self.long_distance_friendly,
            estimated_cost: self.cost,
        }
    }
}

/// First idea matching the profile's love language; long-distance profiles
/// only see long-distance ideas and fall back to the first of those.
pub fn generate_date_suggestion(profile: &PartnerProfile) -> Option<DateSuggestion> {
    let compatible = |idea: &&DateIdea| !profile.long_distance || idea.long_distance_friendly;

    DATE_IDEAS
        .iter()
        .filter(compatible)
        .find(|idea| idea.love_language == profile.love_language)
        .or_else(|| DATE_IDEAS.iter().find(compatible))
        .map(DateIdea::to_suggestion)
}
