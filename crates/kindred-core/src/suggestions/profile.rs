//! Partner attributes with defaults applied once, up front.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::types::{BudgetComfort, CommunicationStyle, EnergyLevel, LoveLanguage};
use crate::api::ProfileRecord;

/// Fallbacks for attributes a partner has not filled in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileDefaults {
    pub love_language: LoveLanguage,
    pub communication_style: CommunicationStyle,
    pub partner_name: String,
}

impl Default for ProfileDefaults {
    fn default() -> Self {
        Self {
            love_language: LoveLanguage::QualityTime,
            communication_style: CommunicationStyle::Gentle,
            partner_name: "them".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartnerProfile {
    pub name: String,
    pub love_language: LoveLanguage,
    pub communication_style: CommunicationStyle,
    #[serde(default)]
    pub favorite_activities: Vec<String>,
    #[serde(default)]
    pub budget_comfort: Option<BudgetComfort>,
    #[serde(default)]
    pub energy_level: Option<EnergyLevel>,
    #[serde(default)]
    pub long_distance: bool,
}

impl Default for PartnerProfile {
    fn default() -> Self {
        Self::from_defaults(&ProfileDefaults::default())
    }
}

impl PartnerProfile {
    pub fn from_defaults(defaults: &ProfileDefaults) -> Self {
        Self {
            name: defaults.partner_name.clone(),
            love_language: defaults.love_language,
            communication_style: defaults.communication_style,
            favorite_activities: Vec::new(),
            budget_comfort: None,
            energy_level: None,
            long_distance: false,
        }
    }

    /// Merge a raw record over `defaults`. Blank or unrecognized values fall
    /// back to the default for that field.
    pub fn resolve(record: Option<&ProfileRecord>, defaults: &ProfileDefaults) -> Self {
        let mut profile = Self::from_defaults(defaults);
        let Some(record) = record else {
            return profile;
        };

        if let Some(name) = non_blank(record.display_name.as_deref()) {
            profile.name = name.to_string();
        }
        if let Some(raw) = non_blank(record.love_language.as_deref()) {
            match raw.parse() {
                Ok(ll) => profile.love_language = ll,
                Err(err) => debug!("profile love language ignored: {err}"),
            }
        }
        if let Some(raw) = non_blank(record.communication_style.as_deref()) {
            match raw.parse() {
                Ok(style) => profile.communication_style = style,
                Err(err) => debug!("profile communication style ignored: {err}"),
            }
        }
        profile.favorite_activities = record
            .favorite_activities
            .iter()
            .flatten()
            .map(|a| a.trim())
            .filter(|a| !a.is_empty())
            .map(str::to_string)
            .collect();
        profile.budget_comfort = non_blank(record.budget_comfort.as_deref()).and_then(|b| b.parse().ok());
        profile.energy_level = non_blank(record.energy_level.as_deref()).and_then(|e| e.parse().ok());
        profile.long_distance = record.long_distance.unwrap_or(false);
        profile
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_record_uses_defaults() {
        let profile = PartnerProfile::resolve(None, &ProfileDefaults::default());
        assert_eq!(profile.name, "them");
        assert_eq!(profile.love_language, LoveLanguage::QualityTime);
        assert_eq!(profile.communication_style, CommunicationStyle::Gentle);
        assert!(!profile.long_distance);
    }

    #[test]
    fn record_fields_override_defaults() {
        let record = ProfileRecord {
            display_name: Some("Jordan".into()),
            love_language: Some("touch".into()),
            communication_style: Some("playful".into()),
            favorite_activities: Some(vec!["hiking".into(), "  ".into()]),
            budget_comfort: Some("splurge".into()),
            energy_level: Some("high".into()),
            long_distance: Some(true),
        };
        let profile = PartnerProfile::resolve(Some(&record), &ProfileDefaults::default());
        assert_eq!(profile.name, "Jordan");
        assert_eq!(profile.love_language, LoveLanguage::Touch);
        assert_eq!(profile.communication_style, CommunicationStyle::Playful);
        assert_eq!(profile.favorite_activities, vec!["hiking".to_string()]);
        assert_eq!(profile.budget_comfort, Some(BudgetComfort::Splurge));
        assert_eq!(profile.energy_level, Some(EnergyLevel::High));
        assert!(profile.long_distance);
    }

    #[test]
    fn unknown_values_fall_back_per_field() {
        let record = ProfileRecord {
            display_name: Some("".into()),
            love_language: Some("telepathy".into()),
            communication_style: Some("direct".into()),
            ..Default::default()
        };
        let defaults = ProfileDefaults {
            partner_name: "your partner".into(),
            ..Default::default()
        };
        let profile = PartnerProfile::resolve(Some(&record), &defaults);
        assert_eq!(profile.name, "your partner");
        assert_eq!(profile.love_language, LoveLanguage::QualityTime);
        assert_eq!(profile.communication_style, CommunicationStyle::Direct);
    }
}
