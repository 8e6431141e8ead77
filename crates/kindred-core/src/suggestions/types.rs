//! Categorical attributes and result types for the suggestion engine.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

fn parse_variant<T: Copy>(
    kind: &'static str,
    value: &str,
    all: &[T],
    as_str: fn(&T) -> &'static str,
) -> Result<T, ValidationError> {
    let needle = value.trim().to_ascii_lowercase();
    all.iter()
        .copied()
        .find(|v| as_str(v) == needle)
        .ok_or_else(|| ValidationError::UnknownVariant {
            kind,
            value: value.to_string(),
        })
}

/// How a partner most naturally gives and receives love.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LoveLanguage {
    /// Words of affirmation
    Words,
    #[default]
    QualityTime,
    /// Receiving gifts
    Gifts,
    /// Acts of service
    Acts,
    /// Physical touch
    Touch,
}

impl LoveLanguage {
    pub const ALL: [LoveLanguage; 5] = [
        LoveLanguage::Words,
        LoveLanguage::QualityTime,
        LoveLanguage::Gifts,
        LoveLanguage::Acts,
        LoveLanguage::Touch,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LoveLanguage::Words => "words",
            LoveLanguage::QualityTime => "quality_time",
            LoveLanguage::Gifts => "gifts",
            LoveLanguage::Acts => "acts",
            LoveLanguage::Touch => "touch",
        }
    }

    /// Human-readable label used inside reasoning sentences
    pub fn display_name(&self) -> &'static str {
        match self {
            LoveLanguage::Words => "words of affirmation",
            LoveLanguage::QualityTime => "quality time",
            LoveLanguage::Gifts => "receiving gifts",
            LoveLanguage::Acts => "acts of service",
            LoveLanguage::Touch => "physical touch",
        }
    }
}

/// Partner's preferred way of being spoken to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CommunicationStyle {
    #[default]
    Gentle,
    Direct,
    Playful,
}

impl CommunicationStyle {
    pub const ALL: [CommunicationStyle; 3] = [
        CommunicationStyle::Gentle,
        CommunicationStyle::Direct,
        CommunicationStyle::Playful,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CommunicationStyle::Gentle => "gentle",
            CommunicationStyle::Direct => "direct",
            CommunicationStyle::Playful => "playful",
        }
    }

    /// The template tone written for this style.
    pub fn tone(&self) -> Tone {
        match self {
            CommunicationStyle::Gentle => Tone::Gentle,
            CommunicationStyle::Direct => Tone::Direct,
            CommunicationStyle::Playful => Tone::Playful,
        }
    }
}

/// One of the four variants every template row carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Gentle,
    Direct,
    Playful,
    Romantic,
}

impl Tone {
    pub const ALL: [Tone; 4] = [Tone::Gentle, Tone::Direct, Tone::Playful, Tone::Romantic];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Gentle => "gentle",
            Tone::Direct => "direct",
            Tone::Playful => "playful",
            Tone::Romantic => "romantic",
        }
    }
}

/// Kind of message a suggestion helps the user send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionType {
    Appreciation,
    CheckIn,
    Affection,
    QualityTime,
    Support,
    Apology,
    Encouragement,
    Reconnect,
}

impl SuggestionType {
    pub const ALL: [SuggestionType; 8] = [
        SuggestionType::Appreciation,
        SuggestionType::CheckIn,
        SuggestionType::Affection,
        SuggestionType::QualityTime,
        SuggestionType::Support,
        SuggestionType::Apology,
        SuggestionType::Encouragement,
        SuggestionType::Reconnect,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SuggestionType::Appreciation => "appreciation",
            SuggestionType::CheckIn => "check_in",
            SuggestionType::Affection => "affection",
            SuggestionType::QualityTime => "quality_time",
            SuggestionType::Support => "support",
            SuggestionType::Apology => "apology",
            SuggestionType::Encouragement => "encouragement",
            SuggestionType::Reconnect => "reconnect",
        }
    }
}

/// What a partner reported as missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NeedCategory {
    Affection,
    Attention,
    Appreciation,
    QualityTime,
    Communication,
    Support,
    Reassurance,
    Intimacy,
    Fun,
    Help,
    Space,
    Other,
}

impl NeedCategory {
    pub const ALL: [NeedCategory; 12] = [
        NeedCategory::Affection,
        NeedCategory::Attention,
        NeedCategory::Appreciation,
        NeedCategory::QualityTime,
        NeedCategory::Communication,
        NeedCategory::Support,
        NeedCategory::Reassurance,
        NeedCategory::Intimacy,
        NeedCategory::Fun,
        NeedCategory::Help,
        NeedCategory::Space,
        NeedCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NeedCategory::Affection => "affection",
            NeedCategory::Attention => "attention",
            NeedCategory::Appreciation => "appreciation",
            NeedCategory::QualityTime => "quality_time",
            NeedCategory::Communication => "communication",
            NeedCategory::Support => "support",
            NeedCategory::Reassurance => "reassurance",
            NeedCategory::Intimacy => "intimacy",
            NeedCategory::Fun => "fun",
            NeedCategory::Help => "help",
            NeedCategory::Space => "space",
            NeedCategory::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    #[default]
    Casual,
    Soon,
    Important,
}

impl Urgency {
    pub const ALL: [Urgency; 3] = [Urgency::Casual, Urgency::Soon, Urgency::Important];

    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Casual => "casual",
            Urgency::Soon => "soon",
            Urgency::Important => "important",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetComfort {
    Free,
    Moderate,
    Splurge,
}

impl BudgetComfort {
    pub const ALL: [BudgetComfort; 3] = [
        BudgetComfort::Free,
        BudgetComfort::Moderate,
        BudgetComfort::Splurge,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetComfort::Free => "free",
            BudgetComfort::Moderate => "moderate",
            BudgetComfort::Splurge => "splurge",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnergyLevel {
    Low,
    Medium,
    High,
}

impl EnergyLevel {
    pub const ALL: [EnergyLevel; 3] = [EnergyLevel::Low, EnergyLevel::Medium, EnergyLevel::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            EnergyLevel::Low => "low",
            EnergyLevel::Medium => "medium",
            EnergyLevel::High => "high",
        }
    }
}

macro_rules! impl_str_conversions {
    ($($ty:ident => $kind:literal),* $(,)?) => {
        $(
            impl FromStr for $ty {
                type Err = ValidationError;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    parse_variant($kind, s, &$ty::ALL, $ty::as_str)
                }
            }

            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )*
    };
}

impl_str_conversions! {
    LoveLanguage => "love language",
    CommunicationStyle => "communication style",
    Tone => "tone",
    SuggestionType => "suggestion type",
    NeedCategory => "need category",
    Urgency => "urgency",
    BudgetComfort => "budget comfort",
    EnergyLevel => "energy level",
}

/// Concrete thing the receiver can do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    GiveSpace,
    CheckInLater,
    PlanTime,
    Gesture,
    Gift,
    HelpOut,
    PhysicalAffection,
    Conversation,
    Activity,
    Reflect,
}

/// A submitted "what's missing" request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelationshipNeed {
    pub id: String,
    pub need_category: NeedCategory,
    #[serde(default)]
    pub context: Option<String>,
    #[serde(default)]
    pub urgency: Urgency,
    pub requester_id: String,
    pub receiver_id: String,
}

impl RelationshipNeed {
    /// Free-text context with surrounding whitespace removed; `None` when blank.
    pub fn trimmed_context(&self) -> Option<&str> {
        self.context
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }
}

/// One candidate message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MessageSuggestion {
    pub tone: Tone,
    pub text: String,
    pub reasoning: String,
    pub love_language_alignment: LoveLanguage,
    pub suggestion_type: SuggestionType,
    /// 0-100
    pub confidence: u8,
}

/// One candidate concrete action.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActionSuggestion {
    pub kind: ActionKind,
    pub description: String,
    pub reasoning: String,
    pub love_language_alignment: LoveLanguage,
}

/// Everything the receiver sees in answer to a [`RelationshipNeed`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NeedResponse {
    pub messages: Vec<MessageSuggestion>,
    pub actions: Vec<ActionSuggestion>,
    pub receiver_summary: String,
    pub reasoning: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safety_note: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wire_names_case_insensitively() {
        assert_eq!("Quality_Time".parse::<LoveLanguage>().unwrap(), LoveLanguage::QualityTime);
        assert_eq!(" check_in ".parse::<SuggestionType>().unwrap(), SuggestionType::CheckIn);
        assert_eq!("space".parse::<NeedCategory>().unwrap(), NeedCategory::Space);
    }

    #[test]
    fn rejects_unknown_variant_with_kind() {
        let err = "telepathy".parse::<LoveLanguage>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown love language 'telepathy'");
    }

    #[test]
    fn serde_names_match_as_str() {
        for category in NeedCategory::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.as_str()));
        }
        for kind in SuggestionType::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
    }

    #[test]
    fn styles_map_to_distinct_tones() {
        let tones: Vec<Tone> = CommunicationStyle::ALL.iter().map(|s| s.tone()).collect();
        assert_eq!(tones, vec![Tone::Gentle, Tone::Direct, Tone::Playful]);
    }

    #[test]
    fn blank_context_is_none() {
        let need = RelationshipNeed {
            id: "n1".into(),
            need_category: NeedCategory::Fun,
            context: Some("   ".into()),
            urgency: Urgency::Casual,
            requester_id: "a".into(),
            receiver_id: "b".into(),
        };
        assert!(need.trimmed_context().is_none());
    }
}
