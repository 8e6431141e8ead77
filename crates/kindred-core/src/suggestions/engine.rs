//! Suggestion engine: message suggestions, refreshes and persistence.

use std::sync::{Arc, Mutex};

use chrono::Utc;
use rand::prelude::*;
use rand_pcg::Mcg128Xsl64;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::dates::{generate_date_suggestion, DateSuggestion};
use super::needs::generate_need_response;
use super::profile::{PartnerProfile, ProfileDefaults};
use super::templates::template;
use super::types::{
    CommunicationStyle, LoveLanguage, MessageSuggestion, NeedResponse, RelationshipNeed,
    SuggestionType, Tone,
};
use crate::api::{ProfileReader, SuggestionRecord, SuggestionStore, SuggestionUsage};
use crate::error::Result;

pub const PRIMARY_CONFIDENCE: u8 = 90;
pub const ALTERNATIVE_CONFIDENCE: u8 = 70;
pub const REFRESH_REQUESTED_CONFIDENCE: u8 = 80;
pub const REFRESH_EXTRA_CONFIDENCE: u8 = 60;
/// Suggestion types returned by a refresh, including the requested one.
pub const REFRESH_COUNT: usize = 3;

/// What the engine knows about the partner a message is for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageContext {
    pub love_language: LoveLanguage,
    pub communication_style: CommunicationStyle,
    #[serde(default)]
    pub partner_name: Option<String>,
    /// Optional free-text situation description
    #[serde(default)]
    pub extra: Option<String>,
}

impl From<&PartnerProfile> for MessageContext {
    fn from(profile: &PartnerProfile) -> Self {
        Self {
            love_language: profile.love_language,
            communication_style: profile.communication_style,
            partner_name: Some(profile.name.clone()),
            extra: None,
        }
    }
}

pub struct SuggestionEngine {
    profiles: Arc<dyn ProfileReader>,
    store: Arc<dyn SuggestionStore>,
    defaults: ProfileDefaults,
    rng: Mutex<Mcg128Xsl64>,
}

impl SuggestionEngine {
    /// Create an engine seeded from OS entropy.
    pub fn new(profiles: Arc<dyn ProfileReader>, store: Arc<dyn SuggestionStore>) -> Self {
        Self::with_rng(profiles, store, Mcg128Xsl64::from_entropy())
    }

    /// Create an engine whose random choices are reproducible.
    pub fn with_seed(
        profiles: Arc<dyn ProfileReader>,
        store: Arc<dyn SuggestionStore>,
        seed: u64,
    ) -> Self {
        Self::with_rng(profiles, store, Mcg128Xsl64::seed_from_u64(seed))
    }

    fn with_rng(
        profiles: Arc<dyn ProfileReader>,
        store: Arc<dyn SuggestionStore>,
        rng: Mcg128Xsl64,
    ) -> Self {
        Self {
            profiles,
            store,
            defaults: ProfileDefaults::default(),
            rng: Mutex::new(rng),
        }
    }

    pub fn with_defaults(mut self, defaults: ProfileDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn defaults(&self) -> &ProfileDefaults {
        &self.defaults
    }

    /// One primary suggestion in the partner's own tone and one alternative
    /// in each of the other two communication-style tones.
    pub fn generate_message_suggestions(
        &self,
        context: &MessageContext,
        suggestion_type: SuggestionType,
    ) -> Vec<MessageSuggestion> {
        let row = template(context.love_language, suggestion_type);
        let name = context
            .partner_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(self.defaults.partner_name.as_str());
        let extra = context
            .extra
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty());
        let primary = context.communication_style;

        let reasoning = |style: CommunicationStyle, is_primary: bool| {
            let mut text = if is_primary {
                format!(
                    "Matches their {} communication style and their love language, {}.",
                    style.as_str(),
                    context.love_language.display_name()
                )
            } else {
                format!(
                    "A {} alternative in case the moment calls for a different tone.",
                    style.as_str()
                )
            };
            if let Some(extra) = extra {
                text.push_str(&format!(" Written with your note in mind: \"{extra}\"."));
            }
            text
        };

        std::iter::once(primary)
            .chain(CommunicationStyle::ALL.into_iter().filter(|s| *s != primary))
            .map(|style| {
                let is_primary = style == primary;
                MessageSuggestion {
                    tone: style.tone(),
                    text: row.render(style.tone(), name),
                    reasoning: reasoning(style, is_primary),
                    love_language_alignment: context.love_language,
                    suggestion_type,
                    confidence: if is_primary {
                        PRIMARY_CONFIDENCE
                    } else {
                        ALTERNATIVE_CONFIDENCE
                    },
                }
            })
            .collect()
    }

    /// Fresh set of suggestions for `target`: the requested type plus two
    /// random others, each in a random tone. Profile read failures yield an
    /// empty list.
    pub async fn refresh_suggestions(
        &self,
        suggestion_type: SuggestionType,
        user_id: &str,
        target_id: &str,
    ) -> Vec<MessageSuggestion> {
        let record = match self.profiles.partner_profile(target_id).await {
            Ok(record) => record,
            Err(err) => {
                warn!(user_id, target_id, "profile read failed, returning no suggestions: {err}");
                return Vec::new();
            }
        };
        let profile = PartnerProfile::resolve(record.as_ref(), &self.defaults);

        let picks: Vec<(SuggestionType, Tone)> = {
            let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
            let others: Vec<SuggestionType> = SuggestionType::ALL
                .into_iter()
                .filter(|t| *t != suggestion_type)
                .collect();
            std::iter::once(suggestion_type)
                .chain(
                    others
                        .choose_multiple(&mut *rng, REFRESH_COUNT - 1)
                        .copied()
                        .collect::<Vec<_>>(),
                )
                .map(|kind| (kind, *Tone::ALL.choose(&mut *rng).unwrap_or(&Tone::Gentle)))
                .collect()
        };

        picks
            .into_iter()
            .map(|(kind, tone)| MessageSuggestion {
                tone,
                text: template(profile.love_language, kind).render(tone, &profile.name),
                reasoning: format!(
                    "A {} {} idea shaped for {}.",
                    tone.as_str(),
                    kind.as_str().replace('_', " "),
                    profile.love_language.display_name()
                ),
                love_language_alignment: profile.love_language,
                suggestion_type: kind,
                confidence: if kind == suggestion_type {
                    REFRESH_REQUESTED_CONFIDENCE
                } else {
                    REFRESH_EXTRA_CONFIDENCE
                },
            })
            .collect()
    }

    pub fn generate_need_response(
        &self,
        need: &RelationshipNeed,
        profile: &PartnerProfile,
    ) -> NeedResponse {
        generate_need_response(need, profile)
    }

    pub fn generate_date_suggestion(&self, profile: &PartnerProfile) -> Option<DateSuggestion> {
        generate_date_suggestion(profile)
    }

    /// Read and resolve a partner profile. Unlike refreshes, errors propagate.
    pub async fn partner_profile(&self, user_id: &str) -> Result<PartnerProfile> {
        let record = self.profiles.partner_profile(user_id).await?;
        Ok(PartnerProfile::resolve(record.as_ref(), &self.defaults))
    }

    /// Persist a need response.
    ///
    /// # Errors
    /// Returns an error if the response cannot be serialized or the store
    /// rejects the write.
    pub async fn store_suggestion(
        &self,
        need: &RelationshipNeed,
        response: &NeedResponse,
    ) -> Result<String> {
        let record = SuggestionRecord {
            id: uuid::Uuid::new_v4().to_string(),
            need_id: need.id.clone(),
            requester_id: need.requester_id.clone(),
            receiver_id: need.receiver_id.clone(),
            need_category: need.need_category,
            response: serde_json::to_value(response)?,
            created_at: Utc::now(),
        };
        let id = self.store.insert_suggestion(&record).await?;
        info!(suggestion_id = %id, need_id = %need.id, "stored need response");
        Ok(id)
    }

    /// Record which suggestion the receiver used.
    ///
    /// # Errors
    /// Returns an error if the store rejects the update.
    pub async fn record_suggestion_usage(
        &self,
        suggestion_id: &str,
        used_index: usize,
        feedback: Option<String>,
    ) -> Result<()> {
        let usage = SuggestionUsage {
            used_index,
            feedback,
            used_at: Utc::now(),
        };
        self.store
            .update_suggestion_usage(suggestion_id, &usage)
            .await?;
        info!(suggestion_id, used_index, "recorded suggestion usage");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{MemoryApi, ProfileRecord};
    use crate::error::{ApiError, CoreError};
    use crate::suggestions::{NeedCategory, Urgency};
    use proptest::prelude::*;
    use proptest::sample::select;
    use std::collections::HashSet;

    fn engine(api: &Arc<MemoryApi>, seed: u64) -> SuggestionEngine {
        SuggestionEngine::with_seed(api.clone(), api.clone(), seed)
    }

    fn context(style: CommunicationStyle) -> MessageContext {
        MessageContext {
            love_language: LoveLanguage::Words,
            communication_style: style,
            partner_name: Some("Riley".into()),
            extra: None,
        }
    }

    #[test]
    fn message_suggestions_are_primary_plus_two_alternatives() {
        let api = Arc::new(MemoryApi::new());
        let suggestions = engine(&api, 1)
            .generate_message_suggestions(&context(CommunicationStyle::Direct), SuggestionType::Appreciation);

        assert_eq!(suggestions.len(), 3);
        assert_eq!(suggestions[0].tone, Tone::Direct);
        assert_eq!(suggestions[0].confidence, PRIMARY_CONFIDENCE);
        assert_eq!(suggestions[1].tone, Tone::Gentle);
        assert_eq!(suggestions[2].tone, Tone::Playful);
        assert!(suggestions[1..].iter().all(|s| s.confidence == ALTERNATIVE_CONFIDENCE));
        assert!(suggestions[1].text.contains("Riley"));
    }

    #[test]
    fn missing_name_renders_default() {
        let api = Arc::new(MemoryApi::new());
        let mut ctx = context(CommunicationStyle::Gentle);
        ctx.partner_name = None;
        let suggestions = engine(&api, 1).generate_message_suggestions(&ctx, SuggestionType::CheckIn);
        assert_eq!(suggestions[0].text, "Hey them, how are you really feeling today?");
    }

    #[test]
    fn extra_context_is_mentioned_in_reasoning() {
        let api = Arc::new(MemoryApi::new());
        let mut ctx = context(CommunicationStyle::Playful);
        ctx.extra = Some("rough week at work".into());
        let suggestions = engine(&api, 1).generate_message_suggestions(&ctx, SuggestionType::Support);
        assert!(suggestions.iter().all(|s| s.reasoning.contains("rough week at work")));
    }

    proptest! {
        #[test]
        fn message_suggestion_shape_holds_for_every_input(
            ll in select(LoveLanguage::ALL.to_vec()),
            style in select(CommunicationStyle::ALL.to_vec()),
            kind in select(SuggestionType::ALL.to_vec()),
        ) {
            let api = Arc::new(MemoryApi::new());
            let ctx = MessageContext { love_language: ll, communication_style: style, partner_name: None, extra: None };
            let suggestions = engine(&api, 7).generate_message_suggestions(&ctx, kind);
            prop_assert_eq!(suggestions.len(), 3);
            prop_assert_eq!(suggestions[0].tone, style.tone());
            prop_assert_eq!(suggestions[0].confidence, 90);
            let tones: HashSet<Tone> = suggestions.iter().map(|s| s.tone).collect();
            prop_assert_eq!(tones.len(), 3);
            prop_assert!(!tones.contains(&Tone::Romantic));
            prop_assert!(suggestions.iter().all(|s| s.confidence <= 100 && s.suggestion_type == kind));
        }
    }

    #[tokio::test]
    async fn refresh_returns_requested_type_first_and_distinct_types() {
        let api = Arc::new(MemoryApi::new());
        api.set_profile(
            "partner",
            ProfileRecord {
                display_name: Some("Casey".into()),
                love_language: Some("acts".into()),
                ..Default::default()
            },
        );
        let suggestions = engine(&api, 99)
            .refresh_suggestions(SuggestionType::Apology, "me", "partner")
            .await;

        assert_eq!(suggestions.len(), REFRESH_COUNT);
        assert_eq!(suggestions[0].suggestion_type, SuggestionType::Apology);
        let kinds: HashSet<SuggestionType> = suggestions.iter().map(|s| s.suggestion_type).collect();
        assert_eq!(kinds.len(), REFRESH_COUNT);
        assert!(suggestions.iter().all(|s| s.love_language_alignment == LoveLanguage::Acts));
        assert!(suggestions.iter().all(|s| !s.text.contains("{name}")));
    }

    #[tokio::test]
    async fn refresh_is_deterministic_for_a_seed() {
        let api = Arc::new(MemoryApi::new());
        let first = engine(&api, 5)
            .refresh_suggestions(SuggestionType::Reconnect, "me", "partner")
            .await;
        let second = engine(&api, 5)
            .refresh_suggestions(SuggestionType::Reconnect, "me", "partner")
            .await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn refresh_uses_defaults_for_missing_profile() {
        let api = Arc::new(MemoryApi::new());
        let suggestions = engine(&api, 3)
            .refresh_suggestions(SuggestionType::Affection, "me", "nobody")
            .await;
        assert_eq!(suggestions.len(), 3);
        assert!(suggestions
            .iter()
            .all(|s| s.love_language_alignment == LoveLanguage::QualityTime));
    }

    #[tokio::test]
    async fn refresh_swallows_read_failures() {
        let api = Arc::new(MemoryApi::new());
        api.set_failing(true);
        let suggestions = engine(&api, 3)
            .refresh_suggestions(SuggestionType::Affection, "me", "partner")
            .await;
        assert!(suggestions.is_empty());
    }

    fn sample_need() -> RelationshipNeed {
        RelationshipNeed {
            id: "need-42".into(),
            need_category: NeedCategory::QualityTime,
            context: None,
            urgency: Urgency::Soon,
            requester_id: "alice".into(),
            receiver_id: "bob".into(),
        }
    }

    #[tokio::test]
    async fn store_and_record_usage_round_trip() {
        let api = Arc::new(MemoryApi::new());
        let engine = engine(&api, 1);
        let need = sample_need();
        let response = engine.generate_need_response(&need, &PartnerProfile::default());

        let id = engine.store_suggestion(&need, &response).await.unwrap();
        let stored = api.stored_suggestions();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, id);
        assert_eq!(stored[0].need_id, "need-42");
        assert_eq!(stored[0].response["receiver_summary"], response.receiver_summary);

        engine
            .record_suggestion_usage(&id, 2, Some("worked".into()))
            .await
            .unwrap();
        let usage = api.usage_for(&id).unwrap();
        assert_eq!(usage.used_index, 2);
        assert_eq!(usage.feedback.as_deref(), Some("worked"));
    }

    #[tokio::test]
    async fn write_failures_propagate() {
        let api = Arc::new(MemoryApi::new());
        let engine = engine(&api, 1);
        let need = sample_need();
        let response = engine.generate_need_response(&need, &PartnerProfile::default());

        api.set_failing(true);
        let err = engine.store_suggestion(&need, &response).await.unwrap_err();
        assert!(matches!(err, CoreError::Api(ApiError::Unavailable(_))));

        let err = engine.record_suggestion_usage("any", 0, None).await.unwrap_err();
        assert!(matches!(err, CoreError::Api(_)));
    }
}
