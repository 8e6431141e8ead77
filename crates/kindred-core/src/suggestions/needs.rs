//! Responses to a partner's "what's missing" request.
//!
//! `space` short-circuits to a fixed response. Every other category is
//! assembled from category phrasing, the requester's love language, the
//! optional free-text context and a few secondary profile attributes.

use super::profile::PartnerProfile;
use super::templates::{need_category_suggestion_type, template};
use super::types::{
    ActionKind, ActionSuggestion, BudgetComfort, CommunicationStyle, EnergyLevel, LoveLanguage,
    MessageSuggestion, NeedCategory, NeedResponse, RelationshipNeed, Tone, Urgency,
};

pub const MAX_MESSAGES: usize = 3;
pub const MAX_ACTIONS: usize = 3;
/// Characters of context echoed inside a message.
pub const MESSAGE_CONTEXT_CHARS: usize = 100;
/// Characters of context shown in the receiver summary.
pub const SUMMARY_CONTEXT_CHARS: usize = 50;

pub const IMPORTANT_SAFETY_NOTE: &str = "This matters a lot to your partner right now. Make time to talk soon, and if things ever feel unsafe or overwhelming, reaching out to a counselor is a good step.";
pub const SPACE_SAFETY_NOTE: &str = "Giving space is an act of care. If you're ever worried about their wellbeing, it's okay to check in gently or reach out for support.";

/// Cut `text` to at most `max` characters, appending `...` when cut.
pub fn truncate_with_ellipsis(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max).collect();
    format!("{}...", cut.trim_end())
}

pub fn generate_need_response(need: &RelationshipNeed, profile: &PartnerProfile) -> NeedResponse {
    if need.need_category == NeedCategory::Space {
        return space_response(profile);
    }

    let context = need.trimmed_context();
    NeedResponse {
        messages: build_messages(need.need_category, context, profile),
        actions: build_actions(need.need_category, profile),
        receiver_summary: receiver_summary(need.need_category, context, profile.communication_style),
        reasoning: build_reasoning(profile, context.is_some()),
        safety_note: (need.urgency == Urgency::Important).then(|| IMPORTANT_SAFETY_NOTE.to_string()),
    }
}

fn space_response(profile: &PartnerProfile) -> NeedResponse {
    let ll = profile.love_language;
    NeedResponse {
        messages: vec![MessageSuggestion {
            tone: Tone::Gentle,
            text: "Take all the time you need. I'm here whenever you're ready.".to_string(),
            reasoning: "A short, pressure-free message respects their need for room while letting them know you're still there.".to_string(),
            love_language_alignment: ll,
            suggestion_type: need_category_suggestion_type(NeedCategory::Space),
            confidence: 90,
        }],
        actions: vec![
            ActionSuggestion {
                kind: ActionKind::GiveSpace,
                description: "Give them room today. Hold off on big conversations and let them reach out first.".to_string(),
                reasoning: "Asking for space usually means they need time to recharge or think.".to_string(),
                love_language_alignment: ll,
            },
            ActionSuggestion {
                kind: ActionKind::CheckInLater,
                description: "Check in after 24-48 hours with a short, low-pressure message.".to_string(),
                reasoning: "A gentle check-in shows you care without crowding them.".to_string(),
                love_language_alignment: ll,
            },
        ],
        receiver_summary: "Your partner needs a little space right now. It isn't about you, and giving them room is the kindest response.".to_string(),
        reasoning: "Space requests are best met with patience, so these suggestions stay simple on purpose.".to_string(),
        safety_note: Some(SPACE_SAFETY_NOTE.to_string()),
    }
}

fn category_opener(category: NeedCategory) -> &'static str {
    match category {
        NeedCategory::Affection => "I've been thinking about how much I love being close to you.",
        NeedCategory::Attention => "I want you to have my full attention. I'm here.",
        NeedCategory::Appreciation => "I don't say it enough. I really appreciate you.",
        NeedCategory::QualityTime => "I've been missing our time together too.",
        NeedCategory::Communication => "I want to hear what's on your mind, openly and without judgment.",
        NeedCategory::Support => "I'm here for you. Whatever you need, we'll handle it together.",
        NeedCategory::Reassurance => "I'm here, I'm committed to us, and that isn't changing.",
        NeedCategory::Intimacy => "I've been missing feeling close to you too.",
        NeedCategory::Fun => "We need more fun together. Let's make it happen.",
        NeedCategory::Help => "Let me help. You don't have to do it all alone.",
        NeedCategory::Space => "Take all the time you need.",
        NeedCategory::Other => "I can tell something's on your mind, and I'm listening.",
    }
}

fn love_language_line(ll: LoveLanguage) -> &'static str {
    match ll {
        LoveLanguage::Words => "You mean the world to me, and I want you to hear that every day.",
        LoveLanguage::QualityTime => "Let's set aside time this week that's just for us.",
        LoveLanguage::Gifts => "I'm planning a little surprise to show you I've been thinking of you.",
        LoveLanguage::Acts => "Tell me one thing I can take off your plate this week.",
        LoveLanguage::Touch => "Come here. I could use a long hug with you, and I think you could too.",
    }
}

fn build_messages(
    category: NeedCategory,
    context: Option<&str>,
    profile: &PartnerProfile,
) -> Vec<MessageSuggestion> {
    let ll = profile.love_language;
    let suggestion_type = need_category_suggestion_type(category);
    let primary_tone = profile.communication_style.tone();
    let message = |text: String, reasoning: &str, confidence: u8| MessageSuggestion {
        tone: primary_tone,
        text,
        reasoning: reasoning.to_string(),
        love_language_alignment: ll,
        suggestion_type,
        confidence,
    };

    let opener = category_opener(category);
    let mut messages = vec![match context {
        Some(ctx) => message(
            format!(
                "{opener} You mentioned: \"{}\"",
                truncate_with_ellipsis(ctx, MESSAGE_CONTEXT_CHARS)
            ),
            "Acknowledges exactly what they shared, in their own words.",
            85,
        ),
        None => message(
            opener.to_string(),
            "Names the need directly so they feel heard.",
            85,
        ),
    }];

    messages.push(message(
        love_language_line(ll).to_string(),
        &format!("Speaks to their love language, {}.", ll.display_name()),
        80,
    ));

    if context.is_some() {
        messages.push(message(
            "Can we talk more tonight about what you shared? I want to understand it better.".to_string(),
            "Invites a follow-up conversation about their specific concern.",
            75,
        ));
    }

    if messages.len() < MAX_MESSAGES {
        let row = template(ll, suggestion_type);
        messages.extend(
            CommunicationStyle::ALL
                .iter()
                .filter(|s| **s != profile.communication_style)
                .map(|s| MessageSuggestion {
                    tone: s.tone(),
                    text: row.render(s.tone(), &profile.name),
                    reasoning: format!("An alternative {} take on the same message.", s.as_str()),
                    love_language_alignment: ll,
                    suggestion_type,
                    confidence: 65,
                }),
        );
    }

    messages.truncate(MAX_MESSAGES);
    messages
}

fn category_action(category: NeedCategory) -> Option<(ActionKind, &'static str)> {
    let action = match category {
        NeedCategory::Affection => (
            ActionKind::PhysicalAffection,
            "Offer unprompted affection today: a long hug, holding hands, a kiss goodbye.",
        ),
        NeedCategory::Attention => (
            ActionKind::Conversation,
            "Put your phone away for twenty minutes tonight and give them your full attention.",
        ),
        NeedCategory::Appreciation => (
            ActionKind::Gesture,
            "Name three specific things they did this week that you're grateful for.",
        ),
        NeedCategory::QualityTime => (
            ActionKind::PlanTime,
            "Block out an evening this week for just the two of you.",
        ),
        NeedCategory::Communication => (
            ActionKind::Conversation,
            "Set up a calm, phone-free conversation about how things are going between you.",
        ),
        NeedCategory::Support => (
            ActionKind::HelpOut,
            "Ask what would help most right now, then do exactly that.",
        ),
        NeedCategory::Reassurance => (
            ActionKind::Conversation,
            "Tell them plainly that you're committed, and follow through on one small promise today.",
        ),
        NeedCategory::Intimacy => (
            ActionKind::PlanTime,
            "Plan an unhurried evening together with no chores and no screens.",
        ),
        NeedCategory::Fun => (
            ActionKind::Activity,
            "Plan something playful this week, like a game night or trying something new together.",
        ),
        NeedCategory::Help => (
            ActionKind::HelpOut,
            "Take one recurring chore off their plate this week without being asked.",
        ),
        NeedCategory::Space | NeedCategory::Other => return None,
    };
    Some(action)
}

fn budget_action(budget: BudgetComfort) -> (ActionKind, &'static str) {
    match budget {
        BudgetComfort::Free => (
            ActionKind::Gesture,
            "Write a heartfelt note or plan a free outing like a sunset walk.",
        ),
        BudgetComfort::Moderate => (
            ActionKind::Gift,
            "Pick up a small thoughtful gift, like their favorite treat.",
        ),
        BudgetComfort::Splurge => (
            ActionKind::Gift,
            "Book something special, like a nice dinner or an experience they've wanted to try.",
        ),
    }
}

fn energy_action(energy: EnergyLevel) -> (ActionKind, &'static str) {
    match energy {
        EnergyLevel::Low => (
            ActionKind::PlanTime,
            "Keep it cozy with a quiet night in and their favorite movie.",
        ),
        EnergyLevel::Medium => (
            ActionKind::Activity,
            "Go for a relaxed walk or cook dinner together.",
        ),
        EnergyLevel::High => (
            ActionKind::Activity,
            "Try an active date: a hike, dancing, or a bike ride.",
        ),
    }
}

fn build_actions(category: NeedCategory, profile: &PartnerProfile) -> Vec<ActionSuggestion> {
    let ll = profile.love_language;
    let action = |(kind, description): (ActionKind, &str), reasoning: String| ActionSuggestion {
        kind,
        description: description.to_string(),
        reasoning,
        love_language_alignment: ll,
    };

    let mut actions = Vec::with_capacity(MAX_ACTIONS);
    match category_action(category) {
        Some(a) => actions.push(action(a, format!("Directly addresses their need for {}.", category_label(category)))),
        None => actions.push(action(
            (
                ActionKind::Reflect,
                "Ask them gently what would help most right now, and listen without trying to fix it.",
            ),
            "When the need isn't specific, listening is the best first step.".to_string(),
        )),
    }

    if let Some(activity) = profile.favorite_activities.first() {
        let description = format!("Plan some {activity} together this week.");
        actions.push(ActionSuggestion {
            kind: ActionKind::Activity,
            description,
            reasoning: format!("They've said they love {activity}."),
            love_language_alignment: ll,
        });
    }
    if let Some(budget) = profile.budget_comfort {
        actions.push(action(
            budget_action(budget),
            format!("Fits a {} budget.", budget.as_str()),
        ));
    }
    if let Some(energy) = profile.energy_level {
        actions.push(action(
            energy_action(energy),
            format!("Matches their {} energy level lately.", energy.as_str()),
        ));
    }

    actions.truncate(MAX_ACTIONS);
    actions
}

fn category_label(category: NeedCategory) -> &'static str {
    match category {
        NeedCategory::QualityTime => "quality time",
        other => other.as_str(),
    }
}

fn category_summary(category: NeedCategory) -> &'static str {
    match category {
        NeedCategory::Affection => "Your partner would love a little more affection.",
        NeedCategory::Attention => "Your partner would like more of your attention.",
        NeedCategory::Appreciation => "Your partner would like to feel more appreciated.",
        NeedCategory::QualityTime => "Your partner is missing quality time with you.",
        NeedCategory::Communication => "Your partner would like to talk more openly.",
        NeedCategory::Support => "Your partner could use your support right now.",
        NeedCategory::Reassurance => "Your partner could use some reassurance about the two of you.",
        NeedCategory::Intimacy => "Your partner is missing closeness and intimacy.",
        NeedCategory::Fun => "Your partner wants more fun together.",
        NeedCategory::Help => "Your partner could use a hand with things.",
        NeedCategory::Space => "Your partner needs a little space right now.",
        NeedCategory::Other => "Your partner has something on their mind.",
    }
}

fn receiver_summary(
    category: NeedCategory,
    context: Option<&str>,
    style: CommunicationStyle,
) -> String {
    if let Some(ctx) = context {
        return format!(
            "Your partner shared: \"{}\"",
            truncate_with_ellipsis(ctx, SUMMARY_CONTEXT_CHARS)
        );
    }
    let base = category_summary(category);
    match style {
        CommunicationStyle::Gentle => format!("{base} A small, caring gesture will go a long way."),
        CommunicationStyle::Direct => format!("{base} Let them know clearly that you heard it."),
        CommunicationStyle::Playful => format!("{base} Here's your chance to make them smile."),
    }
}

fn build_reasoning(profile: &PartnerProfile, has_context: bool) -> String {
    let mut reasoning = format!(
        "Your partner's love language is {}, so these suggestions lean into it.",
        profile.love_language.display_name()
    );
    if !profile.favorite_activities.is_empty() {
        reasoning.push_str(&format!(
            " They enjoy {}, so shared activities will land well.",
            profile.favorite_activities.join(", ")
        ));
    }
    if has_context {
        reasoning.push_str(" They shared specific details, and the suggestions respond to them directly.");
    } else {
        reasoning.push_str(" No details were shared, so the suggestions stay general.");
    }
    reasoning
}

#[cfg(test)]
mod tests {
    use super::*;

    fn need(category: NeedCategory, context: Option<&str>, urgency: Urgency) -> RelationshipNeed {
        RelationshipNeed {
            id: "need-1".into(),
            need_category: category,
            context: context.map(str::to_string),
            urgency,
            requester_id: "alice".into(),
            receiver_id: "bob".into(),
        }
    }

    fn profile(ll: LoveLanguage) -> PartnerProfile {
        PartnerProfile {
            love_language: ll,
            name: "Alice".into(),
            ..PartnerProfile::default()
        }
    }

    #[test]
    fn space_is_fixed_regardless_of_inputs() {
        let mut rich = profile(LoveLanguage::Gifts);
        rich.favorite_activities = vec!["climbing".into()];
        rich.budget_comfort = Some(BudgetComfort::Splurge);

        for urgency in Urgency::ALL {
            let response = generate_need_response(
                &need(NeedCategory::Space, Some("I just need a weekend alone"), urgency),
                &rich,
            );
            assert_eq!(response.messages.len(), 1);
            assert_eq!(response.actions.len(), 2);
            assert_eq!(response.actions[0].kind, ActionKind::GiveSpace);
            assert_eq!(response.actions[1].kind, ActionKind::CheckInLater);
            assert_eq!(response.safety_note.as_deref(), Some(SPACE_SAFETY_NOTE));
            assert!(response.actions.iter().all(|a| a.love_language_alignment == LoveLanguage::Gifts));
            assert!(!response.receiver_summary.contains("weekend alone"));
        }
    }

    #[test]
    fn space_tone_ignores_communication_style() {
        let baseline = generate_need_response(
            &need(NeedCategory::Space, None, Urgency::Casual),
            &profile(LoveLanguage::Words),
        );
        for style in CommunicationStyle::ALL {
            let mut p = profile(LoveLanguage::Words);
            p.communication_style = style;
            p.energy_level = Some(EnergyLevel::High);
            let response = generate_need_response(&need(NeedCategory::Space, None, Urgency::Casual), &p);
            assert_eq!(response.messages, baseline.messages);
            assert_eq!(response.messages[0].tone, Tone::Gentle);
            assert_eq!(response.actions, baseline.actions);
            assert_eq!(response.receiver_summary, baseline.receiver_summary);
        }
    }

    #[test]
    fn long_context_is_truncated_in_message_echo() {
        let ctx = "a".repeat(MESSAGE_CONTEXT_CHARS + 20);
        let response = generate_need_response(
            &need(NeedCategory::Attention, Some(&ctx), Urgency::Casual),
            &profile(LoveLanguage::Gifts),
        );
        let echo = &response.messages[0].text;
        let expected = format!("You mentioned: \"{}...\"", "a".repeat(MESSAGE_CONTEXT_CHARS));
        assert!(echo.ends_with(&expected), "{echo}");
        assert!(!echo.contains(&ctx));
    }

    #[test]
    fn important_affection_without_context_uses_generic_words_line() {
        let response = generate_need_response(
            &need(NeedCategory::Affection, Some(""), Urgency::Important),
            &profile(LoveLanguage::Words),
        );
        assert_eq!(response.safety_note.as_deref(), Some(IMPORTANT_SAFETY_NOTE));
        assert!(response
            .messages
            .iter()
            .any(|m| m.text == love_language_line(LoveLanguage::Words)));
        assert!(response.messages.iter().all(|m| !m.text.contains("You mentioned")));
        assert_eq!(response.messages.len(), MAX_MESSAGES);
    }

    #[test]
    fn safety_note_only_for_important() {
        for urgency in [Urgency::Casual, Urgency::Soon] {
            let response = generate_need_response(
                &need(NeedCategory::Fun, None, urgency),
                &profile(LoveLanguage::Acts),
            );
            assert!(response.safety_note.is_none());
        }
    }

    #[test]
    fn no_context_pads_with_alternative_tone_templates() {
        let response = generate_need_response(
            &need(NeedCategory::Support, None, Urgency::Casual),
            &profile(LoveLanguage::Touch),
        );
        assert_eq!(response.messages.len(), 3);
        let fallback = &response.messages[2];
        assert_eq!(fallback.confidence, 65);
        assert_eq!(fallback.tone, crate::suggestions::Tone::Direct);
        assert_eq!(
            fallback.text,
            template(LoveLanguage::Touch, crate::suggestions::SuggestionType::Support)
                .render(crate::suggestions::Tone::Direct, "Alice")
        );
    }

    #[test]
    fn context_is_echoed_in_messages_and_summary() {
        let ctx = "We haven't had a real conversation since your work trip started last month";
        let response = generate_need_response(
            &need(NeedCategory::Communication, Some(ctx), Urgency::Soon),
            &profile(LoveLanguage::QualityTime),
        );
        assert_eq!(response.messages.len(), 3);
        assert!(response.messages[0].text.contains(ctx));
        assert!(response.messages.iter().all(|m| m.confidence > 70));
        assert!(response.receiver_summary.starts_with("Your partner shared: \"We haven't"));
        assert!(response.receiver_summary.ends_with("...\""));
        assert!(response.reasoning.contains("shared specific details"));
    }

    #[test]
    fn short_context_summary_has_no_ellipsis() {
        let response = generate_need_response(
            &need(NeedCategory::Help, Some("Dishes, please"), Urgency::Casual),
            &profile(LoveLanguage::Acts),
        );
        assert_eq!(response.receiver_summary, "Your partner shared: \"Dishes, please\"");
    }

    #[test]
    fn secondary_attributes_fill_actions_up_to_three() {
        let mut p = profile(LoveLanguage::QualityTime);
        p.favorite_activities = vec!["board games".into(), "cooking".into()];
        p.budget_comfort = Some(BudgetComfort::Free);
        p.energy_level = Some(EnergyLevel::Low);

        let response = generate_need_response(&need(NeedCategory::Fun, None, Urgency::Casual), &p);
        assert_eq!(response.actions.len(), MAX_ACTIONS);
        assert_eq!(response.actions[0].kind, ActionKind::Activity);
        assert!(response.actions[1].description.contains("board games"));
        assert_eq!(response.actions[2].kind, ActionKind::Gesture);
        assert!(response.reasoning.contains("board games, cooking"));
    }

    #[test]
    fn uncategorized_need_gets_reflect_fallback() {
        let response = generate_need_response(
            &need(NeedCategory::Other, None, Urgency::Casual),
            &profile(LoveLanguage::Words),
        );
        assert_eq!(response.actions.len(), 1);
        assert_eq!(response.actions[0].kind, ActionKind::Reflect);
    }

    #[test]
    fn summary_without_context_follows_style() {
        let mut p = profile(LoveLanguage::Words);
        p.communication_style = CommunicationStyle::Playful;
        let response = generate_need_response(&need(NeedCategory::Attention, None, Urgency::Casual), &p);
        assert_eq!(
            response.receiver_summary,
            "Your partner would like more of your attention. Here's your chance to make them smile."
        );
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let text = "é".repeat(60);
        let cut = truncate_with_ellipsis(&text, SUMMARY_CONTEXT_CHARS);
        assert_eq!(cut.chars().count(), SUMMARY_CONTEXT_CHARS + 3);
        assert_eq!(truncate_with_ellipsis("short", 50), "short");
    }
}
