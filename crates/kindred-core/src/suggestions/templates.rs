//! Prewritten message templates.
//!
//! One row per (love language, suggestion type) pair, each carrying exactly
//! four tone variants. `{name}` is replaced with the partner's display name
//! at render time.

use super::types::{LoveLanguage, NeedCategory, SuggestionType, Tone};

/// Placeholder substituted with the partner's name.
pub const NAME_PLACEHOLDER: &str = "{name}";

/// A single template row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuggestionTemplate {
    pub gentle: &'static str,
    pub direct: &'static str,
    pub playful: &'static str,
    pub romantic: &'static str,
}

impl SuggestionTemplate {
    pub fn get(&self, tone: Tone) -> &'static str {
        match tone {
            Tone::Gentle => self.gentle,
            Tone::Direct => self.direct,
            Tone::Playful => self.playful,
            Tone::Romantic => self.romantic,
        }
    }

    /// Text for `tone` with the name placeholder filled in.
    pub fn render(&self, tone: Tone, name: &str) -> String {
        self.get(tone).replace(NAME_PLACEHOLDER, name)
    }
}

const fn row(
    gentle: &'static str,
    direct: &'static str,
    playful: &'static str,
    romantic: &'static str,
) -> SuggestionTemplate {
    SuggestionTemplate {
        gentle,
        direct,
        playful,
        romantic,
    }
}

/// Every need category resolves to one suggestion type.
pub fn need_category_suggestion_type(category: NeedCategory) -> SuggestionType {
    match category {
        NeedCategory::Affection | NeedCategory::Intimacy => SuggestionType::Affection,
        NeedCategory::Attention | NeedCategory::Communication => SuggestionType::CheckIn,
        NeedCategory::Appreciation => SuggestionType::Appreciation,
        NeedCategory::QualityTime | NeedCategory::Fun => SuggestionType::QualityTime,
        NeedCategory::Support | NeedCategory::Help => SuggestionType::Support,
        NeedCategory::Reassurance => SuggestionType::Encouragement,
        NeedCategory::Space | NeedCategory::Other => SuggestionType::Reconnect,
    }
}

/// All four tone variants of a row, in [`Tone::ALL`] order.
pub fn get_all_variations(
    love_language: LoveLanguage,
    suggestion_type: SuggestionType,
) -> [(Tone, &'static str); 4] {
    let t = template(love_language, suggestion_type);
    Tone::ALL.map(|tone| (tone, t.get(tone)))
}

pub fn template(
    love_language: LoveLanguage,
    suggestion_type: SuggestionType,
) -> &'static SuggestionTemplate {
    use LoveLanguage as L;
    use SuggestionType as S;

    match (love_language, suggestion_type) {
        (L::Words, S::Appreciation) => &WORDS_APPRECIATION,
        (L::Words, S::CheckIn) => &WORDS_CHECK_IN,
        (L::Words, S::Affection) => &WORDS_AFFECTION,
        (L::Words, S::QualityTime) => &WORDS_QUALITY_TIME,
        (L::Words, S::Support) => &WORDS_SUPPORT,
        (L::Words, S::Apology) => &WORDS_APOLOGY,
        (L::Words, S::Encouragement) => &WORDS_ENCOURAGEMENT,
        (L::Words, S::Reconnect) => &WORDS_RECONNECT,

        (L::QualityTime, S::Appreciation) => &TIME_APPRECIATION,
        (L::QualityTime, S::CheckIn) => &TIME_CHECK_IN,
        (L::QualityTime, S::Affection) => &TIME_AFFECTION,
        (L::QualityTime, S::QualityTime) => &TIME_QUALITY_TIME,
        (L::QualityTime, S::Support) => &TIME_SUPPORT,
        (L::QualityTime, S::Apology) => &TIME_APOLOGY,
        (L::QualityTime, S::Encouragement) => &TIME_ENCOURAGEMENT,
        (L::QualityTime, S::Reconnect) => &TIME_RECONNECT,

        (L::Gifts, S::Appreciation) => &GIFTS_APPRECIATION,
        (L::Gifts, S::CheckIn) => &GIFTS_CHECK_IN,
        (L::Gifts, S::Affection) => &GIFTS_AFFECTION,
        (L::Gifts, S::QualityTime) => &GIFTS_QUALITY_TIME,
        (L::Gifts, S::Support) => &GIFTS_SUPPORT,
        (L::Gifts, S::Apology) => &GIFTS_APOLOGY,
        (L::Gifts, S::Encouragement) => &GIFTS_ENCOURAGEMENT,
        (L::Gifts, S::Reconnect) => &GIFTS_RECONNECT,

        (L::Acts, S::Appreciation) => &ACTS_APPRECIATION,
        (L::Acts, S::CheckIn) => &ACTS_CHECK_IN,
        (L::Acts, S::Affection) => &ACTS_AFFECTION,
        (L::Acts, S::QualityTime) => &ACTS_QUALITY_TIME,
        (L::Acts, S::Support) => &ACTS_SUPPORT,
        (L::Acts, S::Apology) => &ACTS_APOLOGY,
        (L::Acts, S::Encouragement) => &ACTS_ENCOURAGEMENT,
        (L::Acts, S::Reconnect) => &ACTS_RECONNECT,

        (L::Touch, S::Appreciation) => &TOUCH_APPRECIATION,
        (L::Touch, S::CheckIn) => &TOUCH_CHECK_IN,
        (L::Touch, S::Affection) => &TOUCH_AFFECTION,
        (L::Touch, S::QualityTime) => &TOUCH_QUALITY_TIME,
        (L::Touch, S::Support) => &TOUCH_SUPPORT,
        (L::Touch, S::Apology) => &TOUCH_APOLOGY,
        (L::Touch, S::Encouragement) => &TOUCH_ENCOURAGEMENT,
        (L::Touch, S::Reconnect) => &TOUCH_RECONNECT,
    }
}

// Words of affirmation

static WORDS_APPRECIATION: SuggestionTemplate = row(
    "I just wanted you to know how much I appreciate you, {name}.",
    "Thank you for everything you do. I notice it and I value it.",
    "Official announcement: {name} is the most appreciated person in this house.",
    "Every day with you reminds me how lucky I am to have you, {name}.",
);
static WORDS_CHECK_IN: SuggestionTemplate = row(
    "Hey {name}, how are you really feeling today?",
    "I want to check in. How are we doing?",
    "Status report please: how's my favorite person holding up?",
    "I've been thinking about you all day. How is your heart today?",
);
static WORDS_AFFECTION: SuggestionTemplate = row(
    "I love you, {name}. I just wanted you to hear it.",
    "I love you and I'm proud to be with you.",
    "Reminder: you are adored. No returns accepted.",
    "You still make my heart skip, {name}.",
);
static WORDS_QUALITY_TIME: SuggestionTemplate = row(
    "I'd love to hear all about your day tonight, {name}.",
    "Let's set aside time tonight to really talk.",
    "Tonight's agenda: you, me, and zero phones. Deal?",
    "Nothing beats an evening of talking with you. Can we have one soon?",
);
static WORDS_SUPPORT: SuggestionTemplate = row(
    "Whatever you're carrying right now, you don't have to carry it alone, {name}.",
    "I believe in you. Tell me what you need from me.",
    "Team {name} has one very loud cheerleader. That's me.",
    "I'm in your corner, always. You've got this and you've got me.",
);
static WORDS_APOLOGY: SuggestionTemplate = row(
    "I'm sorry about earlier, {name}. You matter more to me than being right.",
    "I was wrong, and I'm sorry. I want to make it right.",
    "I owe you an apology and probably a snack. Sorry, {name}.",
    "I hate the distance between us right now. I'm sorry, and I love you.",
);
static WORDS_ENCOURAGEMENT: SuggestionTemplate = row(
    "I'm proud of how hard you've been working, {name}.",
    "You can do this. I've watched you do hard things before.",
    "Go get 'em, superstar. I'll be here with applause.",
    "Watching you chase what matters to you is one of my favorite things.",
);
static WORDS_RECONNECT: SuggestionTemplate = row(
    "I miss us a little. Can we talk tonight, {name}?",
    "I feel like we've drifted this week. I want to reconnect.",
    "Requesting a reboot of our connection. Estimated time: one long hug and a talk.",
    "I miss the way we are when it's just us. Let's find our way back tonight.",
);

// Quality time

static TIME_APPRECIATION: SuggestionTemplate = row(
    "Thank you for making time for me lately, {name}. It means a lot.",
    "I appreciate the time you give us. I want to give you the same.",
    "Best part of my week: hanging out with you. Five stars.",
    "The hours I spend with you are my favorite hours.",
);
static TIME_CHECK_IN: SuggestionTemplate = row(
    "Can we take a few minutes tonight to catch up, {name}?",
    "Let's have a proper check-in tonight, just the two of us.",
    "Couch summit tonight? Agenda item one: us.",
    "I'd love some time tonight with only you and me.",
);
static TIME_AFFECTION: SuggestionTemplate = row(
    "I just want to be near you tonight, {name}.",
    "I want to spend the evening with you, no distractions.",
    "Cuddle-and-movie night? I'm already picking snacks.",
    "Let's slow down tonight and just enjoy each other.",
);
static TIME_QUALITY_TIME: SuggestionTemplate = row(
    "Would you like to take a walk together this evening, {name}?",
    "Let's plan a date this week. When are you free?",
    "I'm challenging you to a board game night. Loser makes dessert.",
    "Let me take you somewhere special this weekend, just us.",
);
static TIME_SUPPORT: SuggestionTemplate = row(
    "I can clear my evening if you want company, {name}.",
    "I'll be with you for this. Tell me when and I'll be there.",
    "Need a sidekick? I'm available and mostly competent.",
    "Whatever happens, we'll face it side by side.",
);
static TIME_APOLOGY: SuggestionTemplate = row(
    "I'm sorry I've been distracted, {name}. Can I make time for you tonight?",
    "I haven't been present lately, and I'm sorry. Let's fix that this week.",
    "Sorry for being a ghost this week. Can I haunt you in person tonight?",
    "I'm sorry I let our time slip. You deserve my full attention.",
);
static TIME_ENCOURAGEMENT: SuggestionTemplate = row(
    "Want to work on it together tonight, {name}?",
    "Let's block out time this week so you can focus and I can help.",
    "Study buddy reporting for duty.",
    "I'll be right beside you while you go after this.",
);
static TIME_RECONNECT: SuggestionTemplate = row(
    "Could we spend some slow time together soon, {name}?",
    "We need a night for just us. Let's set one.",
    "Phone-free date night, you and me. Name the day.",
    "Let's get lost together for an evening, like we used to.",
);

// Receiving gifts

static GIFTS_APPRECIATION: SuggestionTemplate = row(
    "I picked up a little something because you were on my mind, {name}.",
    "I got you something to say thank you for all you do.",
    "Surprise! A small token of my extremely large appreciation.",
    "I saw this and thought of you. Everything reminds me of you.",
);
static GIFTS_CHECK_IN: SuggestionTemplate = row(
    "I'm grabbing your favorite on the way home. How's your day going, {name}?",
    "Can I bring you anything tonight? How are you doing?",
    "Snack delivery service checking in. What's your order and your mood?",
    "I'm bringing you something sweet tonight, because you are.",
);
static GIFTS_AFFECTION: SuggestionTemplate = row(
    "I left a little note for you to find, {name}.",
    "I got you something small because I love you.",
    "Warning: a surprise is hidden somewhere in your bag.",
    "Here's a little reminder of how much you mean to me.",
);
static GIFTS_QUALITY_TIME: SuggestionTemplate = row(
    "I booked us something for the weekend, {name}. Want to know what?",
    "I got tickets for us. Saturday, you and me.",
    "I bought us an adventure. Details classified until Friday.",
    "I planned an evening for us, down to the last detail.",
);
static GIFTS_SUPPORT: SuggestionTemplate = row(
    "I picked up something to make this week a little easier for you, {name}.",
    "I got you the thing you mentioned needing. It's on the counter.",
    "Care package inbound. Contents: snacks and moral support.",
    "A little comfort for you, because you deserve to be looked after.",
);
static GIFTS_APOLOGY: SuggestionTemplate = row(
    "I'm sorry, {name}. I brought you something, but mostly I brought my apology.",
    "I'm sorry. This is small, but I mean it.",
    "Peace offering attached. Sorry, {name}.",
    "I'm sorry, love. Please accept this and my whole heart.",
);
static GIFTS_ENCOURAGEMENT: SuggestionTemplate = row(
    "I got you a little good-luck charm for today, {name}.",
    "This is for your big day. You've earned it already.",
    "Official good-luck token, guaranteed to work or your money back.",
    "Something to carry with you today so you know I'm with you.",
);
static GIFTS_RECONNECT: SuggestionTemplate = row(
    "I found something that reminded me of us, {name}.",
    "I got us something to share tonight. Let's reconnect.",
    "I bought us a reason to hang out. You'll see.",
    "This reminded me of when we first met. I want more of that.",
);

// Acts of service

static ACTS_APPRECIATION: SuggestionTemplate = row(
    "I noticed everything you handled this week, {name}. Let me take tonight's chores.",
    "Thank you for all you do. I've got dinner tonight.",
    "You've been carrying the team. Tonight, the dishes are mine.",
    "Let me take care of you tonight the way you take care of us.",
);
static ACTS_CHECK_IN: SuggestionTemplate = row(
    "Is there anything I can take off your plate today, {name}?",
    "What can I handle for you this week?",
    "Your personal assistant reporting in. What needs doing?",
    "Tell me one thing I can do to make your day lighter.",
);
static ACTS_AFFECTION: SuggestionTemplate = row(
    "I made your coffee just the way you like it, {name}.",
    "I took care of the errands so you can relax.",
    "Surprise: the laundry folded itself. Weird, right?",
    "Loving you looks like making your day easier. Let me.",
);
static ACTS_QUALITY_TIME: SuggestionTemplate = row(
    "I'll handle the evening chores so we can have dinner together, {name}.",
    "I cleared my evening. Let's spend it together.",
    "I did the chores early, so now we have time to be goofy together.",
    "I've taken care of everything tonight. All that's left is us.",
);
static ACTS_SUPPORT: SuggestionTemplate = row(
    "Let me handle that for you, {name}. You focus on yourself.",
    "I'll take care of it. Just tell me what needs doing.",
    "Hand it over. I'm very good at tasks and also at hugs.",
    "Lean on me. I've got this part so you don't have to.",
);
static ACTS_APOLOGY: SuggestionTemplate = row(
    "I'm sorry, {name}. I want to show you, not just say it.",
    "I'm sorry. I'll make it right, starting with what I said I'd do.",
    "Apology in progress: the thing I forgot is now done.",
    "I'm sorry. Let me show you how much you matter to me.",
);
static ACTS_ENCOURAGEMENT: SuggestionTemplate = row(
    "I'll take care of dinner so you can focus, {name}.",
    "Go work on it. I've got everything else covered.",
    "You do the big thing, I'll do the small things. Great team.",
    "Chase it. I'll keep our world running while you do.",
);
static ACTS_RECONNECT: SuggestionTemplate = row(
    "Can I make us dinner tonight so we can talk, {name}?",
    "I want to take something off your plate and spend that time with you.",
    "I'll cook, you pick the music. Reconnection achieved.",
    "Let me look after you tonight. I've missed being close.",
);

// Physical touch

static TOUCH_APPRECIATION: SuggestionTemplate = row(
    "Come here, {name}. I owe you a long thank-you hug.",
    "Thank you. I'd like to show it with a long hug tonight.",
    "Redeemable voucher: one appreciation hug, no expiry.",
    "I want to hold you tonight and tell you how much you mean to me.",
);
static TOUCH_CHECK_IN: SuggestionTemplate = row(
    "Can I give you a hug and hear how you're doing, {name}?",
    "Let's sit close tonight and talk about how you're doing.",
    "Hug break? Mandatory, I'm afraid.",
    "I just want to hold your hand and hear about your day.",
);
static TOUCH_AFFECTION: SuggestionTemplate = row(
    "I can't wait to hug you tonight, {name}.",
    "I want to hold you tonight. Plan on it.",
    "Cuddle reservation confirmed for this evening.",
    "I miss the feel of you next to me. Come home soon.",
);
static TOUCH_QUALITY_TIME: SuggestionTemplate = row(
    "Want to curl up together tonight, {name}?",
    "Let's take a walk tonight, hand in hand.",
    "Slow dance in the kitchen tonight? I'll pick the song.",
    "Let's spend tonight wrapped up in each other.",
);
static TOUCH_SUPPORT: SuggestionTemplate = row(
    "I'm here, {name}. Come lean on me for a bit.",
    "You need a hug, and I'm giving you one as soon as I see you.",
    "Emergency hug deployment on standby.",
    "Let me hold you until it feels a little lighter.",
);
static TOUCH_APOLOGY: SuggestionTemplate = row(
    "I'm sorry, {name}. Can I hold you for a minute?",
    "I'm sorry. I'd like to make up with a hug, if you'll let me.",
    "Sorry. Hug it out?",
    "I'm sorry, love. I just want you back in my arms.",
);
static TOUCH_ENCOURAGEMENT: SuggestionTemplate = row(
    "Big hug before you go, {name}. You're ready.",
    "You've got this. Come get a hug for luck.",
    "Pre-game high five, plus a bonus hug.",
    "Take this hug with you today, and know I'm proud of you.",
);
static TOUCH_RECONNECT: SuggestionTemplate = row(
    "I miss being close to you, {name}. Cuddle tonight?",
    "I want us to be close again. Let's start with tonight.",
    "Our hug quota is dangerously low this week.",
    "I miss holding you. Let's come back to each other tonight.",
);

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use proptest::sample::select;

    #[test]
    fn every_pair_has_four_non_empty_tones() {
        for ll in LoveLanguage::ALL {
            for kind in SuggestionType::ALL {
                let variations = get_all_variations(ll, kind);
                assert_eq!(variations.len(), 4);
                for (tone, text) in variations {
                    assert!(!text.trim().is_empty(), "{ll}/{kind}/{tone} is empty");
                }
            }
        }
    }

    #[test]
    fn tone_variants_within_a_row_are_distinct() {
        for ll in LoveLanguage::ALL {
            for kind in SuggestionType::ALL {
                let t = template(ll, kind);
                let mut texts = vec![t.gentle, t.direct, t.playful, t.romantic];
                texts.sort_unstable();
                texts.dedup();
                assert_eq!(texts.len(), 4, "{ll}/{kind} repeats a tone");
            }
        }
    }

    #[test]
    fn rows_are_not_shared_between_pairs() {
        let mut seen = Vec::new();
        for ll in LoveLanguage::ALL {
            for kind in SuggestionType::ALL {
                seen.push(template(ll, kind).gentle);
            }
        }
        let total = seen.len();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), total);
    }

    #[test]
    fn render_substitutes_every_placeholder() {
        let t = template(LoveLanguage::Words, SuggestionType::Support);
        assert_eq!(t.render(Tone::Playful, "Sam"), "Team Sam has one very loud cheerleader. That's me.");
        assert!(!t.render(Tone::Gentle, "Sam").contains(NAME_PLACEHOLDER));
    }

    #[test]
    fn need_category_table_is_total() {
        assert_eq!(need_category_suggestion_type(NeedCategory::Space), SuggestionType::Reconnect);
        assert_eq!(need_category_suggestion_type(NeedCategory::Reassurance), SuggestionType::Encouragement);
        assert_eq!(need_category_suggestion_type(NeedCategory::Help), SuggestionType::Support);
    }

    proptest! {
        #[test]
        fn variations_follow_tone_order(
            ll in select(LoveLanguage::ALL.to_vec()),
            kind in select(SuggestionType::ALL.to_vec()),
        ) {
            let variations = get_all_variations(ll, kind);
            let tones: Vec<Tone> = variations.iter().map(|(t, _)| *t).collect();
            prop_assert_eq!(tones, Tone::ALL.to_vec());
            for (tone, text) in variations {
                prop_assert_eq!(text, template(ll, kind).get(tone));
            }
        }
    }
}
