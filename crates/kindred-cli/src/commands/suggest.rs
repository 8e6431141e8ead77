use clap::Subcommand;
use serde_json::json;

use super::{print_json, Backend, CommandResult};
use kindred_core::suggestions::{CommunicationStyle, LoveLanguage, NeedCategory, SuggestionType, Urgency};
use kindred_core::{Config, MessageContext, RelationshipNeed};

#[derive(Subcommand)]
pub enum SuggestAction {
    /// Message suggestions for a love language and style
    Messages {
        /// Suggestion type (e.g. "appreciation", "check_in")
        suggestion_type: SuggestionType,
        #[arg(long, default_value = "quality_time")]
        love_language: LoveLanguage,
        #[arg(long, default_value = "gentle")]
        style: CommunicationStyle,
        /// Partner name used in the templates
        #[arg(long)]
        name: Option<String>,
        /// Free-text situation note
        #[arg(long)]
        extra: Option<String>,
    },
    /// Fresh mixed suggestions for a partner
    Refresh {
        suggestion_type: SuggestionType,
        /// Requesting user ID
        user: String,
        /// Partner whose profile shapes the suggestions
        target: String,
    },
    /// Respond to a relationship need
    Need {
        #[arg(long)]
        category: NeedCategory,
        #[arg(long, default_value = "casual")]
        urgency: Urgency,
        #[arg(long)]
        context: Option<String>,
        /// Partner who asked
        #[arg(long, default_value = "requester")]
        requester: String,
        /// Partner who will act on the response
        #[arg(long, default_value = "receiver")]
        receiver: String,
        /// Need ID (generated when omitted)
        #[arg(long)]
        id: Option<String>,
        /// Persist the response
        #[arg(long)]
        store: bool,
    },
    /// A date idea for a partner
    Date {
        /// Partner whose profile shapes the idea
        user: String,
    },
    /// Record which suggestion was used
    Usage {
        suggestion_id: String,
        used_index: usize,
        #[arg(long)]
        feedback: Option<String>,
    },
}

pub async fn run(action: SuggestAction, backend: &Backend, config: &Config) -> CommandResult {
    let engine = backend.engine(config);
    match action {
        SuggestAction::Messages {
            suggestion_type,
            love_language,
            style,
            name,
            extra,
        } => {
            let context = MessageContext {
                love_language,
                communication_style: style,
                partner_name: name,
                extra,
            };
            print_json(&engine.generate_message_suggestions(&context, suggestion_type))
        }
        SuggestAction::Refresh {
            suggestion_type,
            user,
            target,
        } => print_json(&engine.refresh_suggestions(suggestion_type, &user, &target).await),
        SuggestAction::Need {
            category,
            urgency,
            context,
            requester,
            receiver,
            id,
            store,
        } => {
            let need = RelationshipNeed {
                id: id.unwrap_or_else(|| format!("need-{}", chrono::Utc::now().timestamp_millis())),
                need_category: category,
                context,
                urgency,
                requester_id: requester,
                receiver_id: receiver,
            };
            let profile = engine.partner_profile(&need.requester_id).await?;
            let response = engine.generate_need_response(&need, &profile);
            if store {
                let suggestion_id = engine.store_suggestion(&need, &response).await?;
                backend.persist()?;
                print_json(&json!({ "suggestion_id": suggestion_id, "response": response }))
            } else {
                print_json(&response)
            }
        }
        SuggestAction::Date { user } => {
            let profile = engine.partner_profile(&user).await?;
            print_json(&engine.generate_date_suggestion(&profile))
        }
        SuggestAction::Usage {
            suggestion_id,
            used_index,
            feedback,
        } => {
            engine
                .record_suggestion_usage(&suggestion_id, used_index, feedback)
                .await?;
            backend.persist()?;
            println!("ok");
            Ok(())
        }
    }
}
