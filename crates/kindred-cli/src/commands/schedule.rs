use clap::Subcommand;

use super::{print_json, Backend, CommandResult};
use kindred_core::Config;

#[derive(Subcommand)]
pub enum ScheduleAction {
    /// Best time today for the daily question
    Daily {
        /// User ID
        user: String,
    },
    /// Remaining needs-suggestion times today
    Needs {
        /// User ID
        user: String,
    },
    /// Upcoming date-suggestion slots this week
    Dates {
        /// User ID
        user: String,
        /// Also require the partner to be free
        #[arg(long)]
        partner: Option<String>,
    },
}

pub async fn run(action: ScheduleAction, backend: &Backend, config: &Config) -> CommandResult {
    let scheduler = backend.scheduler(config);
    match action {
        ScheduleAction::Daily { user } => {
            print_json(&scheduler.best_time_for_daily_question(&user).await)
        }
        ScheduleAction::Needs { user } => {
            print_json(&scheduler.best_times_for_needs_suggestions(&user).await)
        }
        ScheduleAction::Dates { user, partner } => print_json(
            &scheduler
                .best_times_for_date_suggestions(&user, partner.as_deref())
                .await,
        ),
    }
}
