//! Focus analytics commands.

use chrono::Utc;
use clap::Subcommand;
use sessionflow_core::stats;
use sessionflow_core::storage::Database;

#[derive(Subcommand)]
pub enum StatsAction {
    /// Today's focus minutes and score
    Today,
    /// Trailing daily-intensity heatmap
    Heatmap {
        /// Number of trailing days
        #[arg(long, default_value = "14")]
        days: u32,
    },
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let history = db.history()?;
    let now = Utc::now();

    match action {
        StatsAction::Today => {
            let minutes = stats::today_minutes(&history, now);
            let score = stats::focus_score(&history, now);
            println!("focus minutes: {minutes}");
            println!("focus score: {score}");
        }
        StatsAction::Heatmap { days } => {
            let cells = stats::heatmap(&history, now, days);
            println!("{}", serde_json::to_string_pretty(&cells)?);
        }
    }
    Ok(())
}
