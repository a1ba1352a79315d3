use clap::Subcommand;
use pomodowork_core::profile::format_duration;
use pomodowork_core::storage::Database;

#[derive(Subcommand)]
pub enum StatsAction {
    /// Accumulated work time and completed sessions, as JSON
    Show,
    /// One-line human summary
    Summary,
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let stats = db.stats()?;

    match action {
        StatsAction::Show => {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        StatsAction::Summary => {
            println!(
                "{} of focused work across {} completed sessions",
                format_duration(stats.total_work_ms),
                stats.completed_sessions
            );
        }
    }
    Ok(())
}
