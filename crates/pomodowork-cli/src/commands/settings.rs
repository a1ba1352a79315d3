use clap::Subcommand;
use pomodowork_core::storage::Database;
use pomodowork_core::NotificationMode;

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Show current settings as JSON
    Show,
    /// Set the feedback mode
    Mode {
        /// sound, vibration, repeating-vibration or silent
        mode: NotificationMode,
    },
    /// Enable or disable the break-start notification
    NotifyBreak {
        /// true or false
        #[arg(action = clap::ArgAction::Set)]
        enabled: bool,
    },
    /// Enable or disable the work-resume notification
    NotifyWork {
        /// true or false
        #[arg(action = clap::ArgAction::Set)]
        enabled: bool,
    },
}

pub fn run(action: SettingsAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let mut settings = db.settings()?;

    match action {
        SettingsAction::Show => {
            println!("{}", serde_json::to_string_pretty(&settings)?);
            return Ok(());
        }
        SettingsAction::Mode { mode } => settings.notifications.mode = mode,
        SettingsAction::NotifyBreak { enabled } => settings.notifications.notify_break_start = enabled,
        SettingsAction::NotifyWork { enabled } => settings.notifications.notify_work_resume = enabled,
    }

    db.set_settings(&settings)?;
    println!("{}", serde_json::to_string_pretty(&settings)?);
    Ok(())
}
