use clap::Subcommand;
use pomodowork_core::storage::{Database, ProfileBook};
use pomodowork_core::timer::now_ms;
use pomodowork_core::ProfileDraft;

#[derive(Subcommand)]
pub enum ProfileAction {
    /// List all profiles
    List,
    /// Show one profile as JSON
    Show {
        /// Profile id
        id: String,
    },
    /// Create a profile
    Add {
        /// Display name
        name: String,
        /// Work phase length in minutes (5-120)
        #[arg(long, default_value_t = 25)]
        work: u64,
        /// Break length in minutes (1-30)
        #[arg(long = "break", default_value_t = 5)]
        break_minutes: u64,
        /// Session length in hours (1-12, half-hour steps)
        #[arg(long, default_value_t = 4.0)]
        session: f64,
    },
    /// Remove a profile (built-ins are protected)
    Remove {
        /// Profile id
        id: String,
    },
    /// Select the active profile
    Use {
        /// Profile id
        id: String,
    },
}

pub fn run(action: ProfileAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let mut book = ProfileBook::load(&db)?;

    match action {
        ProfileAction::List => {
            for p in book.profiles() {
                let active = if Some(p.id.as_str()) == book.active_id() {
                    " [ACTIVE]"
                } else {
                    ""
                };
                println!("  {} - {}{}", p.id, p.name, active);
                println!("    {} ({} cycles)", p.summary(), p.cycle_count());
            }
        }
        ProfileAction::Show { id } => {
            let profile = book
                .get(&id)
                .ok_or_else(|| format!("unknown profile '{id}'"))?;
            println!("{}", serde_json::to_string_pretty(profile)?);
        }
        ProfileAction::Add {
            name,
            work,
            break_minutes,
            session,
        } => {
            let profile = ProfileDraft {
                name,
                work_minutes: work,
                break_minutes,
                session_hours: session,
            }
            .into_profile(now_ms())?;
            println!("Created '{}' ({})", profile.name, profile.id);
            book.add(profile);
            book.save(&db)?;
        }
        ProfileAction::Remove { id } => {
            book.remove(&id)?;
            book.save(&db)?;
            println!("Removed {id}");
        }
        ProfileAction::Use { id } => {
            book.set_active(&id)?;
            book.save(&db)?;
            println!("Active profile: {id}");
        }
    }
    Ok(())
}
