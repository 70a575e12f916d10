//! Persisted user settings (the zen-mode and smart-breaks toggles).

use clap::Subcommand;
use sessionflow_core::storage::Database;

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Show current settings
    Show,
    /// Set a settings toggle
    Set {
        /// Setting name: "zen_mode" or "smart_breaks"
        name: String,
        /// New value: true or false
        #[arg(action = clap::ArgAction::Set)]
        value: bool,
    },
}

pub fn run(action: SettingsAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let mut settings = db.load_settings()?;

    match action {
        SettingsAction::Show => {
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
        SettingsAction::Set { name, value } => {
            match name.as_str() {
                "zen_mode" => settings.zen_mode = value,
                "smart_breaks" => settings.smart_breaks = value,
                other => {
                    eprintln!("unknown setting: {other}");
                    std::process::exit(1);
                }
            }
            db.save_settings(&settings)?;
            println!("ok");
        }
    }
    Ok(())
}
