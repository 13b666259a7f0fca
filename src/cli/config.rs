//! Setup, settings and audit history commands

use clap::Subcommand;

use crate::config::settings::SETTING_KEYS;
use crate::config::{PocketPaths, Settings};
use crate::error::PocketResult;
use crate::storage::{initialize_storage, Storage};

/// Config subcommands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show paths and settings
    Show,
    /// Change a setting
    Set {
        /// One of the setting names shown by `config show`
        key: String,
        value: String,
    },
}

/// Create the data directory, default categories and settings file
pub fn handle_init_command(paths: &PocketPaths, settings: &Settings) -> PocketResult<()> {
    println!("Initializing Pocketwise at: {}", paths.base_dir().display());
    let created = initialize_storage(paths)?;
    settings.save(paths)?;

    if created == 0 {
        println!("Already initialized; existing data left untouched.");
    } else {
        println!("Created {} default categories.", created);
        println!("Run 'pocketwise category list' to see them.");
    }
    Ok(())
}

/// Handle a config command
pub fn handle_config_command(
    paths: &PocketPaths,
    settings: &mut Settings,
    cmd: Option<ConfigCommands>,
) -> PocketResult<()> {
    match cmd.unwrap_or(ConfigCommands::Show) {
        ConfigCommands::Show => {
            println!("Pocketwise Configuration");
            println!("========================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Data directory: {}", paths.data_dir().display());
            println!("Audit log:      {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            for key in SETTING_KEYS {
                println!("  {:<26} {}", key, setting_value(settings, key));
            }
        }
        ConfigCommands::Set { key, value } => {
            settings.set(&key, &value)?;
            settings.save(paths)?;
            println!("{} = {}", key, setting_value(settings, &key));
        }
    }
    Ok(())
}

fn setting_value(settings: &Settings, key: &str) -> String {
    match key {
        "currency_symbol" => settings.currency_symbol.clone(),
        "thousands_separator" => format!("{:?}", settings.thousands_separator),
        "decimal_separator" => format!("{:?}", settings.decimal_separator),
        "decimals" => settings.decimals.to_string(),
        "date_format" => settings.date_format.clone(),
        "first_day_of_week" => format!("{} ({})", settings.first_day_of_week, settings.week_start()),
        "default_alert_threshold" => settings.default_alert_threshold.to_string(),
        "recent_transactions_limit" => settings.recent_transactions_limit.to_string(),
        "chart_top_n" => settings.chart_top_n.to_string(),
        _ => String::new(),
    }
}

/// Print the most recent audit log entries, oldest first
pub fn handle_history_command(storage: &Storage, count: usize) -> PocketResult<()> {
    let entries = storage.audit().read_recent(count)?;
    if entries.is_empty() {
        println!("No changes recorded yet.");
        return Ok(());
    }
    for entry in entries {
        println!("{}", entry.format_human_readable());
    }
    Ok(())
}
