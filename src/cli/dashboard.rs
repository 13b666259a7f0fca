//! Dashboard CLI command

use crate::config::Settings;
use crate::display::{format_dashboard, CurrencyFormat};
use crate::error::PocketResult;
use crate::services::{DashboardOptions, DashboardService};
use crate::storage::Storage;

use super::parse_date;

/// Print the dashboard for the month containing `as_of` (default today)
pub fn handle_dashboard_command(
    storage: &Storage,
    settings: &Settings,
    as_of: Option<&str>,
) -> PocketResult<()> {
    let options = DashboardOptions::from_settings(settings, parse_date(as_of)?);
    let dashboard = DashboardService::new(storage).build(&options)?;
    print!(
        "{}",
        format_dashboard(&dashboard, &CurrencyFormat::from_settings(settings))
    );
    Ok(())
}
