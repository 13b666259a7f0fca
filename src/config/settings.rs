//! User settings for Pocketwise
//!
//! Display preferences (currency formatting, week start) and the defaults
//! applied to new budgets and the dashboard.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use super::paths::PocketPaths;
use crate::error::PocketError;
use crate::models::weekday_from_index;

/// User settings for Pocketwise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol prefixed to amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Digit grouping separator
    #[serde(default = "default_thousands_separator")]
    pub thousands_separator: String,

    /// Separator between whole and fractional digits
    #[serde(default = "default_decimal_separator")]
    pub decimal_separator: String,

    /// Fraction digits shown (0-2)
    #[serde(default)]
    pub decimals: u8,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// First day of week (0 = Sunday, 1 = Monday)
    #[serde(default = "default_first_day_of_week")]
    pub first_day_of_week: u8,

    /// Alert threshold given to budgets created without one
    #[serde(default = "default_alert_threshold")]
    pub default_alert_threshold: f64,

    /// Transactions shown on the dashboard
    #[serde(default = "default_recent_limit")]
    pub recent_transactions_limit: usize,

    /// Categories shown individually in the spending chart
    #[serde(default = "default_chart_top_n")]
    pub chart_top_n: usize,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "Rp".to_string()
}

fn default_thousands_separator() -> String {
    ".".to_string()
}

fn default_decimal_separator() -> String {
    ",".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_first_day_of_week() -> u8 {
    1 // Monday
}

fn default_alert_threshold() -> f64 {
    crate::models::DEFAULT_ALERT_THRESHOLD
}

fn default_recent_limit() -> usize {
    5
}

fn default_chart_top_n() -> usize {
    5
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            thousands_separator: default_thousands_separator(),
            decimal_separator: default_decimal_separator(),
            decimals: 0,
            date_format: default_date_format(),
            first_day_of_week: default_first_day_of_week(),
            default_alert_threshold: default_alert_threshold(),
            recent_transactions_limit: default_recent_limit(),
            chart_top_n: default_chart_top_n(),
        }
    }
}

/// Keys accepted by [`Settings::set`]
pub const SETTING_KEYS: &[&str] = &[
    "currency_symbol",
    "thousands_separator",
    "decimal_separator",
    "decimals",
    "date_format",
    "first_day_of_week",
    "default_alert_threshold",
    "recent_transactions_limit",
    "chart_top_n",
];

impl Settings {
    /// The weekday budget weeks start on
    pub fn week_start(&self) -> Weekday {
        weekday_from_index(self.first_day_of_week)
    }

    /// Load settings from disk, or create default settings if the file
    /// doesn't exist
    pub fn load_or_create(paths: &PocketPaths) -> Result<Self, PocketError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Not persisted until the caller saves
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| PocketError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| PocketError::Config(format!("Failed to parse settings file: {}", e)))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &PocketPaths) -> Result<(), PocketError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| PocketError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| PocketError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Reject values the rest of the program cannot work with
    pub fn validate(&self) -> Result<(), PocketError> {
        if self.decimals > 2 {
            return Err(PocketError::Config(format!(
                "decimals must be between 0 and 2, got {}",
                self.decimals
            )));
        }
        if self.first_day_of_week > 6 {
            return Err(PocketError::Config(format!(
                "first_day_of_week must be between 0 (Sunday) and 6, got {}",
                self.first_day_of_week
            )));
        }
        if !(self.default_alert_threshold > 0.0 && self.default_alert_threshold <= 1.0) {
            return Err(PocketError::Config(format!(
                "default_alert_threshold must be in (0, 1], got {}",
                self.default_alert_threshold
            )));
        }
        Ok(())
    }

    /// Update one setting from its string form
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), PocketError> {
        let invalid = |e: &dyn std::fmt::Display| {
            PocketError::Config(format!("Invalid value '{}' for {}: {}", value, key, e))
        };

        let mut updated = self.clone();
        match key {
            "currency_symbol" => updated.currency_symbol = value.to_string(),
            "thousands_separator" => updated.thousands_separator = value.to_string(),
            "decimal_separator" => updated.decimal_separator = value.to_string(),
            "decimals" => updated.decimals = value.parse().map_err(|e| invalid(&e))?,
            "date_format" => updated.date_format = value.to_string(),
            "first_day_of_week" => {
                updated.first_day_of_week = value.parse().map_err(|e| invalid(&e))?
            }
            "default_alert_threshold" => {
                updated.default_alert_threshold = value.parse().map_err(|e| invalid(&e))?
            }
            "recent_transactions_limit" => {
                updated.recent_transactions_limit = value.parse().map_err(|e| invalid(&e))?
            }
            "chart_top_n" => updated.chart_top_n = value.parse().map_err(|e| invalid(&e))?,
            _ => {
                return Err(PocketError::Config(format!(
                    "Unknown setting '{}'. Available: {}",
                    key,
                    SETTING_KEYS.join(", ")
                )))
            }
        }

        updated.validate()?;
        *self = updated;
        Ok(())
    }
}
