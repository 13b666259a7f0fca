//! Number formatting for terminal output
//!
//! Currency amounts, percentages, compact numbers and text progress bars.

use crate::config::Settings;
use crate::models::Money;

/// How currency amounts are rendered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyFormat {
    pub symbol: String,
    pub thousands_separator: String,
    pub decimal_separator: String,
    /// Fraction digits shown, 0-2
    pub decimals: u8,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl CurrencyFormat {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            symbol: settings.currency_symbol.clone(),
            thousands_separator: settings.thousands_separator.clone(),
            decimal_separator: settings.decimal_separator.clone(),
            decimals: settings.decimals.min(2),
        }
    }

    /// Format an amount, rounding half away from zero to the configured
    /// number of decimals.
    ///
    /// ```
    /// use pocketwise::display::CurrencyFormat;
    /// use pocketwise::models::Money;
    /// let fmt = CurrencyFormat::default();
    /// assert_eq!(fmt.format(Money::from_major(1_850_000)), "Rp1.850.000");
    /// ```
    pub fn format(&self, amount: Money) -> String {
        let decimals = u32::from(self.decimals.min(2));
        let step = 10u64.pow(2 - decimals);
        let per_unit = 10u64.pow(decimals);

        let units = (amount.minor().unsigned_abs() + step / 2) / step;
        let whole = group_digits(units / per_unit, &self.thousands_separator);

        let mut out = String::new();
        if amount.is_negative() && units > 0 {
            out.push('-');
        }
        out.push_str(&self.symbol);
        out.push_str(&whole);
        if decimals > 0 {
            out.push_str(&self.decimal_separator);
            out.push_str(&format!(
                "{:0width$}",
                units % per_unit,
                width = decimals as usize
            ));
        }
        out
    }

    /// Format with an explicit sign, as transaction lists show amounts
    pub fn format_signed(&self, amount: Money) -> String {
        if amount.is_positive() {
            format!("+{}", self.format(amount))
        } else {
            self.format(amount)
        }
    }
}

fn group_digits(value: u64, separator: &str) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 * separator.len());
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(c);
    }
    out
}

/// Format a percentage with a fixed number of decimals
pub fn format_percentage(pct: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, pct)
}

/// Shorten large numbers for chart axes: 1500 -> "1.5K", 2000000 -> "2.0M"
pub fn format_compact(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1_000_000_000.0 {
        format!("{:.1}B", value / 1_000_000_000.0)
    } else if abs >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("{:.1}K", value / 1_000.0)
    } else {
        format!("{:.0}", value)
    }
}

/// Text progress bar for a ratio; values outside 0..=1 are clamped
pub fn progress_bar(ratio: f64, width: usize) -> String {
    let ratio = if ratio.is_finite() { ratio.clamp(0.0, 1.0) } else { 0.0 };
    let filled = ((ratio * width as f64).round() as usize).min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Truncate a string to a maximum length with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usd() -> CurrencyFormat {
        CurrencyFormat {
            symbol: "$".to_string(),
            thousands_separator: ",".to_string(),
            decimal_separator: ".".to_string(),
            decimals: 2,
        }
    }

    #[test]
    fn test_idr_format() {
        let fmt = CurrencyFormat::default();
        assert_eq!(fmt.format(Money::from_major(1_850_000)), "Rp1.850.000");
        assert_eq!(fmt.format(Money::from_major(150_000)), "Rp150.000");
        assert_eq!(fmt.format(Money::from_major(-3_200)), "-Rp3.200");
        assert_eq!(fmt.format(Money::zero()), "Rp0");
        assert_eq!(fmt.format(Money::from_minor(99_950)), "Rp1.000");
    }

    #[test]
    fn test_decimal_format() {
        let fmt = usd();
        assert_eq!(fmt.format(Money::from_minor(123_456_789)), "$1,234,567.89");
        assert_eq!(fmt.format(Money::from_minor(5)), "$0.05");
        assert_eq!(fmt.format_signed(Money::from_minor(1050)), "+$10.50");

        let one = CurrencyFormat { decimals: 1, ..usd() };
        assert_eq!(one.format(Money::from_minor(1055)), "$10.6");
    }

    #[test]
    fn test_negative_rounding_to_zero_has_no_sign() {
        assert_eq!(CurrencyFormat::default().format(Money::from_minor(-10)), "Rp0");
    }

    #[test]
    fn test_percentage_and_compact() {
        assert_eq!(format_percentage(61.666, 1), "61.7%");
        assert_eq!(format_percentage(100.0, 0), "100%");
        assert_eq!(format_compact(1_500.0), "1.5K");
        assert_eq!(format_compact(2_000_000.0), "2.0M");
        assert_eq!(format_compact(1_000_000_000.0), "1.0B");
        assert_eq!(format_compact(999.0), "999");
    }

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0.5, 10), "█████░░░░░");
        assert_eq!(progress_bar(1.7, 4), "████");
        assert_eq!(progress_bar(f64::NAN, 3), "░░░");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Lunch", 10), "Lunch");
        assert_eq!(truncate("Lunch at restaurant", 10), "Lunch a...");
    }
}
