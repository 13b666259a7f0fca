//! Budget periods and date ranges
//!
//! A budget declares one of four period kinds. Progress is always measured
//! against the calendar-aligned window of that kind which contains an anchor
//! date: the day itself, the week (starting on a configurable weekday), the
//! calendar month, or the calendar year.

use chrono::{Datelike, Duration, Months, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How often a budget's limit resets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BudgetPeriod {
    Daily,
    Weekly,
    #[default]
    Monthly,
    Yearly,
}

impl BudgetPeriod {
    /// The calendar-aligned window of this kind that contains `anchor`.
    ///
    /// Weekly windows start on `week_start` and span seven days.
    pub fn window(&self, anchor: NaiveDate, week_start: Weekday) -> DateRange {
        match self {
            Self::Daily => DateRange {
                start: anchor,
                end: anchor,
            },
            Self::Weekly => {
                let offset = (7 + anchor.weekday().num_days_from_monday()
                    - week_start.num_days_from_monday())
                    % 7;
                let start = anchor - Duration::days(offset as i64);
                DateRange {
                    start,
                    end: start + Duration::days(6),
                }
            }
            Self::Monthly => DateRange::month_of(anchor),
            Self::Yearly => {
                let start = NaiveDate::from_ymd_opt(anchor.year(), 1, 1).unwrap_or(anchor);
                let end = NaiveDate::from_ymd_opt(anchor.year(), 12, 31).unwrap_or(anchor);
                DateRange { start, end }
            }
        }
    }
}

impl fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Daily => write!(f, "daily"),
            Self::Weekly => write!(f, "weekly"),
            Self::Monthly => write!(f, "monthly"),
            Self::Yearly => write!(f, "yearly"),
        }
    }
}

impl FromStr for BudgetPeriod {
    type Err = PeriodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" | "day" | "d" => Ok(Self::Daily),
            "weekly" | "week" | "w" => Ok(Self::Weekly),
            "monthly" | "month" | "m" => Ok(Self::Monthly),
            "yearly" | "year" | "annual" | "y" => Ok(Self::Yearly),
            other => Err(PeriodParseError::UnknownPeriod(other.to_string())),
        }
    }
}

/// An inclusive range of calendar dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Create a range, rejecting an end before the start
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, PeriodParseError> {
        if end < start {
            return Err(PeriodParseError::Reversed { start, end });
        }
        Ok(Self { start, end })
    }

    /// The calendar month containing `date`
    pub fn month_of(date: NaiveDate) -> Self {
        let start = date.with_day(1).unwrap_or(date);
        let end = start
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(date);
        Self { start, end }
    }

    /// The calendar year containing `date`
    pub fn year_of(date: NaiveDate) -> Self {
        BudgetPeriod::Yearly.window(date, Weekday::Mon)
    }

    /// Check if a date falls within this range (both bounds inclusive)
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Number of days covered, counting both ends
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// The overlap of two ranges, if any
    pub fn intersect(&self, other: &DateRange) -> Option<DateRange> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (start <= end).then_some(DateRange { start, end })
    }

    /// Parse a range string
    ///
    /// Formats:
    /// - Year: "2025"
    /// - Month: "2025-01"
    /// - Explicit: "2025-01-01..2025-01-15"
    pub fn parse(s: &str) -> Result<Self, PeriodParseError> {
        let s = s.trim();

        if let Some((start, end)) = s.split_once("..") {
            let start = NaiveDate::parse_from_str(start.trim(), "%Y-%m-%d")
                .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;
            let end = NaiveDate::parse_from_str(end.trim(), "%Y-%m-%d")
                .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;
            return Self::new(start, end);
        }

        let parts: Vec<&str> = s.split('-').collect();
        match parts.as_slice() {
            [year] => {
                let year: i32 = year
                    .parse()
                    .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;
                let date = NaiveDate::from_ymd_opt(year, 1, 1)
                    .ok_or_else(|| PeriodParseError::InvalidFormat(s.to_string()))?;
                Ok(Self::year_of(date))
            }
            [year, month] => {
                let year: i32 = year
                    .parse()
                    .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;
                let month: u32 = month
                    .parse()
                    .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;
                if !(1..=12).contains(&month) {
                    return Err(PeriodParseError::InvalidMonth(month));
                }
                let date = NaiveDate::from_ymd_opt(year, month, 1)
                    .ok_or_else(|| PeriodParseError::InvalidFormat(s.to_string()))?;
                Ok(Self::month_of(date))
            }
            _ => Err(PeriodParseError::InvalidFormat(s.to_string())),
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}..{}",
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }
}

/// Convert a 0-6 index (0 = Sunday) into a weekday
pub fn weekday_from_index(index: u8) -> Weekday {
    match index % 7 {
        0 => Weekday::Sun,
        1 => Weekday::Mon,
        2 => Weekday::Tue,
        3 => Weekday::Wed,
        4 => Weekday::Thu,
        5 => Weekday::Fri,
        _ => Weekday::Sat,
    }
}

/// Error type for period and range parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodParseError {
    InvalidFormat(String),
    InvalidMonth(u32),
    UnknownPeriod(String),
    Reversed { start: NaiveDate, end: NaiveDate },
}

impl fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat(s) => write!(f, "Invalid date range format: {}", s),
            Self::InvalidMonth(m) => write!(f, "Invalid month: {}", m),
            Self::UnknownPeriod(p) => {
                write!(f, "Unknown period '{}' (use daily, weekly, monthly or yearly)", p)
            }
            Self::Reversed { start, end } => {
                write!(f, "Range end {} is before its start {}", end, start)
            }
        }
    }
}

impl std::error::Error for PeriodParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_monthly_window() {
        let window = BudgetPeriod::Monthly.window(date(2025, 2, 14), Weekday::Mon);
        assert_eq!(window.start, date(2025, 2, 1));
        assert_eq!(window.end, date(2025, 2, 28));

        let leap = BudgetPeriod::Monthly.window(date(2024, 2, 29), Weekday::Mon);
        assert_eq!(leap.end, date(2024, 2, 29));

        let december = BudgetPeriod::Monthly.window(date(2024, 12, 31), Weekday::Mon);
        assert_eq!(december.start, date(2024, 12, 1));
        assert_eq!(december.end, date(2024, 12, 31));
    }

    #[test]
    fn test_weekly_window_monday_start() {
        // 2025-01-15 is a Wednesday
        let window = BudgetPeriod::Weekly.window(date(2025, 1, 15), Weekday::Mon);
        assert_eq!(window.start, date(2025, 1, 13));
        assert_eq!(window.end, date(2025, 1, 19));
        assert_eq!(window.days(), 7);
    }

    #[test]
    fn test_weekly_window_sunday_start() {
        let window = BudgetPeriod::Weekly.window(date(2025, 1, 15), Weekday::Sun);
        assert_eq!(window.start, date(2025, 1, 12));
        assert_eq!(window.end, date(2025, 1, 18));

        // Anchor on the start day itself
        let window = BudgetPeriod::Weekly.window(date(2025, 1, 12), Weekday::Sun);
        assert_eq!(window.start, date(2025, 1, 12));
    }

    #[test]
    fn test_weekly_window_crosses_year() {
        let window = BudgetPeriod::Weekly.window(date(2025, 1, 1), Weekday::Mon);
        assert_eq!(window.start, date(2024, 12, 30));
        assert_eq!(window.end, date(2025, 1, 5));
    }

    #[test]
    fn test_daily_and_yearly_windows() {
        let day = BudgetPeriod::Daily.window(date(2025, 3, 9), Weekday::Mon);
        assert_eq!(day.start, day.end);
        assert_eq!(day.days(), 1);

        let year = BudgetPeriod::Yearly.window(date(2025, 7, 4), Weekday::Mon);
        assert_eq!(year.start, date(2025, 1, 1));
        assert_eq!(year.end, date(2025, 12, 31));
    }

    #[test]
    fn test_contains_is_inclusive() {
        let jan = DateRange::month_of(date(2025, 1, 10));
        assert!(jan.contains(date(2025, 1, 1)));
        assert!(jan.contains(date(2025, 1, 31)));
        assert!(!jan.contains(date(2025, 2, 1)));
    }

    #[test]
    fn test_intersect() {
        let jan = DateRange::month_of(date(2025, 1, 10));
        let late = DateRange::new(date(2025, 1, 20), date(2025, 3, 1)).unwrap();
        assert_eq!(
            jan.intersect(&late),
            Some(DateRange::new(date(2025, 1, 20), date(2025, 1, 31)).unwrap())
        );

        let feb = DateRange::month_of(date(2025, 2, 1));
        assert_eq!(jan.intersect(&feb), None);
    }

    #[test]
    fn test_parse_ranges() {
        assert_eq!(
            DateRange::parse("2025-01").unwrap(),
            DateRange::month_of(date(2025, 1, 1))
        );
        assert_eq!(
            DateRange::parse("2025").unwrap(),
            DateRange::new(date(2025, 1, 1), date(2025, 12, 31)).unwrap()
        );
        assert_eq!(
            DateRange::parse("2025-01-05..2025-01-09").unwrap().days(),
            5
        );
        assert_eq!(
            DateRange::parse("2025-13"),
            Err(PeriodParseError::InvalidMonth(13))
        );
        assert!(matches!(
            DateRange::parse("2025-01-09..2025-01-05"),
            Err(PeriodParseError::Reversed { .. })
        ));
    }

    #[test]
    fn test_period_from_str_and_display() {
        assert_eq!("Weekly".parse::<BudgetPeriod>().unwrap(), BudgetPeriod::Weekly);
        assert_eq!("y".parse::<BudgetPeriod>().unwrap(), BudgetPeriod::Yearly);
        assert!("fortnightly".parse::<BudgetPeriod>().is_err());
        assert_eq!(BudgetPeriod::Daily.to_string(), "daily");
    }

    #[test]
    fn test_weekday_from_index() {
        assert_eq!(weekday_from_index(0), Weekday::Sun);
        assert_eq!(weekday_from_index(1), Weekday::Mon);
        assert_eq!(weekday_from_index(6), Weekday::Sat);
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&BudgetPeriod::Weekly).unwrap();
        assert_eq!(json, "\"weekly\"");
    }
}
