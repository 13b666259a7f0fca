//! Dashboard rendering

use crate::reports::{BudgetStatus, MonthlyTotals};
use crate::services::Dashboard;

use super::format::{format_compact, format_percentage, progress_bar, separator, CurrencyFormat};

const WIDTH: usize = 56;

/// Render the dashboard as plain text
pub fn format_dashboard(dashboard: &Dashboard, fmt: &CurrencyFormat) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Pocketwise: {}\n",
        dashboard.range.start.format("%B %Y")
    ));
    output.push_str(&separator(WIDTH));
    output.push('\n');

    let summary = &dashboard.summary;
    output.push_str(&format!("Balance:   {:>20}\n", fmt.format(summary.balance)));
    output.push_str(&format!(
        "Income:    {:>20}  {}\n",
        fmt.format(summary.income),
        change_label(dashboard.income_change)
    ));
    output.push_str(&format!(
        "Expenses:  {:>20}  {}\n",
        fmt.format(summary.expenses),
        change_label(dashboard.expense_change)
    ));

    if !dashboard.spending.is_empty() {
        output.push_str("\nSpending by category\n");
        for spend in &dashboard.spending {
            output.push_str(&format!(
                "  {:<20} {:>16} {:>7}\n",
                spend.name,
                fmt.format(spend.amount),
                format_percentage(spend.percentage, 1)
            ));
        }
    }

    let alerts = dashboard.budgets.alerts();
    if !alerts.is_empty() {
        output.push_str("\nBudget alerts\n");
        for progress in alerts {
            let marker = match progress.status {
                BudgetStatus::Exceeded => "!!",
                _ => "! ",
            };
            output.push_str(&format!(
                "  {} {:<18} {} {}\n",
                marker,
                progress.name,
                progress_bar(progress.ratio, 10),
                format_percentage(progress.percentage_rounded(), 1)
            ));
        }
    }

    if !dashboard.goals.is_empty() {
        output.push_str("\nGoals\n");
        for goal in &dashboard.goals {
            output.push_str(&format!(
                "  {:<20} {} {:>4}  {} / {}\n",
                goal.name,
                progress_bar(goal.progress, 10),
                format_percentage(goal.progress * 100.0, 0),
                fmt.format(goal.current),
                fmt.format(goal.target)
            ));
        }
    }

    if !dashboard.recent.is_empty() {
        output.push_str("\nRecent transactions\n");
        for txn in &dashboard.recent {
            output.push_str(&format!(
                "  {} {:>16}  {}\n",
                txn.date.format("%Y-%m-%d"),
                fmt.format_signed(txn.signed_amount()),
                txn.note.as_deref().unwrap_or("")
            ));
        }
    }

    output.push_str("\nTrend\n");
    output.push_str(&format_trend_chart(&dashboard.trend));
    output
}

/// "+12.5% vs last month", or nothing when there is no change to report
fn change_label(change: f64) -> String {
    if change == 0.0 {
        return String::new();
    }
    let sign = if change > 0.0 { "+" } else { "" };
    format!("{}{} vs last month", sign, format_percentage(change, 1))
}

/// One bar per month, scaled to the busiest month's expenses
pub fn format_trend_chart(trend: &[MonthlyTotals]) -> String {
    let peak = trend
        .iter()
        .map(|m| m.expenses.as_major_f64())
        .fold(0.0_f64, f64::max);

    let mut output = String::new();
    for month in trend {
        let expenses = month.expenses.as_major_f64();
        let ratio = if peak > 0.0 { expenses / peak } else { 0.0 };
        output.push_str(&format!(
            "  {:<4} {} {}\n",
            month.label(),
            progress_bar(ratio, 20),
            format_compact(expenses)
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryId, Money, Transaction};
    use crate::reports::monthly_trend;
    use chrono::NaiveDate;

    #[test]
    fn test_change_label() {
        assert_eq!(change_label(0.0), "");
        assert_eq!(change_label(12.5), "+12.5% vs last month");
        assert_eq!(change_label(-50.0), "-50.0% vs last month");
    }

    #[test]
    fn test_trend_chart() {
        let cat = CategoryId::new();
        let txns = vec![
            Transaction::expense(cat, Money::from_major(2_000_000), NaiveDate::from_ymd_opt(2025, 11, 3).unwrap()),
            Transaction::expense(cat, Money::from_major(1_000_000), NaiveDate::from_ymd_opt(2025, 10, 3).unwrap()),
        ];
        let trend = monthly_trend(&txns, NaiveDate::from_ymd_opt(2025, 11, 30).unwrap(), 2);

        let chart = format_trend_chart(&trend);
        let lines: Vec<&str> = chart.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("Oct"));
        assert!(lines[0].ends_with("1.0M"));
        assert!(lines[1].contains(&"█".repeat(20)));
        assert!(lines[1].ends_with("2.0M"));
    }
}
