//! Goal CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_percentage, goal_table, progress_bar, CurrencyFormat};
use crate::error::{PocketError, PocketResult};
use crate::models::Goal;
use crate::reports::{goal_status, months_to_completion, project_balance};
use crate::services::{GoalService, UpdateGoalInput};
use crate::storage::Storage;

use super::{parse_amount, parse_optional_date, today};

/// Goal subcommands
#[derive(Subcommand)]
pub enum GoalCommands {
    /// Create a savings goal
    Add {
        /// Goal name
        name: String,
        /// Amount to reach
        target: String,
        /// Amount already saved
        #[arg(short, long)]
        current: Option<String>,
        /// Date to reach the goal by (YYYY-MM-DD)
        #[arg(short, long)]
        deadline: Option<String>,
        /// Annual interest rate in percent earned on the balance
        #[arg(short, long, allow_hyphen_values = true)]
        rate: Option<f64>,
    },
    /// List goals with progress
    List,
    /// Project how long a goal takes at a monthly contribution
    Project {
        /// Goal name or ID
        goal: String,
        /// Monthly contribution
        #[arg(short, long)]
        monthly: String,
        /// Also project the balance this many years ahead
        #[arg(short, long)]
        years: Option<f64>,
        /// Compounding periods per year for the balance projection
        #[arg(long, default_value = "12")]
        compounding: u32,
    },
    /// Change a goal's definition
    Edit {
        /// Goal name or ID
        goal: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New amount to reach
        #[arg(short, long)]
        target: Option<String>,
        /// Correct the amount saved so far
        #[arg(short, long)]
        current: Option<String>,
        /// New deadline (YYYY-MM-DD)
        #[arg(short, long, conflicts_with = "no_deadline")]
        deadline: Option<String>,
        /// Remove the deadline
        #[arg(long)]
        no_deadline: bool,
        /// New annual interest rate in percent
        #[arg(short, long, allow_hyphen_values = true, conflicts_with = "no_rate")]
        rate: Option<f64>,
        /// Remove the interest rate
        #[arg(long)]
        no_rate: bool,
    },
    /// Add money to a goal
    Contribute {
        /// Goal name or ID
        goal: String,
        amount: String,
    },
    /// Delete a goal
    Delete {
        /// Goal name or ID
        goal: String,
    },
}

/// Handle a goal command
pub fn handle_goal_command(
    storage: &Storage,
    settings: &Settings,
    cmd: GoalCommands,
) -> PocketResult<()> {
    let service = GoalService::new(storage);
    let fmt = CurrencyFormat::from_settings(settings);

    let find = |reference: &str| -> PocketResult<Goal> {
        service
            .find(reference)?
            .ok_or_else(|| PocketError::goal_not_found(reference))
    };

    match cmd {
        GoalCommands::Add {
            name,
            target,
            current,
            deadline,
            rate,
        } => {
            let mut goal = Goal::new(name, parse_amount(&target, settings)?);
            if let Some(current) = current {
                goal = goal.with_current(parse_amount(&current, settings)?);
            }
            if let Some(deadline) = parse_optional_date(deadline.as_deref())? {
                goal = goal.with_deadline(deadline);
            }
            if let Some(rate) = rate {
                goal = goal.with_interest_rate(rate);
            }

            let goal = service.create(goal)?;
            println!("Created goal: {}", goal.name);
            println!("  ID:     {}", goal.id);
            println!("  Target: {}", fmt.format(goal.target));
            if let Some(deadline) = goal.deadline {
                println!("  By:     {}", deadline.format(&settings.date_format));
            }
        }

        GoalCommands::List => {
            let as_of = today();
            let statuses = service
                .list()?
                .iter()
                .map(|g| goal_status(g, None, as_of))
                .collect::<PocketResult<Vec<_>>>()?;
            println!("{}", goal_table(&statuses, &fmt));
        }

        GoalCommands::Project {
            goal,
            monthly,
            years,
            compounding,
        } => {
            let goal = find(&goal)?;
            let monthly = parse_amount(&monthly, settings)?;
            let status = goal_status(&goal, Some(monthly), today())?;

            println!("Goal: {}", goal.name);
            println!(
                "  Saved:     {} of {} {} {}",
                fmt.format(goal.current),
                fmt.format(goal.target),
                progress_bar(status.progress, 20),
                format_percentage(status.progress * 100.0, 0)
            );
            println!("  Remaining: {}", fmt.format(status.remaining));
            println!(
                "  At {}/month: {}",
                fmt.format(monthly),
                months_to_completion(&goal, monthly)?
            );
            if let Some(required) = status.required_monthly {
                println!("  Needed per month to meet the deadline: {}", fmt.format(required));
            }
            if let Some(years) = years {
                let balance = project_balance(&goal, years, compounding)?;
                println!(
                    "  Balance in {} years at {}: {}",
                    years,
                    format_percentage(goal.interest_rate.unwrap_or(0.0), 2),
                    fmt.format(balance)
                );
            }
        }

        GoalCommands::Edit {
            goal,
            name,
            target,
            current,
            deadline,
            no_deadline,
            rate,
            no_rate,
        } => {
            let goal = find(&goal)?;
            let deadline = match parse_optional_date(deadline.as_deref())? {
                Some(deadline) => Some(Some(deadline)),
                None if no_deadline => Some(None),
                None => None,
            };
            let interest_rate = match rate {
                Some(rate) => Some(Some(rate)),
                None if no_rate => Some(None),
                None => None,
            };

            let input = UpdateGoalInput {
                name,
                target: target.map(|t| parse_amount(&t, settings)).transpose()?,
                current: current.map(|c| parse_amount(&c, settings)).transpose()?,
                deadline,
                interest_rate,
                ..Default::default()
            };
            if input.is_empty() {
                println!("Nothing to change for goal '{}'.", goal.name);
                return Ok(());
            }

            let updated = service.update(goal.id, input)?;
            println!("Updated goal: {}", updated.name);
            println!(
                "  Saved:  {} of {}",
                fmt.format(updated.current),
                fmt.format(updated.target)
            );
            if let Some(deadline) = updated.deadline {
                println!("  By:     {}", deadline.format(&settings.date_format));
            }
            if let Some(rate) = updated.interest_rate {
                println!("  Rate:   {}", format_percentage(rate, 2));
            }
        }

        GoalCommands::Contribute { goal, amount } => {
            let goal = find(&goal)?;
            let updated = service.contribute(goal.id, parse_amount(&amount, settings)?)?;
            println!(
                "Saved {} toward '{}' ({} of {})",
                fmt.format(updated.current - goal.current),
                updated.name,
                fmt.format(updated.current),
                fmt.format(updated.target)
            );
            if updated.is_reached() && !goal.is_reached() {
                println!("Goal reached!");
            }
        }

        GoalCommands::Delete { goal } => {
            let goal = find(&goal)?;
            service.delete(goal.id)?;
            println!("Deleted goal: {}", goal.name);
        }
    }

    Ok(())
}
