use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

use pocketwise::cli::{
    handle_budget_command, handle_category_command, handle_config_command,
    handle_dashboard_command, handle_goal_command, handle_history_command, handle_init_command,
    handle_report_command, handle_transaction_command,
};
use pocketwise::config::{PocketPaths, Settings};
use pocketwise::logging::init_tracing;
use pocketwise::storage::Storage;

#[derive(Parser)]
#[command(
    name = "pocketwise",
    version,
    about = "Personal finance ledger: transactions, budgets and savings goals",
    long_about = "Pocketwise records income and expenses by category, tracks \
                  spending budgets over daily, weekly, monthly or yearly periods, \
                  and projects how long savings goals will take to reach."
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data directory and default categories
    Init,

    /// Show or change settings
    Config {
        #[command(subcommand)]
        command: Option<pocketwise::cli::ConfigCommands>,
    },

    /// This month at a glance
    #[command(alias = "dash")]
    Dashboard {
        /// Show the month containing this date (YYYY-MM-DD)
        #[arg(long)]
        as_of: Option<String>,
    },

    /// Transaction management commands
    #[command(subcommand, alias = "txn")]
    Transaction(pocketwise::cli::TransactionCommands),

    /// Category management commands
    #[command(subcommand)]
    Category(pocketwise::cli::CategoryCommands),

    /// Budget management commands
    #[command(subcommand)]
    Budget(pocketwise::cli::BudgetCommands),

    /// Savings goal commands
    #[command(subcommand)]
    Goal(pocketwise::cli::GoalCommands),

    /// Reports over recorded transactions
    #[command(subcommand)]
    Report(pocketwise::cli::ReportCommands),

    /// Show recent changes from the audit log
    History {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "20")]
        count: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Initialize paths and settings
    let paths = PocketPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    let Some(command) = cli.command else {
        println!("Pocketwise - personal finance ledger");
        println!();
        println!("Run 'pocketwise init' to get started.");
        println!("Run 'pocketwise --help' for usage information.");
        return Ok(());
    };

    match command {
        Commands::Init => return Ok(handle_init_command(&paths, &settings)?),
        Commands::Config { command } => {
            return Ok(handle_config_command(&paths, &mut settings, command)?)
        }
        _ => {}
    }

    if !paths.is_initialized() {
        eprintln!("Pocketwise has no data yet. Run 'pocketwise init' first.");
    }

    let storage = Storage::new(paths)?;
    storage.load_all()?;

    match command {
        Commands::Dashboard { as_of } => {
            handle_dashboard_command(&storage, &settings, as_of.as_deref())?
        }
        Commands::Transaction(cmd) => handle_transaction_command(&storage, &settings, cmd)?,
        Commands::Category(cmd) => handle_category_command(&storage, cmd)?,
        Commands::Budget(cmd) => handle_budget_command(&storage, &settings, cmd)?,
        Commands::Goal(cmd) => handle_goal_command(&storage, &settings, cmd)?,
        Commands::Report(cmd) => handle_report_command(&storage, &settings, cmd)?,
        Commands::History { count } => handle_history_command(&storage, count)?,
        Commands::Init | Commands::Config { .. } => {}
    }

    Ok(())
}
