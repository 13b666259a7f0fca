//! Category CLI commands

use clap::Subcommand;

use crate::display::category_table;
use crate::error::PocketResult;
use crate::models::{CategoryKind, TransactionType};
use crate::services::{CategoryService, UpdateCategoryInput};
use crate::storage::Storage;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// Create a custom category
    Add {
        /// Category name
        name: String,
        /// income, expense or both
        #[arg(short = 't', long = "type", default_value = "expense")]
        kind: CategoryKind,
        /// Icon token (e.g. "paw-outline")
        #[arg(short, long)]
        icon: Option<String>,
        /// Color as #RRGGBB
        #[arg(short, long)]
        color: Option<String>,
    },
    /// List categories
    List {
        /// Only categories usable for income or expense
        #[arg(short = 't', long = "type")]
        kind: Option<TransactionType>,
    },
    /// Change a category's name, icon, color or type
    Edit {
        /// Category name or ID
        category: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// income, expense or both
        #[arg(short = 't', long = "type")]
        kind: Option<CategoryKind>,
        /// Icon token
        #[arg(short, long)]
        icon: Option<String>,
        /// Color as #RRGGBB
        #[arg(short, long)]
        color: Option<String>,
    },
    /// Delete a category
    Delete {
        /// Category name or ID
        category: String,
        /// Delete even if transactions or budgets use it
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle a category command
pub fn handle_category_command(storage: &Storage, cmd: CategoryCommands) -> PocketResult<()> {
    let service = CategoryService::new(storage);

    match cmd {
        CategoryCommands::Add {
            name,
            kind,
            icon,
            color,
        } => {
            let category = service.create(&name, kind, icon.as_deref(), color.as_deref())?;
            println!("Created category: {}", category.name);
            println!("  ID:   {}", category.id);
            println!("  Type: {}", category.kind);
        }

        CategoryCommands::List { kind } => {
            let categories = match kind {
                Some(kind) => service.list_for(kind)?,
                None => service.list()?,
            };
            println!("{}", category_table(&categories));
        }

        CategoryCommands::Edit {
            category,
            name,
            kind,
            icon,
            color,
        } => {
            let category = service.resolve(&category)?;
            let updated = service.update(
                category.id,
                UpdateCategoryInput {
                    name,
                    icon,
                    color,
                    kind,
                },
            )?;
            println!("Updated category: {}", updated.name);
            println!("  Type:  {}", updated.kind);
            println!("  Icon:  {}", updated.icon);
            println!("  Color: {}", updated.color);
        }

        CategoryCommands::Delete { category, force } => {
            let category = service.resolve(&category)?;
            service.delete(category.id, force)?;
            println!("Deleted category: {}", category.name);
        }
    }

    Ok(())
}
