//! Spending by category
//!
//! Groups transactions of one direction by category identifier and ranks the
//! groups by amount. Transactions whose category is unknown are pooled into
//! a single "Uncategorized" group.

use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

use crate::models::{Category, CategoryId, Money, Transaction, TransactionType};

/// Name used for transactions whose category is not in the category list
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Name of the folded remainder in a top-N breakdown
pub const OTHER: &str = "Other";

const FALLBACK_COLOR: &str = "#6B7280";
const FALLBACK_ICON: &str = "help-circle-outline";

/// Total for one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySpend {
    /// None for the uncategorized pool and the "Other" remainder
    pub category_id: Option<CategoryId>,
    pub name: String,
    pub color: String,
    pub icon: String,
    pub amount: Money,
    pub transaction_count: usize,
    /// Share of the breakdown total in percent
    pub percentage: f64,
}

/// Expense totals per category, largest first
pub fn spend_by_category(
    transactions: &[Transaction],
    categories: &[Category],
) -> Vec<CategorySpend> {
    aggregate(transactions, categories, TransactionType::Expense)
}

/// Income totals per category, largest first
pub fn income_by_category(
    transactions: &[Transaction],
    categories: &[Category],
) -> Vec<CategorySpend> {
    aggregate(transactions, categories, TransactionType::Income)
}

fn aggregate(
    transactions: &[Transaction],
    categories: &[Category],
    kind: TransactionType,
) -> Vec<CategorySpend> {
    let lookup: HashMap<CategoryId, &Category> = categories.iter().map(|c| (c.id, c)).collect();

    // Groups in first-seen order so the stable sort keeps ties that way
    let mut index: HashMap<Option<CategoryId>, usize> = HashMap::new();
    let mut groups: Vec<CategorySpend> = Vec::new();

    for txn in transactions.iter().filter(|t| t.kind == kind) {
        let key = lookup.contains_key(&txn.category_id).then_some(txn.category_id);

        let slot = *index.entry(key).or_insert_with(|| {
            groups.push(new_group(key.and_then(|id| lookup.get(&id).copied())));
            groups.len() - 1
        });

        let group = &mut groups[slot];
        group.amount += txn.amount;
        group.transaction_count += 1;
    }

    let total: Money = groups.iter().map(|g| g.amount).sum();
    for group in &mut groups {
        group.percentage = share(group.amount, total);
    }

    groups.sort_by(|a, b| b.amount.cmp(&a.amount));

    debug!(
        %kind,
        groups = groups.len(),
        total = %total,
        "aggregated transactions by category"
    );

    groups
}

fn new_group(category: Option<&Category>) -> CategorySpend {
    match category {
        Some(c) => CategorySpend {
            category_id: Some(c.id),
            name: c.name.clone(),
            color: c.color.clone(),
            icon: c.icon.clone(),
            amount: Money::zero(),
            transaction_count: 0,
            percentage: 0.0,
        },
        None => CategorySpend {
            category_id: None,
            name: UNCATEGORIZED.to_string(),
            color: FALLBACK_COLOR.to_string(),
            icon: FALLBACK_ICON.to_string(),
            amount: Money::zero(),
            transaction_count: 0,
            percentage: 0.0,
        },
    }
}

fn share(amount: Money, total: Money) -> f64 {
    if total.is_zero() {
        0.0
    } else {
        amount.minor() as f64 / total.minor() as f64 * 100.0
    }
}

/// The first `n` entries of a ranked breakdown. Anything cut is folded into
/// a trailing "Other" entry so the chart still adds up to the total.
pub fn top_categories(spends: &[CategorySpend], n: usize) -> Vec<CategorySpend> {
    if spends.len() <= n {
        return spends.to_vec();
    }

    let (head, tail) = spends.split_at(n);
    let mut top = head.to_vec();
    top.push(CategorySpend {
        category_id: None,
        name: OTHER.to_string(),
        color: FALLBACK_COLOR.to_string(),
        icon: "ellipsis-horizontal-outline".to_string(),
        amount: tail.iter().map(|s| s.amount).sum(),
        transaction_count: tail.iter().map(|s| s.transaction_count).sum(),
        percentage: tail.iter().map(|s| s.percentage).sum(),
    });
    top
}
