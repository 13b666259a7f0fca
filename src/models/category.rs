//! Category model
//!
//! Categories label transactions for grouping and carry the icon and color
//! tokens used by charts and legends.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::CategoryId;
use super::transaction::TransactionType;

/// Which transaction types a category can be used with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    Income,
    Expense,
    Both,
}

impl CategoryKind {
    /// Whether a transaction of the given type may use this category
    pub fn accepts(&self, kind: TransactionType) -> bool {
        matches!(
            (self, kind),
            (Self::Both, _)
                | (Self::Income, TransactionType::Income)
                | (Self::Expense, TransactionType::Expense)
        )
    }
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "income"),
            Self::Expense => write!(f, "expense"),
            Self::Both => write!(f, "both"),
        }
    }
}

impl FromStr for CategoryKind {
    type Err = CategoryValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            "both" => Ok(Self::Both),
            other => Err(CategoryValidationError::UnknownKind(other.to_string())),
        }
    }
}

/// A transaction category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier
    pub id: CategoryId,

    /// Display name
    pub name: String,

    /// Icon token (e.g. "restaurant-outline")
    pub icon: String,

    /// Color token (e.g. "#EF4444")
    pub color: String,

    /// Which transaction types may use this category
    pub kind: CategoryKind,

    /// Whether the user created this category (as opposed to a default)
    #[serde(default)]
    pub is_custom: bool,

    /// When the category was created
    pub created_at: DateTime<Utc>,
}

impl Category {
    /// Create a new category
    pub fn new(
        name: impl Into<String>,
        icon: impl Into<String>,
        color: impl Into<String>,
        kind: CategoryKind,
    ) -> Self {
        Self {
            id: CategoryId::new(),
            name: name.into(),
            icon: icon.into(),
            color: color.into(),
            kind,
            is_custom: false,
            created_at: Utc::now(),
        }
    }

    /// Create a user-defined category
    pub fn custom(
        name: impl Into<String>,
        icon: impl Into<String>,
        color: impl Into<String>,
        kind: CategoryKind,
    ) -> Self {
        let mut category = Self::new(name, icon, color, kind);
        category.is_custom = true;
        category
    }

    /// Validate the category
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        if self.name.trim().is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }

        if self.name.len() > 50 {
            return Err(CategoryValidationError::NameTooLong(self.name.len()));
        }

        if !is_color_token(&self.color) {
            return Err(CategoryValidationError::InvalidColor(self.color.clone()));
        }

        Ok(())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// `#RRGGBB` hex color
fn is_color_token(color: &str) -> bool {
    color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit())
}

/// A seed category created on first run
#[derive(Debug, Clone, Copy)]
pub struct DefaultCategory {
    pub name: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
    pub kind: CategoryKind,
}

impl DefaultCategory {
    const fn new(
        name: &'static str,
        icon: &'static str,
        color: &'static str,
        kind: CategoryKind,
    ) -> Self {
        Self {
            name,
            icon,
            color,
            kind,
        }
    }

    /// All default categories, income first
    pub fn all() -> &'static [DefaultCategory] {
        &DEFAULT_CATEGORIES
    }

    /// Build the category record
    pub fn to_category(&self) -> Category {
        Category::new(self.name, self.icon, self.color, self.kind)
    }
}

static DEFAULT_CATEGORIES: [DefaultCategory; 13] = [
    DefaultCategory::new("Salary", "cash-outline", "#10B981", CategoryKind::Income),
    DefaultCategory::new("Freelance", "briefcase-outline", "#3B82F6", CategoryKind::Income),
    DefaultCategory::new("Investment", "trending-up-outline", "#8B5CF6", CategoryKind::Income),
    DefaultCategory::new("Gift", "gift-outline", "#EC4899", CategoryKind::Income),
    DefaultCategory::new("Other Income", "add-circle-outline", "#6366F1", CategoryKind::Income),
    DefaultCategory::new("Food & Dining", "restaurant-outline", "#EF4444", CategoryKind::Expense),
    DefaultCategory::new("Transportation", "car-outline", "#F59E0B", CategoryKind::Expense),
    DefaultCategory::new("Shopping", "cart-outline", "#EC4899", CategoryKind::Expense),
    DefaultCategory::new("Entertainment", "game-controller-outline", "#8B5CF6", CategoryKind::Expense),
    DefaultCategory::new("Bills & Utilities", "receipt-outline", "#6366F1", CategoryKind::Expense),
    DefaultCategory::new("Healthcare", "medical-outline", "#10B981", CategoryKind::Expense),
    DefaultCategory::new("Education", "school-outline", "#3B82F6", CategoryKind::Expense),
    DefaultCategory::new("Other Expense", "remove-circle-outline", "#6B7280", CategoryKind::Expense),
];

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong(usize),
    InvalidColor(String),
    UnknownKind(String),
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Category name too long ({} chars, max 50)", len)
            }
            Self::InvalidColor(c) => write!(f, "Invalid color '{}' (expected #RRGGBB)", c),
            Self::UnknownKind(k) => {
                write!(f, "Unknown category type '{}' (use income, expense or both)", k)
            }
        }
    }
}

impl std::error::Error for CategoryValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_category() {
        let category = Category::new("Food & Dining", "restaurant-outline", "#EF4444", CategoryKind::Expense);
        assert_eq!(category.name, "Food & Dining");
        assert!(!category.is_custom);
        assert!(category.validate().is_ok());

        let custom = Category::custom("Pets", "paw-outline", "#123abc", CategoryKind::Both);
        assert!(custom.is_custom);
    }

    #[test]
    fn test_kind_accepts() {
        assert!(CategoryKind::Both.accepts(TransactionType::Income));
        assert!(CategoryKind::Both.accepts(TransactionType::Expense));
        assert!(CategoryKind::Income.accepts(TransactionType::Income));
        assert!(!CategoryKind::Income.accepts(TransactionType::Expense));
        assert!(!CategoryKind::Expense.accepts(TransactionType::Income));
    }

    #[test]
    fn test_validation() {
        let mut category = Category::new("Valid", "icon", "#FFFFFF", CategoryKind::Expense);

        category.name = "  ".to_string();
        assert_eq!(category.validate(), Err(CategoryValidationError::EmptyName));

        category.name = "a".repeat(51);
        assert!(matches!(
            category.validate(),
            Err(CategoryValidationError::NameTooLong(51))
        ));

        category.name = "Valid".to_string();
        category.color = "red".to_string();
        assert!(matches!(
            category.validate(),
            Err(CategoryValidationError::InvalidColor(_))
        ));
    }

    #[test]
    fn test_defaults() {
        let defaults = DefaultCategory::all();
        assert_eq!(defaults.len(), 13);
        assert!(defaults.iter().all(|d| d.to_category().validate().is_ok()));
        assert_eq!(
            defaults
                .iter()
                .filter(|d| d.kind == CategoryKind::Income)
                .count(),
            5
        );
    }

    #[test]
    fn test_kind_parse() {
        assert_eq!("BOTH".parse::<CategoryKind>().unwrap(), CategoryKind::Both);
        assert!("savings".parse::<CategoryKind>().is_err());
    }
}
