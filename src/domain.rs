use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Categories offered as defaults in the UI. Free-form labels are accepted
/// everywhere; this list is a hint, not a constraint.
pub const SUGGESTED_CATEGORIES: &[&str] = &[
    "Food",
    "Rent",
    "Transport",
    "Shopping",
    "Entertainment",
    "Health",
    "Salary",
    "Invest",
    "Transfer",
];

/// Cash-flow direction is a pure function of the kind, never of the sign
/// of the stored amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Income,
    Expense,
    Bill,
    Debt,
    Savings,
    Withdrawal,
}

impl EntryKind {
    /// Kinds that reduce available balance and count as spending.
    /// `Savings` is a transfer: it reduces balance but is not an outflow.
    pub fn is_outflow(self) -> bool {
        matches!(
            self,
            EntryKind::Expense | EntryKind::Bill | EntryKind::Debt | EntryKind::Withdrawal
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EntryKind::Income => "income",
            EntryKind::Expense => "expense",
            EntryKind::Bill => "bill",
            EntryKind::Debt => "debt",
            EntryKind::Savings => "savings",
            EntryKind::Withdrawal => "withdrawal",
        }
    }

    pub fn parse(raw: &str) -> Option<EntryKind> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "income" => Some(EntryKind::Income),
            "expense" => Some(EntryKind::Expense),
            "bill" => Some(EntryKind::Bill),
            "debt" => Some(EntryKind::Debt),
            "savings" => Some(EntryKind::Savings),
            "withdrawal" => Some(EntryKind::Withdrawal),
            _ => None,
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One dated money movement owned by a single user.
#[derive(Debug, Clone)]
pub struct Entry {
    pub id: i64,
    pub user_id: i64,
    pub kind: EntryKind,
    pub category: String,
    /// Exact decimal amount. Positive for everything written through the
    /// normal path; the transfer path may store a negative `Savings`
    /// amount to model cash moving out of savings back into balance.
    pub amount: Decimal,
    /// Calendar date only; independent of `created_at`.
    pub occurred_on: NaiveDate,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Per-category monthly spending ceiling. At most one per
/// `(user_id, category)`; the store enforces uniqueness.
#[derive(Debug, Clone)]
pub struct Goal {
    pub user_id: i64,
    pub category: String,
    pub monthly_limit: Decimal,
}
