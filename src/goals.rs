use crate::domain::{Entry, Goal};
use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalStatus {
    Ok,
    Warning,
    Over,
}

impl GoalStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            GoalStatus::Ok => "ok",
            GoalStatus::Warning => "warning",
            GoalStatus::Over => "over",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoalProgress {
    pub spent: Decimal,
    pub scaled_limit: Decimal,
    pub ratio: Decimal,
    /// Display percentage, clamped to 100: a category at 140% of budget
    /// still reports a full bar plus `over`, not an overflowing one.
    pub percent: Decimal,
    pub status: GoalStatus,
}

/// Spend-vs-limit progress for one goal, scoped to an already-windowed
/// entry set. Only outflow kinds count as spending; an income entry sharing
/// the goal's category never accrues against it.
pub fn progress(goal: &Goal, windowed: &[Entry], factor: Decimal) -> GoalProgress {
    let scaled_limit = goal.monthly_limit * factor;

    let spent: Decimal = windowed
        .iter()
        .filter(|e| e.kind.is_outflow() && e.category == goal.category)
        .map(|e| e.amount)
        .sum();

    let ratio = if scaled_limit > Decimal::ZERO {
        spent / scaled_limit
    } else {
        Decimal::ZERO
    };

    let status = if ratio >= Decimal::ONE {
        GoalStatus::Over
    } else if ratio >= Decimal::new(75, 2) {
        GoalStatus::Warning
    } else {
        GoalStatus::Ok
    };

    GoalProgress {
        spent,
        scaled_limit,
        ratio,
        percent: ratio.min(Decimal::ONE) * Decimal::from(100),
        status,
    }
}
