use crate::domain::{Entry, EntryKind};
use crate::window::Window;
use rust_decimal::Decimal;

/// Aggregate totals over a set of entries.
///
/// `balance = income - (outflow + savings)`. A negative-valued `Savings`
/// entry (cash moved out of savings) subtracts from the savings total and
/// therefore raises the balance; it is never counted as outflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Totals {
    pub income: Decimal,
    pub outflow: Decimal,
    pub savings: Decimal,
    pub balance: Decimal,
}

pub fn totals(entries: &[Entry]) -> Totals {
    let mut income = Decimal::ZERO;
    let mut outflow = Decimal::ZERO;
    let mut savings = Decimal::ZERO;

    for e in entries {
        if e.kind == EntryKind::Income {
            income += e.amount;
        } else if e.kind.is_outflow() {
            outflow += e.amount;
        } else if e.kind == EntryKind::Savings {
            savings += e.amount;
        }
    }

    Totals {
        income,
        outflow,
        savings,
        balance: income - (outflow + savings),
    }
}

/// Exact, case-sensitive category match.
pub fn filter_by_category(entries: &[Entry], category: &str) -> Vec<Entry> {
    entries
        .iter()
        .filter(|e| e.category == category)
        .cloned()
        .collect()
}

/// Inclusive on both bounds, compared on `occurred_on` only.
pub fn filter_by_window(entries: &[Entry], window: &Window) -> Vec<Entry> {
    entries
        .iter()
        .filter(|e| window.contains(e.occurred_on))
        .cloned()
        .collect()
}

/// Canonical display order: `occurred_on` descending, ties broken by `id`
/// descending so the most-recently-added entry for a date comes first.
pub fn sort_for_display(entries: &mut [Entry]) {
    entries.sort_by(|a, b| {
        b.occurred_on
            .cmp(&a.occurred_on)
            .then(b.id.cmp(&a.id))
    });
}
