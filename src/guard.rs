use crate::domain::EntryKind;
use rust_decimal::Decimal;

/// Outcome of the write-path admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Allow,
    /// Refusal carries the balance the request was checked against so the
    /// caller can include it in the user-facing message.
    Reject { balance: Decimal },
}

/// Best-effort check that an entry will not drive the running balance
/// negative. `current_balance` must be the all-time balance over the user's
/// full entry set, never a windowed one. Advisory only: two concurrent
/// admissions may both pass against a stale snapshot.
pub fn authorize(kind: EntryKind, amount: Decimal, current_balance: Decimal) -> Admission {
    match kind {
        EntryKind::Income => Admission::Allow,
        // A negative savings amount moves cash back into balance; it can
        // only raise the balance, so it is always admissible.
        EntryKind::Savings if amount <= Decimal::ZERO => Admission::Allow,
        _ if amount > current_balance => Admission::Reject {
            balance: current_balance,
        },
        _ => Admission::Allow,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(raw: &str) -> Decimal {
        raw.parse().unwrap()
    }

    #[test]
    fn spending_exactly_the_balance_is_allowed() {
        assert_eq!(
            authorize(EntryKind::Expense, dec("100"), dec("100")),
            Admission::Allow
        );
    }

    #[test]
    fn spending_a_cent_over_is_rejected_with_the_balance() {
        assert_eq!(
            authorize(EntryKind::Expense, dec("100.01"), dec("100")),
            Admission::Reject {
                balance: dec("100")
            }
        );
    }

    #[test]
    fn income_is_never_checked() {
        assert_eq!(
            authorize(EntryKind::Income, dec("1000000"), Decimal::ZERO),
            Admission::Allow
        );
    }

    #[test]
    fn savings_in_is_checked_like_an_outflow() {
        assert_eq!(
            authorize(EntryKind::Savings, dec("50"), dec("40")),
            Admission::Reject { balance: dec("40") }
        );
        assert_eq!(
            authorize(EntryKind::Savings, dec("40"), dec("40")),
            Admission::Allow
        );
    }

    #[test]
    fn savings_out_is_always_admissible() {
        assert_eq!(
            authorize(EntryKind::Savings, dec("-50"), dec("-10")),
            Admission::Allow
        );
    }

    #[test]
    fn every_outflow_kind_is_guarded() {
        for kind in [
            EntryKind::Expense,
            EntryKind::Bill,
            EntryKind::Debt,
            EntryKind::Withdrawal,
        ] {
            assert_eq!(
                authorize(kind, dec("10"), dec("5")),
                Admission::Reject { balance: dec("5") }
            );
        }
    }
}
