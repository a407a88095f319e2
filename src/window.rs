use crate::error::EngineError;
use chrono::{Datelike, Days, NaiveDate};
use rust_decimal::Decimal;

/// Approximate month length used for goal pro-ration. The factors below are
/// fixed constants carried over from the original behavior, not exact
/// calendar proportions.
const DAYS_PER_MONTH: i64 = 30;

/// A named reporting period, or explicit custom bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Today,
    Yesterday,
    ThisWeek,
    ThisMonth,
    ThisYear,
    AllTime,
    Custom { start: NaiveDate, end: NaiveDate },
}

/// Concrete date range plus the factor used to scale monthly goal limits to
/// the window's length. The factor never affects ledger totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub factor: Decimal,
    /// True for `All Time`, where the factor is a placeholder and goal
    /// limits are reported unscaled.
    pub unscaled: bool,
}

impl Period {
    pub fn parse(raw: &str) -> Option<Period> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "today" => Some(Period::Today),
            "yesterday" => Some(Period::Yesterday),
            "week" => Some(Period::ThisWeek),
            "month" => Some(Period::ThisMonth),
            "year" => Some(Period::ThisYear),
            "all" => Some(Period::AllTime),
            _ => None,
        }
    }

    /// Resolve against a caller-supplied `today` so reports are a pure
    /// function of their inputs.
    pub fn resolve(self, today: NaiveDate) -> Result<Window, EngineError> {
        let day_factor = Decimal::ONE / Decimal::from(DAYS_PER_MONTH);
        let week_factor = Decimal::new(25, 2);
        let month_factor = Decimal::ONE;
        let year_factor = Decimal::from(12);

        let window = match self {
            Period::Today => Window::bounded(today, today, day_factor),
            Period::Yesterday => {
                let y = today - Days::new(1);
                Window::bounded(y, y, day_factor)
            }
            Period::ThisWeek => {
                // Week starts Monday.
                let offset = today.weekday().num_days_from_monday() as u64;
                let monday = today - Days::new(offset);
                Window::bounded(monday, today, week_factor)
            }
            Period::ThisMonth => {
                let first = today.with_day(1).unwrap_or(today);
                Window::bounded(first, today, month_factor)
            }
            Period::ThisYear => {
                let jan1 = NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today);
                Window::bounded(jan1, today, year_factor)
            }
            Period::AllTime => Window {
                start: None,
                end: None,
                factor: Decimal::ONE,
                unscaled: true,
            },
            Period::Custom { start, end } => {
                if start > end {
                    return Err(EngineError::InvalidRange { start, end });
                }
                let days = (end - start).num_days() + 1;
                let factor = Decimal::from(days) / Decimal::from(DAYS_PER_MONTH);
                Window::bounded(start, end, factor)
            }
        };

        Ok(window)
    }
}

impl Window {
    fn bounded(start: NaiveDate, end: NaiveDate, factor: Decimal) -> Window {
        Window {
            start: Some(start),
            end: Some(end),
            factor,
            unscaled: false,
        }
    }

    /// Inclusive containment at date granularity.
    pub fn contains(&self, date: NaiveDate) -> bool {
        if let Some(start) = self.start {
            if date < start {
                return false;
            }
        }
        if let Some(end) = self.end {
            if date > end {
                return false;
            }
        }
        true
    }
}
