use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// Failure kinds surfaced by the engine. Validation problems and refusals
/// are reported to the caller as values of this type; they never panic.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Amount must be greater than zero")]
    InvalidAmount,

    #[error("Invalid range: start {start} is after end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("No entry with id {id}")]
    EntryNotFound { id: i64 },

    #[error("Insufficient balance: {balance} available")]
    InsufficientBalance { balance: Decimal },

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Username unavailable")]
    UsernameTaken,

    #[error("Store failure: {0}")]
    Store(#[from] rusqlite::Error),
}
