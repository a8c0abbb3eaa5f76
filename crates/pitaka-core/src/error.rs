use pitaka_domain::RecordId;
use thiserror::Error;

/// Which collection a missing record was looked up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Income,
    Expense,
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordKind::Income => f.write_str("Income entry"),
            RecordKind::Expense => f.write_str("Expense"),
        }
    }
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid date `{0}`: expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("{kind} not found: {id}")]
    RecordNotFound { kind: RecordKind, id: RecordId },
    #[error("A save is already in progress")]
    SaveInFlight,
    #[error("Backend error: {0}")]
    Backend(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(String),
}
