//! Error types for the currency service.

/// Message returned to callers whenever a live quote cannot be used.
pub const QUOTE_UNAVAILABLE_MESSAGE: &str = "Error while processing your request. Try again later.";

/// Domain-level errors (business logic violations).
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Currency already exists: {0}")]
    DuplicateCurrency(String),

    #[error("Currency not found: {0}")]
    CurrencyNotFound(String),

    #[error("Exchange {to} not found for {from}")]
    ExchangeRateNotFound { from: String, to: String },

    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// Repository-level errors (data access failures).
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Conflict: {0}")]
    Conflict(String),
}

/// Application-level errors (for HTTP responses).
///
/// Maps cleanly to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Currency already exists: {0}")]
    DuplicateCurrency(String),

    #[error("Currency not found: {0}")]
    CurrencyNotFound(String),

    #[error("Exchange {to} not found for {from}")]
    ExchangeRateNotFound { from: String, to: String },

    #[error("{}", QUOTE_UNAVAILABLE_MESSAGE)]
    QuoteUnavailable,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::DuplicateCurrency(name) => AppError::DuplicateCurrency(name),
            DomainError::CurrencyNotFound(name) => AppError::CurrencyNotFound(name),
            DomainError::ExchangeRateNotFound { from, to } => {
                AppError::ExchangeRateNotFound { from, to }
            }
            DomainError::ValidationError(msg) => AppError::BadRequest(msg),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Domain(e) => e.into(),
            RepoError::Conflict(name) => AppError::DuplicateCurrency(name),
            RepoError::Database(e) => AppError::Internal(e),
        }
    }
}
