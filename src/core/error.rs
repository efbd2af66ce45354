//! Error taxonomy for budget calculations.

use crate::core::currency::CurrencyCode;
use thiserror::Error;

pub type Result<T, E = BudgetError> = std::result::Result<T, E>;

/// Failures raised by the calculation core and its input boundary.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BudgetError {
    #[error("Invalid value for {field}: {reason}")]
    Validation { field: String, reason: String },
    #[error("Failed to fetch exchange rates: {0}")]
    RateFetch(String),
    #[error("No exchange rate available for currency: {0}")]
    MissingRate(CurrencyCode),
    #[error("Invalid exchange rate {rate} for currency: {currency}")]
    InvalidRate { currency: String, rate: f64 },
    #[error("Division by zero: {0} must not be zero")]
    DivisionByZero(&'static str),
    #[error("Loan term must be between 1 and {} months, got {0}", crate::core::loan::MAX_TERM_PERIODS)]
    InvalidTerm(i64),
    #[error("Loan interest rate must not be negative, got {}%", .0 * 100.0)]
    NegativeInterestRate(f64),
}

/// How a failure should be presented to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The submitted values are wrong and retrying them will fail again.
    Input,
    /// The rate service failed or returned unusable data.
    Unavailable,
}

impl BudgetError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        BudgetError::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            BudgetError::Validation { .. }
            | BudgetError::MissingRate(_)
            | BudgetError::DivisionByZero(_)
            | BudgetError::InvalidTerm(_)
            | BudgetError::NegativeInterestRate(_) => ErrorKind::Input,
            BudgetError::RateFetch(_) | BudgetError::InvalidRate { .. } => ErrorKind::Unavailable,
        }
    }

    /// Single line shown to the user, distinguishing bad input from service trouble.
    pub fn user_message(&self) -> String {
        match self.kind() {
            ErrorKind::Input => format!("Please check the entered data: {self}"),
            ErrorKind::Unavailable => format!("Exchange rates are unavailable, try again later: {self}"),
        }
    }
}
