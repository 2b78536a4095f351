//! # Domain Errors
//!
//! Failures raised while shaping pricing requests or accumulating premiums.
//!
//! # Examples
//!
//! ```
//! use policy_quotation::domain::errors::DomainError;
//!
//! let err = DomainError::invalid_tier("expected at least 5 positions");
//! assert!(err.to_string().contains("tier"));
//! ```

use crate::domain::value_objects::arithmetic::ArithmeticError;
use crate::domain::value_objects::frequency::ParseFrequencyError;
use thiserror::Error;

/// Error type for domain operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// The tier coefficient string could not be interpreted.
    #[error("invalid tier coefficients: {0}")]
    InvalidTier(String),

    /// The applicant has no postal address to price against.
    #[error("applicant has no postal address")]
    MissingAddress,

    /// A birth date or age could not be normalised.
    #[error("invalid birth date: {0}")]
    InvalidBirthDate(String),

    /// A frequency code on file is not one of the four known periods.
    #[error(transparent)]
    InvalidFrequency(#[from] ParseFrequencyError),

    /// An operation code is not one of the known operations.
    #[error("invalid operation code: {0}")]
    InvalidOperation(u8),

    /// Premium accumulation overflowed.
    #[error("premium arithmetic failed: {0}")]
    Arithmetic(#[from] ArithmeticError),
}

impl DomainError {
    /// Creates an invalid tier error.
    #[must_use]
    pub fn invalid_tier(message: impl Into<String>) -> Self {
        Self::InvalidTier(message.into())
    }

    /// Creates an invalid birth date error.
    #[must_use]
    pub fn invalid_birth_date(message: impl Into<String>) -> Self {
        Self::InvalidBirthDate(message.into())
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
