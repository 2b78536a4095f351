//! # Application Errors
//!
//! The single terminal failure of a quotation.
//!
//! Non-fatal service advisories (a rejected promotional code that was
//! recovered by retrying) never appear here; they travel inside a
//! successful [`QuoteResult`](crate::domain::entities::QuoteResult).
//!
//! # Error Hierarchy
//!
//! ```text
//! QuoteError
//! ├── NoPriceAvailable            - no collected outcome carried a tariff
//! ├── ServiceRejected(String)     - the service's own error description
//! ├── DispatchFailed(String)      - a task failed unexpectedly
//! ├── InvalidRequest(DomainError) - applicant records could not be mapped
//! └── Configuration(String)       - invalid engine configuration
//! ```
//!
//! # Examples
//!
//! ```
//! use policy_quotation::application::error::{NO_PRICE_MESSAGE, QuoteError};
//!
//! let err = QuoteError::NoPriceAvailable;
//! assert_eq!(err.to_string(), NO_PRICE_MESSAGE);
//!
//! let err = QuoteError::service_rejected("Applicant too old for plan");
//! assert_eq!(err.to_string(), "Applicant too old for plan");
//! ```

use crate::domain::errors::DomainError;
use crate::infrastructure::pricing::error::PricingServiceError;
use thiserror::Error;

/// User-facing message reported when no tariff could be obtained.
pub const NO_PRICE_MESSAGE: &str =
    "unable to obtain a price for the estimate; please try again later";

/// Terminal failure of a quote call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuoteError {
    /// No collected outcome carried a tariff.
    #[error("unable to obtain a price for the estimate; please try again later")]
    NoPriceAvailable,

    /// The rating service rejected the request; carries its description.
    #[error("{0}")]
    ServiceRejected(String),

    /// A pricing task failed unexpectedly (transport failure, task abort).
    #[error("{0}")]
    DispatchFailed(String),

    /// Applicant records could not be turned into a pricing request.
    #[error("invalid quote request: {0}")]
    InvalidRequest(#[from] DomainError),

    /// Engine configuration is invalid.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl QuoteError {
    /// Creates a service rejection error.
    #[must_use]
    pub fn service_rejected(description: impl Into<String>) -> Self {
        Self::ServiceRejected(description.into())
    }

    /// Creates a dispatch failure.
    #[must_use]
    pub fn dispatch_failed(message: impl Into<String>) -> Self {
        Self::DispatchFailed(message.into())
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Returns true if the failure comes from the rating service or its transport.
    #[must_use]
    pub fn is_service_failure(&self) -> bool {
        matches!(self, Self::ServiceRejected(_) | Self::DispatchFailed(_))
    }
}

impl From<PricingServiceError> for QuoteError {
    fn from(error: PricingServiceError) -> Self {
        Self::DispatchFailed(error.to_string())
    }
}

/// Result type for quotation operations.
pub type QuotationResult<T> = Result<T, QuoteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_price_message_is_fixed() {
        assert_eq!(QuoteError::NoPriceAvailable.to_string(), NO_PRICE_MESSAGE);
    }

    #[test]
    fn service_description_is_passed_through() {
        let err = QuoteError::service_rejected("postal code not covered");
        assert_eq!(err.to_string(), "postal code not covered");
        assert!(err.is_service_failure());
    }

    #[test]
    fn transport_errors_become_dispatch_failures() {
        let err: QuoteError = PricingServiceError::timeout("30000ms").into();
        assert!(matches!(err, QuoteError::DispatchFailed(_)));
        assert!(err.to_string().contains("timeout"));
    }

    #[test]
    fn domain_errors_become_invalid_requests() {
        let err: QuoteError = DomainError::MissingAddress.into();
        assert!(matches!(err, QuoteError::InvalidRequest(_)));
        assert!(!err.is_service_failure());
    }
}
