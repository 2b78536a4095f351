//! # Pricing Service Errors
//!
//! Transport-level failures of the rating service.
//!
//! Business errors the service reports inside a well-formed response (an
//! invalid promotional code, an unpriceable applicant) are not errors at
//! this level: they travel in [`SimulationResponse::error`]. This type
//! covers the call itself failing.
//!
//! [`SimulationResponse::error`]: crate::domain::entities::SimulationResponse
//!
//! # Examples
//!
//! ```
//! use policy_quotation::infrastructure::pricing::error::PricingServiceError;
//!
//! let error = PricingServiceError::timeout("no answer after 30000ms");
//! assert!(error.is_retryable());
//!
//! let error = PricingServiceError::protocol_error("unexpected body");
//! assert!(!error.is_retryable());
//! ```

use thiserror::Error;

/// Error type for rating service calls.
#[derive(Debug, Clone, Error)]
pub enum PricingServiceError {
    /// Request timed out.
    #[error("pricing service timeout: {message}")]
    Timeout {
        /// Error message.
        message: String,
    },

    /// Network or connection error.
    #[error("pricing service connection error: {message}")]
    Connection {
        /// Error message.
        message: String,
    },

    /// The service refused the credentials.
    #[error("pricing service authentication error: {message}")]
    Authentication {
        /// Error message.
        message: String,
    },

    /// Non-success HTTP status without a decodable service error.
    #[error("pricing service returned status {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body or reason.
        message: String,
    },

    /// Response could not be decoded.
    #[error("pricing service protocol error: {message}")]
    ProtocolError {
        /// Error message.
        message: String,
    },

    /// Client-side failure.
    #[error("pricing service internal error: {message}")]
    InternalError {
        /// Error message.
        message: String,
    },
}

impl PricingServiceError {
    /// Creates a timeout error.
    #[must_use]
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    /// Creates a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Creates an authentication error.
    #[must_use]
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    /// Creates a status error.
    #[must_use]
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    /// Creates a protocol error.
    #[must_use]
    pub fn protocol_error(message: impl Into<String>) -> Self {
        Self::ProtocolError {
            message: message.into(),
        }
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
        }
    }

    /// Returns true if this error is transient.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout { .. } | Self::Connection { .. } => true,
            Self::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

/// Result type for rating service calls.
pub type PricingResult<T> = Result<T, PricingServiceError>;
