//! # Pricing Outcome
//!
//! Result of one dispatched pricing task. Exactly one outcome exists per
//! dispatched task, including a task that retried.

use crate::domain::entities::tariff::Tariff;
use crate::domain::value_objects::Frequency;

/// Tagged result of one pricing task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PricingOutcome {
    /// The service priced the request.
    Success {
        /// Frequency the task priced.
        frequency: Frequency,
        /// Priced tariff.
        tariff: Tariff,
        /// Error code of a recovered first attempt, surfaced as an advisory.
        advisory: Option<String>,
    },
    /// The service rejected the promotional code and no tariff was obtained.
    RecoverableError {
        /// Frequency the task priced.
        frequency: Frequency,
        /// Error code reported by the service.
        code: String,
    },
    /// The call failed in a way that aborts the quote.
    FatalError {
        /// Frequency the task priced.
        frequency: Frequency,
        /// Service description or failure message.
        message: String,
    },
}

impl PricingOutcome {
    /// Frequency the task priced.
    #[must_use]
    pub fn frequency(&self) -> Frequency {
        match self {
            Self::Success { frequency, .. }
            | Self::RecoverableError { frequency, .. }
            | Self::FatalError { frequency, .. } => *frequency,
        }
    }

    /// The tariff, when the task succeeded.
    #[must_use]
    pub fn tariff(&self) -> Option<&Tariff> {
        match self {
            Self::Success { tariff, .. } => Some(tariff),
            _ => None,
        }
    }

    /// Non-fatal error code carried by this outcome.
    #[must_use]
    pub fn advisory(&self) -> Option<&str> {
        match self {
            Self::Success { advisory, .. } => advisory.as_deref().filter(|c| !c.is_empty()),
            Self::RecoverableError { code, .. } => Some(code.as_str()).filter(|c| !c.is_empty()),
            Self::FatalError { .. } => None,
        }
    }

    /// Returns true for fatal outcomes.
    #[inline]
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::FatalError { .. })
    }
}
