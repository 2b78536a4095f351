//! # Reference Selector
//!
//! Picks the tariff that drives every frequency's aggregation: the first
//! collected outcome carrying a tariff. Collection order follows completion
//! order, so which frequency supplies the reference depends on latency.

use crate::application::error::{QuotationResult, QuoteError};
use crate::domain::entities::{PricingOutcome, Tariff};
use crate::domain::value_objects::Frequency;

/// The selected reference tariff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceTariff<'a> {
    /// Frequency whose call produced the tariff.
    pub frequency: Frequency,
    /// The tariff.
    pub tariff: &'a Tariff,
}

/// Chooses the reference tariff among collected outcomes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceSelector;

impl ReferenceSelector {
    /// Returns the first outcome carrying a tariff.
    ///
    /// # Errors
    ///
    /// Returns `QuoteError::NoPriceAvailable` if no outcome carries one.
    pub fn select(outcomes: &[PricingOutcome]) -> QuotationResult<ReferenceTariff<'_>> {
        outcomes
            .iter()
            .find_map(|outcome| {
                outcome.tariff().map(|tariff| ReferenceTariff {
                    frequency: outcome.frequency(),
                    tariff,
                })
            })
            .ok_or(QuoteError::NoPriceAvailable)
    }
}
