//! # Frequency Resolver
//!
//! Decides which billing frequencies a quote must price.

use crate::domain::entities::{Applicant, QuoteContext, QuoteOperation};
use crate::domain::value_objects::Frequency;

/// Resolves the set of frequencies to price.
///
/// - Inclusion into an existing policy: the single frequency on file.
/// - Otherwise, with the monthly-only switch: [`Frequency::Monthly`].
/// - Otherwise: all four frequencies.
///
/// The result is never empty and is ordered by frequency code.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrequencyResolver;

impl FrequencyResolver {
    /// Creates a resolver.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Returns the frequencies to price.
    #[must_use]
    pub fn resolve(
        &self,
        operation: &QuoteOperation,
        applicant: &Applicant,
        context: &QuoteContext,
    ) -> Vec<Frequency> {
        if operation.is_inclusion() {
            vec![applicant.payment_frequency]
        } else if context.monthly_only {
            vec![Frequency::Monthly]
        } else {
            Frequency::ALL.to_vec()
        }
    }
}
