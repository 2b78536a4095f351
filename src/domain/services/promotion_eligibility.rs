//! # Promotion Eligibility
//!
//! Product-specific rules deciding whether a tariff line takes part in the
//! promotion-aware accumulation.
//!
//! Two products are gated by contract exception flags:
//!
//! | product | flag | excluded when |
//! |---------|------|---------------|
//! | 389 | `PROMO_ECI_COLECTIVOS` | flag set and nobody holds a prior-policy card |
//! | 670 | `PROMO_FARMACIA` | flag set and nobody holds a prior-policy card |
//!
//! Every other product is always eligible.

use crate::domain::entities::context::{PROMO_ECI_COLECTIVOS, PROMO_FARMACIA};
use crate::domain::entities::{Applicant, QuoteContext};
use crate::domain::value_objects::ProductId;

/// Per-call promotion eligibility, evaluated once from the applicant and context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromotionEligibility {
    eci_exception: bool,
    pharmacy_exception: bool,
    has_prior_card: bool,
}

impl PromotionEligibility {
    /// Creates the rule set from raw flags.
    #[must_use]
    pub const fn new(eci_exception: bool, pharmacy_exception: bool, has_prior_card: bool) -> Self {
        Self {
            eci_exception,
            pharmacy_exception,
            has_prior_card,
        }
    }

    /// Evaluates the flags for a quote call.
    #[must_use]
    pub fn for_call(applicant: &Applicant, context: &QuoteContext) -> Self {
        Self::new(
            context.has_exception(PROMO_ECI_COLECTIVOS),
            context.has_exception(PROMO_FARMACIA),
            applicant.has_prior_policy_card(),
        )
    }

    /// Returns true if the promotion applies to `product_id`.
    #[must_use]
    pub fn applies_to(&self, product_id: ProductId) -> bool {
        match product_id {
            ProductId::ECI_COLLECTIVE => !self.eci_exception || self.has_prior_card,
            ProductId::PHARMACY => !self.pharmacy_exception || self.has_prior_card,
            _ => true,
        }
    }
}
