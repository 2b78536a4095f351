//! # Quote Assembler
//!
//! Turns the aggregation accumulator into the caller-facing
//! [`QuoteResult`].
//!
//! When any recorded promotion is a percentage discount the reported
//! payment totals are the promotion-adjusted ones and the plain totals are
//! reported separately as the pre-promotion payment.

use crate::domain::entities::{AggregatedQuote, InsuredPremium, ProductPremium, QuoteResult, QuoteTotals};
use crate::domain::errors::DomainResult;
use crate::domain::value_objects::{CheckedArithmetic, FrequencySlots, QuotationId};
use rust_decimal::Decimal;

/// Builds [`QuoteResult`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuoteAssembler;

impl QuoteAssembler {
    /// Creates an assembler.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Assembles the result of a quote call.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Arithmetic` if a per-insured total overflows.
    pub fn assemble(
        &self,
        quotation_id: QuotationId,
        quote: AggregatedQuote,
        breakdown_requested: bool,
    ) -> DomainResult<QuoteResult> {
        let insured_premiums = quote
            .premiums
            .iter()
            .enumerate()
            .map(|(position, records)| {
                Ok(InsuredPremium {
                    position,
                    payments: insured_payments(records)?,
                })
            })
            .collect::<DomainResult<Vec<_>>>()?;

        let totals = if quote.has_percentage_discount() {
            QuoteTotals {
                discount: quote.total_discount,
                payment: quote.promotion_adjusted_payment,
                pre_promotion_payment: Some(quote.total_payment),
            }
        } else {
            QuoteTotals {
                discount: quote.total_discount,
                payment: quote.total_payment,
                pre_promotion_payment: None,
            }
        };

        Ok(QuoteResult {
            quotation_id,
            frequencies: quote.frequencies,
            insured_premiums,
            breakdown: breakdown_requested.then_some(quote.premiums),
            totals,
            promotions: quote.promotions,
            receipts: quote.receipts,
            errors: quote.errors,
        })
    }
}

fn insured_payments(records: &[ProductPremium]) -> DomainResult<FrequencySlots<Decimal>> {
    let mut payments = FrequencySlots::<Decimal>::default();
    for record in records {
        for (frequency, amount) in record.payments.iter() {
            payments[frequency] = payments[frequency].safe_add(*amount)?;
        }
    }
    Ok(payments)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{AppliedPromotion, Frequency, ProductId, PromotionKind};

    fn quote(kind: PromotionKind) -> AggregatedQuote {
        let mut premium = ProductPremium::new(ProductId::new(1), None, None);
        premium.payments[Frequency::Monthly] = Decimal::new(30, 0);
        let mut second = ProductPremium::new(ProductId::new(2), None, None);
        second.payments[Frequency::Monthly] = Decimal::new(12, 0);

        let mut quote = AggregatedQuote::new(vec![Frequency::Monthly]);
        quote.premiums = vec![vec![premium, second]];
        quote.total_payment[Frequency::Monthly] = Decimal::new(42, 0);
        quote.promotion_adjusted_payment[Frequency::Monthly] = Decimal::new(38, 0);
        quote.promotions = vec![vec![AppliedPromotion {
            id: Some(1),
            description: None,
            kind,
        }]];
        quote
    }

    #[test]
    fn plain_totals_without_percentage_discount() {
        let result = QuoteAssembler::new()
            .assemble(QuotationId::new_v4(), quote(PromotionKind::Gift), false)
            .unwrap();

        assert_eq!(result.totals.payment[Frequency::Monthly], Decimal::new(42, 0));
        assert!(!result.is_promotion_adjusted());
        assert!(result.breakdown.is_none());
    }

    #[test]
    fn percentage_discount_swaps_in_adjusted_totals() {
        let result = QuoteAssembler::new()
            .assemble(QuotationId::new_v4(), quote(PromotionKind::PercentageDiscount), true)
            .unwrap();

        assert_eq!(result.totals.payment[Frequency::Monthly], Decimal::new(38, 0));
        assert_eq!(
            result.totals.pre_promotion_payment.unwrap()[Frequency::Monthly],
            Decimal::new(42, 0)
        );
        assert_eq!(result.breakdown.unwrap()[0].len(), 2);
    }

    #[test]
    fn insured_premiums_sum_product_payments() {
        let result = QuoteAssembler::new()
            .assemble(QuotationId::new_v4(), quote(PromotionKind::Other), false)
            .unwrap();

        assert_eq!(result.insured_premiums.len(), 1);
        assert_eq!(
            result.insured_premiums[0].payments[Frequency::Monthly],
            Decimal::new(42, 0)
        );
        assert_eq!(result.insured_premiums[0].payments[Frequency::Annual], Decimal::ZERO);
    }
}
