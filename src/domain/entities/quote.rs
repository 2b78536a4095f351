//! # Quote
//!
//! The call-scoped accumulator filled by premium aggregation, and the
//! caller-facing [`QuoteResult`] assembled from it.
//!
//! All totals are [`FrequencySlots`]: four slots indexed by frequency code
//! minus one, with unquoted frequencies left at zero.

use crate::domain::entities::tariff::Receipt;
use crate::domain::value_objects::{
    AppliedPromotion, Frequency, FrequencySlots, ProductId, QuotationId,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Premium record of one product for one insured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPremium {
    /// Product id.
    pub product_id: ProductId,
    /// Commercial name, or the service description when the plan does not list it.
    pub name: Option<String>,
    /// Whether the product is mandatory in the plan; unknown when not listed.
    pub mandatory: Option<bool>,
    /// Frequency-scaled discount.
    pub discounts: FrequencySlots<Decimal>,
    /// Steady-state installment plus the scaled discount.
    pub payments: FrequencySlots<Decimal>,
}

impl ProductPremium {
    /// Creates an empty record.
    #[must_use]
    pub fn new(product_id: ProductId, name: Option<String>, mandatory: Option<bool>) -> Self {
        Self {
            product_id,
            name,
            mandatory,
            discounts: FrequencySlots::default(),
            payments: FrequencySlots::default(),
        }
    }
}

/// Accumulator threaded through the aggregation pass of one quote call.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AggregatedQuote {
    /// Frequencies that were requested, in code order.
    pub frequencies: Vec<Frequency>,
    /// Total scaled discount per frequency.
    pub total_discount: FrequencySlots<Decimal>,
    /// Total steady-state payment per frequency.
    pub total_payment: FrequencySlots<Decimal>,
    /// First receipt minus surcharge per frequency.
    pub promotion_adjusted_payment: FrequencySlots<Decimal>,
    /// Per-beneficiary list of per-product premium records.
    pub premiums: Vec<Vec<ProductPremium>>,
    /// Applied promotions, one group per requested frequency.
    pub promotions: Vec<Vec<AppliedPromotion>>,
    /// First-year product receipts, one list per frequency that returned a schedule.
    pub receipts: Vec<Vec<Receipt>>,
    /// Non-fatal error codes, without duplicates.
    pub errors: Vec<String>,
}

impl AggregatedQuote {
    /// Creates an empty accumulator for the given frequencies.
    #[must_use]
    pub fn new(frequencies: Vec<Frequency>) -> Self {
        Self {
            frequencies,
            ..Self::default()
        }
    }

    /// Records a non-fatal error code once.
    pub fn record_error(&mut self, code: &str) {
        if !code.is_empty() && !self.errors.iter().any(|e| e == code) {
            self.errors.push(code.to_string());
        }
    }

    /// Returns true if any recorded promotion is a percentage discount.
    #[must_use]
    pub fn has_percentage_discount(&self) -> bool {
        self.promotions
            .iter()
            .flatten()
            .any(|p| p.kind.is_percentage_discount())
    }
}

/// Steady-state payment of one insured person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsuredPremium {
    /// Position of the insured in the request (0 = first beneficiary).
    pub position: usize,
    /// Sum of the insured's product payments per frequency.
    pub payments: FrequencySlots<Decimal>,
}

/// Flat totals reported to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteTotals {
    /// Total discount per frequency.
    pub discount: FrequencySlots<Decimal>,
    /// Total payment per frequency; promotion-adjusted when a percentage
    /// discount promotion applied.
    pub payment: FrequencySlots<Decimal>,
    /// Totals before promotions, present only when `payment` is promotion-adjusted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pre_promotion_payment: Option<FrequencySlots<Decimal>>,
}

/// Caller-facing quotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResult {
    /// Correlation id of the call.
    pub quotation_id: QuotationId,
    /// Frequencies that were quoted.
    pub frequencies: Vec<Frequency>,
    /// Per-insured steady-state payments.
    pub insured_premiums: Vec<InsuredPremium>,
    /// Per-insured, per-product breakdown; present only when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<Vec<Vec<ProductPremium>>>,
    /// Totals.
    pub totals: QuoteTotals,
    /// Applied promotions, one group per quoted frequency.
    pub promotions: Vec<Vec<AppliedPromotion>>,
    /// First-year receipts.
    pub receipts: Vec<Vec<Receipt>>,
    /// Non-fatal error codes.
    pub errors: Vec<String>,
}

impl QuoteResult {
    /// Returns true if the reported payment totals are promotion-adjusted.
    #[inline]
    #[must_use]
    pub fn is_promotion_adjusted(&self) -> bool {
        self.totals.pre_promotion_payment.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::PromotionKind;

    #[test]
    fn errors_are_deduplicated() {
        let mut quote = AggregatedQuote::new(vec![Frequency::Monthly]);
        quote.record_error("PROMO");
        quote.record_error("PROMO");
        quote.record_error("");
        assert_eq!(quote.errors, vec!["PROMO".to_string()]);
    }

    #[test]
    fn detects_percentage_discount_in_any_group() {
        let mut quote = AggregatedQuote::new(Frequency::ALL.to_vec());
        quote.promotions.push(vec![]);
        assert!(!quote.has_percentage_discount());
        quote.promotions.push(vec![AppliedPromotion {
            id: Some(3),
            description: None,
            kind: PromotionKind::PercentageDiscount,
        }]);
        assert!(quote.has_percentage_discount());
    }
}
