//! # Premium Aggregation
//!
//! Folds the reference tariff into the per-frequency totals of an
//! [`AggregatedQuote`].
//!
//! The same reference tariff drives the pass of every requested frequency;
//! only the discount scaling differs between passes. For each frequency:
//!
//! 1. every product line of every beneficiary that passes
//!    [`PromotionEligibility`] contributes
//!    - its surcharge (`css`) to the running surcharge of the pass,
//!    - its discount, doubled for semiannual and annual billing, to the
//!      total discount,
//!    - premium plus premium tax plus the scaled discount to the total
//!      payment (the surcharge is billed once and stays out);
//! 2. the policy-level promotions are recorded as one group, keeping the
//!    first `len / beneficiaries` entries since the service repeats each
//!    promotion once per beneficiary;
//! 3. when the tariff carries a first-year schedule, its product receipts
//!    are recorded and the promotion-adjusted payment becomes the first
//!    policy receipt minus the running surcharge.

use crate::domain::entities::{
    AggregatedQuote, PlanCatalog, ProductPremium, ProductTariff, ServicePromotion, Tariff,
};
use crate::domain::errors::DomainResult;
use crate::domain::services::PromotionEligibility;
use crate::domain::value_objects::{AppliedPromotion, CheckedArithmetic, Frequency};
use rust_decimal::Decimal;

/// Aggregates a reference tariff into per-frequency premiums and totals.
#[derive(Debug, Clone, Copy)]
pub struct PremiumAggregator<'a> {
    catalog: &'a PlanCatalog,
    eligibility: PromotionEligibility,
}

impl<'a> PremiumAggregator<'a> {
    /// Creates an aggregator for one quote call.
    #[must_use]
    pub fn new(catalog: &'a PlanCatalog, eligibility: PromotionEligibility) -> Self {
        Self {
            catalog,
            eligibility,
        }
    }

    /// Runs the aggregation pass for every frequency.
    ///
    /// `advisories` are recorded once each, in order.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Arithmetic` if an amount overflows.
    pub fn aggregate<'s>(
        &self,
        frequencies: &[Frequency],
        reference: &Tariff,
        advisories: impl IntoIterator<Item = &'s str>,
    ) -> DomainResult<AggregatedQuote> {
        let mut quote = AggregatedQuote::new(frequencies.to_vec());
        for code in advisories {
            quote.record_error(code);
        }
        quote
            .premiums
            .resize_with(reference.beneficiaries.len(), Vec::new);

        for &frequency in frequencies {
            self.aggregate_frequency(&mut quote, frequency, reference)?;
        }
        Ok(quote)
    }

    fn aggregate_frequency(
        &self,
        quote: &mut AggregatedQuote,
        frequency: Frequency,
        reference: &Tariff,
    ) -> DomainResult<()> {
        let mut css = Decimal::ZERO;

        for (beneficiary, records) in reference.beneficiaries.iter().zip(quote.premiums.iter_mut()) {
            let eligible = beneficiary
                .products
                .iter()
                .filter(|line| self.eligibility.applies_to(line.product_id));
            // Records follow line order; a product priced twice keeps two records.
            for (slot, line) in eligible.enumerate() {
                let amounts = &line.breakdown;
                css = css.safe_add(amounts.css)?;
                let discount = amounts.discount.safe_mul(frequency.discount_multiplier())?;
                let payment = amounts.steady_state_amount().safe_add(discount)?;

                if records.len() <= slot {
                    records.push(self.premium_record(line));
                }
                if let Some(record) = records.get_mut(slot) {
                    record.discounts[frequency] = discount;
                    record.payments[frequency] = payment;
                }

                quote.total_discount[frequency] =
                    quote.total_discount[frequency].safe_add(discount)?;
                quote.total_payment[frequency] = quote.total_payment[frequency].safe_add(payment)?;
            }
        }

        let promotions = group_promotions(&reference.promotions, reference.beneficiaries.len());
        tracing::debug!(
            %frequency,
            reported = reference.promotions.len(),
            kept = promotions.len(),
            "grouped policy promotions"
        );
        quote.promotions.push(promotions);

        if let Some(receipts) = &reference.receipts {
            quote.receipts.push(receipts.product_receipts.clone());
            if let Some(first) = receipts.policy_receipts.first() {
                quote.promotion_adjusted_payment[frequency] = first.amount.safe_sub(css)?;
            }
        }
        Ok(())
    }

    /// New premium record named after the plan catalog when it lists the product.
    fn premium_record(&self, line: &ProductTariff) -> ProductPremium {
        match self.catalog.product(line.product_id) {
            Some(product) => ProductPremium::new(
                line.product_id,
                Some(product.commercial_name.clone()),
                Some(product.mandatory),
            ),
            None => ProductPremium::new(line.product_id, line.description.clone(), None),
        }
    }
}

/// Keeps one copy of each policy-level promotion.
///
/// The service repeats the list once per beneficiary; the first
/// `len / beneficiaries` entries are kept. With no beneficiaries the whole
/// list is kept.
#[must_use]
pub fn group_promotions(promotions: &[ServicePromotion], beneficiaries: usize) -> Vec<AppliedPromotion> {
    let per_group = promotions
        .len()
        .safe_div(beneficiaries)
        .unwrap_or(promotions.len());
    promotions
        .iter()
        .take(per_group)
        .map(|p| AppliedPromotion::from_service(p.code.as_deref(), p.description.clone(), &p.kind))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::entities::{
        BeneficiaryTariff, FirstYearReceipts, PlanProduct, Receipt, TariffBreakdown,
    };
    use crate::domain::value_objects::{ProductId, PromotionKind};
    use proptest::prelude::*;

    fn dec(value: &str) -> Decimal {
        value.parse().unwrap()
    }

    fn line(product: i64, premium: &str, tax: &str, css: &str, discount: &str) -> ProductTariff {
        ProductTariff {
            product_id: ProductId::new(product),
            description: Some(format!("product {}", product)),
            breakdown: TariffBreakdown {
                premium: dec(premium),
                premium_tax: dec(tax),
                css: dec(css),
                discount: dec(discount),
            },
        }
    }

    fn promotion(code: &str, kind: &str) -> ServicePromotion {
        ServicePromotion {
            code: Some(code.to_string()),
            description: None,
            kind: kind.to_string(),
        }
    }

    fn tariff() -> Tariff {
        Tariff {
            beneficiaries: vec![
                BeneficiaryTariff {
                    products: vec![
                        line(1, "40.00", "2.40", "0.10", "-4.00"),
                        line(389, "10.00", "0.60", "0.05", "-1.00"),
                    ],
                },
                BeneficiaryTariff {
                    products: vec![line(1, "30.00", "1.80", "0.10", "-3.00")],
                },
            ],
            promotions: vec![
                promotion("12", "PERCENTAGE_DISCOUNT"),
                promotion("12", "PERCENTAGE_DISCOUNT"),
            ],
            receipts: Some(FirstYearReceipts {
                policy_receipts: vec![Receipt {
                    product_id: None,
                    issue_date: None,
                    amount: dec("80.00"),
                }],
                product_receipts: vec![Receipt {
                    product_id: Some(ProductId::new(1)),
                    issue_date: None,
                    amount: dec("42.50"),
                }],
            }),
        }
    }

    fn open_rules() -> PromotionEligibility {
        PromotionEligibility::new(false, false, false)
    }

    #[test]
    fn monthly_totals_use_raw_discount() {
        let catalog = PlanCatalog::default();
        let quote = PremiumAggregator::new(&catalog, open_rules())
            .aggregate(&[Frequency::Monthly], &tariff(), [])
            .unwrap();

        assert_eq!(quote.total_discount[Frequency::Monthly], dec("-8.00"));
        // (42.40 - 4) + (10.60 - 1) + (31.80 - 3)
        assert_eq!(quote.total_payment[Frequency::Monthly], dec("76.80"));
        assert_eq!(quote.total_payment[Frequency::Annual], Decimal::ZERO);
        assert_eq!(quote.promotion_adjusted_payment[Frequency::Monthly], dec("79.75"));
    }

    #[test]
    fn annual_totals_double_discount() {
        let catalog = PlanCatalog::default();
        let quote = PremiumAggregator::new(&catalog, open_rules())
            .aggregate(&[Frequency::Annual], &tariff(), [])
            .unwrap();

        assert_eq!(quote.total_discount[Frequency::Annual], dec("-16.00"));
        assert_eq!(quote.total_payment[Frequency::Annual], dec("68.80"));
    }

    #[test]
    fn ineligible_lines_are_skipped() {
        let catalog = PlanCatalog::default();
        let quote = PremiumAggregator::new(&catalog, PromotionEligibility::new(true, false, false))
            .aggregate(&[Frequency::Monthly], &tariff(), [])
            .unwrap();

        assert_eq!(quote.total_discount[Frequency::Monthly], dec("-7.00"));
        assert_eq!(quote.premiums[0].len(), 1);
        // surcharge of the skipped line stays out of the adjusted payment
        assert_eq!(quote.promotion_adjusted_payment[Frequency::Monthly], dec("79.80"));
    }

    #[test]
    fn records_hold_one_slot_per_frequency() {
        let catalog = PlanCatalog {
            products: vec![PlanProduct {
                product_id: ProductId::new(1),
                commercial_name: "Health Basic".into(),
                mandatory: true,
                covers: vec![],
            }],
        };
        let quote = PremiumAggregator::new(&catalog, open_rules())
            .aggregate(&Frequency::ALL, &tariff(), [])
            .unwrap();

        assert_eq!(quote.premiums.len(), 2);
        let basic = &quote.premiums[0][0];
        assert_eq!(basic.name.as_deref(), Some("Health Basic"));
        assert_eq!(basic.mandatory, Some(true));
        assert_eq!(basic.discounts[Frequency::Quarterly], dec("-4.00"));
        assert_eq!(basic.discounts[Frequency::Semiannual], dec("-8.00"));

        let other = &quote.premiums[0][1];
        assert_eq!(other.name.as_deref(), Some("product 389"));
        assert_eq!(other.mandatory, None);

        assert_eq!(quote.promotions.len(), 4);
        assert_eq!(quote.receipts.len(), 4);
    }

    #[test]
    fn promotions_are_divided_by_beneficiaries() {
        let catalog = PlanCatalog::default();
        let quote = PremiumAggregator::new(&catalog, open_rules())
            .aggregate(&[Frequency::Monthly], &tariff(), [])
            .unwrap();

        assert_eq!(quote.promotions[0].len(), 1);
        assert_eq!(quote.promotions[0][0].id, Some(12));
        assert_eq!(quote.promotions[0][0].kind, PromotionKind::PercentageDiscount);
        assert!(quote.has_percentage_discount());
    }

    #[test]
    fn grouping_survives_zero_beneficiaries() {
        let promotions = vec![promotion("1", "GIFT")];
        assert_eq!(group_promotions(&promotions, 0).len(), 1);
        assert!(group_promotions(&[], 3).is_empty());
    }

    #[test]
    fn repeated_product_lines_keep_separate_records() {
        let tariff = Tariff {
            beneficiaries: vec![BeneficiaryTariff {
                products: vec![
                    line(1, "40.00", "0.00", "0.00", "0.00"),
                    line(1, "10.00", "0.00", "0.00", "0.00"),
                ],
            }],
            ..Tariff::default()
        };
        let catalog = PlanCatalog::default();
        let quote = PremiumAggregator::new(&catalog, open_rules())
            .aggregate(&Frequency::ALL, &tariff, [])
            .unwrap();

        assert_eq!(quote.total_payment[Frequency::Monthly], dec("50.00"));
        assert_eq!(quote.premiums[0].len(), 2);
        assert_eq!(quote.premiums[0][0].payments[Frequency::Annual], dec("40.00"));
        assert_eq!(quote.premiums[0][1].payments[Frequency::Annual], dec("10.00"));

        let result = crate::application::services::QuoteAssembler::new()
            .assemble(crate::domain::value_objects::QuotationId::new_v4(), quote, false)
            .unwrap();
        assert_eq!(
            result.insured_premiums[0].payments[Frequency::Monthly],
            result.totals.payment[Frequency::Monthly]
        );
    }

    #[test]
    fn grouping_keeps_whole_list_for_one_beneficiary() {
        let promotions = vec![promotion("1", "GIFT"), promotion("2", "GIFT")];
        assert_eq!(group_promotions(&promotions, 1).len(), 2);
        assert_eq!(group_promotions(&promotions, 2).len(), 1);
        assert!(group_promotions(&promotions, 3).is_empty());
    }

    #[test]
    fn advisories_are_recorded_once() {
        let catalog = PlanCatalog::default();
        let quote = PremiumAggregator::new(&catalog, open_rules())
            .aggregate(&Frequency::ALL, &tariff(), ["PROMO", "PROMO"])
            .unwrap();
        assert_eq!(quote.errors, vec!["PROMO".to_string()]);
    }

    #[test]
    fn missing_receipts_leave_adjusted_payment_at_zero() {
        let mut tariff = tariff();
        tariff.receipts = None;
        let catalog = PlanCatalog::default();
        let quote = PremiumAggregator::new(&catalog, open_rules())
            .aggregate(&[Frequency::Monthly], &tariff, [])
            .unwrap();

        assert!(quote.receipts.is_empty());
        assert_eq!(quote.promotion_adjusted_payment[Frequency::Monthly], Decimal::ZERO);
    }

    proptest! {
        #[test]
        fn discount_scaling(cents in -100_000i64..0) {
            let discount = Decimal::new(cents, 2);
            let tariff = Tariff {
                beneficiaries: vec![BeneficiaryTariff {
                    products: vec![ProductTariff {
                        product_id: ProductId::new(1),
                        description: None,
                        breakdown: TariffBreakdown { discount, ..TariffBreakdown::default() },
                    }],
                }],
                ..Tariff::default()
            };
            let catalog = PlanCatalog::default();
            let quote = PremiumAggregator::new(&catalog, open_rules())
                .aggregate(&Frequency::ALL, &tariff, [])
                .unwrap();

            prop_assert_eq!(quote.total_discount[Frequency::Monthly], discount);
            prop_assert_eq!(quote.total_discount[Frequency::Quarterly], discount);
            prop_assert_eq!(quote.total_discount[Frequency::Semiannual], discount * Decimal::TWO);
            prop_assert_eq!(quote.total_discount[Frequency::Annual], discount * Decimal::TWO);
        }
    }
}
