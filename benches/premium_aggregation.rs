//! Benchmarks for the aggregation pass over a reference tariff.

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use policy_quotation::application::services::{PremiumAggregator, QuoteAssembler};
use policy_quotation::domain::entities::{
    BeneficiaryTariff, FirstYearReceipts, PlanCatalog, ProductTariff, Receipt, ServicePromotion,
    Tariff, TariffBreakdown,
};
use policy_quotation::domain::services::PromotionEligibility;
use policy_quotation::domain::value_objects::{Frequency, ProductId, QuotationId};
use rust_decimal::Decimal;
use std::hint::black_box;

fn tariff(beneficiaries: usize, products: i64) -> Tariff {
    let line = |id: i64| ProductTariff {
        product_id: ProductId::new(id),
        description: Some(format!("product {id}")),
        breakdown: TariffBreakdown {
            premium: Decimal::new(4_250 + id, 2),
            premium_tax: Decimal::new(255, 2),
            css: Decimal::new(12, 2),
            discount: Decimal::new(-425, 2),
        },
    };

    Tariff {
        beneficiaries: (0..beneficiaries)
            .map(|_| BeneficiaryTariff {
                products: (1..=products).map(line).collect(),
            })
            .collect(),
        promotions: (0..beneficiaries)
            .map(|_| ServicePromotion {
                code: Some("41".to_string()),
                description: Some("10% first year".to_string()),
                kind: "PERCENTAGE_DISCOUNT".to_string(),
            })
            .collect(),
        receipts: Some(FirstYearReceipts {
            policy_receipts: vec![Receipt {
                product_id: None,
                issue_date: None,
                amount: Decimal::new(9_999, 2),
            }],
            product_receipts: vec![],
        }),
    }
}

fn bench_aggregation(c: &mut Criterion) {
    let catalog = PlanCatalog::default();
    let eligibility = PromotionEligibility::new(true, true, false);
    let mut group = c.benchmark_group("premium_aggregation");

    for beneficiaries in [1usize, 4, 12] {
        let reference = tariff(beneficiaries, 6);
        group.bench_with_input(
            BenchmarkId::new("all_frequencies", beneficiaries),
            &reference,
            |b, reference| {
                b.iter(|| {
                    let quote = PremiumAggregator::new(&catalog, eligibility)
                        .aggregate(black_box(&Frequency::ALL), reference, ["COD_PROMOCIONAL_INVALIDO"])
                        .unwrap();
                    QuoteAssembler::new()
                        .assemble(QuotationId::new_v4(), quote, true)
                        .unwrap()
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_aggregation);
criterion_main!(benches);
