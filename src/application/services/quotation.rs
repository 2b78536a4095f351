//! # Quotation Engine
//!
//! The caller-facing `quote` operation.
//!
//! A call runs these steps in order, each owning its data until the next:
//!
//! ```text
//! QuoteOperation::resolve ─► FrequencyResolver ─► RequestBuilder (per frequency)
//!        ─► BoundedDispatcher (PricingTask + RetryPolicy)
//!        ─► ReferenceSelector ─► PremiumAggregator ─► QuoteAssembler
//! ```
//!
//! The worker pool is the only state shared between calls.
//!
//! # Examples
//!
//! ```ignore
//! use policy_quotation::application::services::QuotationEngine;
//! use policy_quotation::config::QuotationConfig;
//!
//! let engine = QuotationEngine::from_config(&QuotationConfig::default(), service)?;
//! let result = engine.quote(&applicant, &products, None, true, &context).await?;
//! println!("monthly total: {}", result.totals.payment[Frequency::Monthly]);
//! ```

use crate::application::error::{QuotationResult, QuoteError};
use crate::application::services::dispatcher::BoundedDispatcher;
use crate::application::services::premium_aggregation::PremiumAggregator;
use crate::application::services::pricing_task::PricingTask;
use crate::application::services::quote_assembler::QuoteAssembler;
use crate::application::services::reference_selector::ReferenceSelector;
use crate::application::services::retry::RetryPolicy;
use crate::application::services::worker_pool::WorkerPool;
use crate::config::QuotationConfig;
use crate::domain::entities::{
    Applicant, BeneficiaryRecord, PricingOutcome, ProductSelection, QuoteContext, QuoteOperation,
    QuoteResult,
};
use crate::domain::services::{
    FrequencyResolver, PlanRequestBuilder, PromotionEligibility, RequestBuilder,
};
use crate::domain::value_objects::QuotationId;
use crate::infrastructure::pricing::traits::PricingService;
use std::sync::Arc;

/// Orchestrates a quotation from applicant records to [`QuoteResult`].
#[derive(Debug, Clone)]
pub struct QuotationEngine {
    service: Arc<dyn PricingService>,
    builder: Arc<dyn RequestBuilder>,
    dispatcher: BoundedDispatcher,
    retry: Arc<RetryPolicy>,
    resolver: FrequencyResolver,
    assembler: QuoteAssembler,
}

impl QuotationEngine {
    /// Creates an engine from its collaborators.
    #[must_use]
    pub fn new(
        service: Arc<dyn PricingService>,
        builder: Arc<dyn RequestBuilder>,
        dispatcher: BoundedDispatcher,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            service,
            builder,
            dispatcher,
            retry: Arc::new(retry),
            resolver: FrequencyResolver::new(),
            assembler: QuoteAssembler::new(),
        }
    }

    /// Creates an engine with a fresh worker pool and the plan request builder.
    ///
    /// # Errors
    ///
    /// Returns `QuoteError::Configuration` if the configuration is invalid.
    pub fn from_config(
        config: &QuotationConfig,
        service: Arc<dyn PricingService>,
    ) -> QuotationResult<Self> {
        config
            .validate()
            .map_err(|e| QuoteError::configuration(e.to_string()))?;

        let pool = WorkerPool::new(config.worker_count, config.queue_capacity);
        let builder =
            PlanRequestBuilder::new(config.tier_products(), config.automatic_promotions);

        Ok(Self::new(
            service,
            Arc::new(builder),
            BoundedDispatcher::new(pool, config.result_timeout()),
            RetryPolicy::new(config.invalid_promotion_code.clone()),
        ))
    }

    /// The dispatcher, and through it the shared pool.
    #[must_use]
    pub fn dispatcher(&self) -> &BoundedDispatcher {
        &self.dispatcher
    }

    /// Produces a quotation.
    ///
    /// A beneficiary list, even empty, makes the call an inclusion into the
    /// applicant's existing policy; otherwise `products` lists extra products
    /// per insured position of a new policy.
    ///
    /// # Errors
    ///
    /// - `QuoteError::InvalidRequest` if a request cannot be built
    /// - `QuoteError::ServiceRejected` / `DispatchFailed` for the first fatal pricing result
    /// - `QuoteError::NoPriceAvailable` if no collected outcome carries a tariff
    pub async fn quote(
        &self,
        applicant: &Applicant,
        products: &[ProductSelection],
        beneficiaries: Option<&[BeneficiaryRecord]>,
        breakdown_requested: bool,
        context: &QuoteContext,
    ) -> QuotationResult<QuoteResult> {
        let quotation_id = QuotationId::new_v4();
        let operation = QuoteOperation::resolve(products, beneficiaries);
        let frequencies = self.resolver.resolve(&operation, applicant, context);

        let tasks = frequencies
            .iter()
            .map(|&frequency| {
                let request = self.builder.build(applicant, &operation, context, frequency)?;
                Ok(PricingTask::new(
                    Arc::clone(&self.service),
                    Arc::clone(&self.retry),
                    request,
                ))
            })
            .collect::<QuotationResult<Vec<_>>>()?;

        let report = self.dispatcher.dispatch(tasks).await?;
        let reference = ReferenceSelector::select(&report.outcomes)?;
        tracing::debug!(
            %quotation_id,
            reference = %reference.frequency,
            collected = report.outcomes.len(),
            "selected reference tariff"
        );

        let eligibility = PromotionEligibility::for_call(applicant, context);
        let aggregated = PremiumAggregator::new(&context.plan, eligibility).aggregate(
            &frequencies,
            reference.tariff,
            report.outcomes.iter().filter_map(PricingOutcome::advisory),
        )?;
        let result = self
            .assembler
            .assemble(quotation_id, aggregated, breakdown_requested)?;

        tracing::info!(
            %quotation_id,
            operation = operation.code(),
            frequencies = frequencies.len(),
            collected = report.outcomes.len(),
            advisories = result.errors.len(),
            promotion_adjusted = result.is_promotion_adjusted(),
            "quotation completed"
        );
        Ok(result)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::entities::applicant::fixtures::{applicant, person};
    use crate::domain::entities::{
        BeneficiaryTariff, ProductTariff, SimulationResponse, Tariff, TariffBreakdown,
    };
    use crate::domain::value_objects::{Frequency, ProductId};
    use crate::infrastructure::pricing::ScriptedPricingService;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn tariff() -> Tariff {
        Tariff {
            beneficiaries: vec![BeneficiaryTariff {
                products: vec![ProductTariff {
                    product_id: ProductId::new(1),
                    description: Some("Basic".into()),
                    breakdown: TariffBreakdown {
                        premium: Decimal::new(50, 0),
                        premium_tax: Decimal::new(3, 0),
                        css: Decimal::new(1, 1),
                        discount: Decimal::new(-5, 0),
                    },
                }],
            }],
            ..Tariff::default()
        }
    }

    fn engine(service: Arc<ScriptedPricingService>) -> QuotationEngine {
        let builder = PlanRequestBuilder::new(
            vec![ProductId::new(1), ProductId::new(5), ProductId::new(3)],
            true,
        )
        .with_reference_date(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
        QuotationEngine::new(
            service,
            Arc::new(builder),
            BoundedDispatcher::new(WorkerPool::new(4, 16), std::time::Duration::from_secs(5)),
            RetryPolicy::default(),
        )
    }

    #[tokio::test]
    async fn new_policy_prices_every_frequency() {
        let service = Arc::new(ScriptedPricingService::new(SimulationResponse::priced(tariff())));
        let result = engine(service.clone())
            .quote(&applicant(), &[], None, true, &QuoteContext::default())
            .await
            .unwrap();

        assert_eq!(service.call_count(), 4);
        assert_eq!(result.frequencies, Frequency::ALL.to_vec());
        assert_eq!(result.totals.payment[Frequency::Monthly], Decimal::new(48, 0));
        assert_eq!(result.totals.payment[Frequency::Annual], Decimal::new(43, 0));
        assert!(result.breakdown.is_some());
        assert!(result.errors.is_empty());
    }

    #[tokio::test]
    async fn monthly_only_prices_one_frequency() {
        let service = Arc::new(ScriptedPricingService::new(SimulationResponse::priced(tariff())));
        let context = QuoteContext {
            monthly_only: true,
            ..QuoteContext::default()
        };
        let result = engine(service.clone())
            .quote(&applicant(), &[], None, false, &context)
            .await
            .unwrap();

        assert_eq!(result.frequencies, vec![Frequency::Monthly]);
        assert_eq!(service.call_count(), 1);
        assert!(result.breakdown.is_none());
    }

    #[tokio::test]
    async fn inclusion_uses_frequency_on_file() {
        let service = Arc::new(ScriptedPricingService::new(SimulationResponse::priced(tariff())));
        let mut applicant = applicant();
        applicant.policy_id = Some(5500);
        applicant.collective_id = 12;
        let beneficiaries = vec![BeneficiaryRecord {
            personal: person("new child"),
        }];

        let result = engine(service.clone())
            .quote(&applicant, &[], Some(&beneficiaries), false, &QuoteContext::default())
            .await
            .unwrap();

        assert_eq!(result.frequencies, vec![Frequency::Quarterly]);
        let calls = service.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].contract.policy_id, Some(5500));
    }

    #[tokio::test]
    async fn invalid_request_fails_before_dispatch() {
        let service = Arc::new(ScriptedPricingService::new(SimulationResponse::priced(tariff())));
        let mut applicant = applicant();
        applicant.postal_code = None;

        let err = engine(service.clone())
            .quote(&applicant, &[], None, false, &QuoteContext::default())
            .await
            .unwrap_err();

        assert!(matches!(err, QuoteError::InvalidRequest(_)));
        assert_eq!(service.call_count(), 0);
    }

    #[test]
    fn from_config_rejects_invalid_settings() {
        let config = QuotationConfig {
            result_timeout_ms: 0,
            ..QuotationConfig::default()
        };
        let service = Arc::new(ScriptedPricingService::new(SimulationResponse::default()));
        let err = QuotationEngine::from_config(&config, service).unwrap_err();
        assert!(matches!(err, QuoteError::Configuration(_)));
    }
}
