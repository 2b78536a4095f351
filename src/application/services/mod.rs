//! # Application Services
//!
//! The quotation pipeline.
//!
//! - [`QuotationEngine`]: the `quote` operation
//! - [`WorkerPool`] / [`BoundedDispatcher`]: bounded concurrent pricing calls
//! - [`PricingTask`] / [`RetryPolicy`]: one call per frequency with promo-code recovery
//! - [`ReferenceSelector`]: the tariff that drives aggregation
//! - [`PremiumAggregator`] / [`QuoteAssembler`]: totals, promotions, receipts and the result

pub mod dispatcher;
pub mod premium_aggregation;
pub mod pricing_task;
pub mod quotation;
pub mod quote_assembler;
pub mod reference_selector;
pub mod retry;
pub mod worker_pool;

pub use dispatcher::{BoundedDispatcher, DispatchReport};
pub use premium_aggregation::{PremiumAggregator, group_promotions};
pub use pricing_task::PricingTask;
pub use quotation::QuotationEngine;
pub use quote_assembler::QuoteAssembler;
pub use reference_selector::{ReferenceSelector, ReferenceTariff};
pub use retry::RetryPolicy;
pub use worker_pool::{SubmitError, WorkerPool};
