//! # Domain Entities
//!
//! Records flowing through the quotation pipeline.
//!
//! ## Inputs
//!
//! - [`Applicant`], [`QuoteOperation`]: who is insured and what is quoted
//! - [`QuoteContext`], [`PlanCatalog`]: plan data and contract exception flags
//!
//! ## Service boundary
//!
//! - [`PricingRequest`]: payload for one frequency
//! - [`SimulationResponse`], [`Tariff`]: what the rating service returns
//! - [`PricingOutcome`]: result of one dispatched task
//!
//! ## Output
//!
//! - [`AggregatedQuote`]: call-scoped accumulator
//! - [`QuoteResult`]: caller-facing quotation

pub mod applicant;
pub mod context;
pub mod outcome;
pub mod pricing_request;
pub mod quote;
pub mod tariff;

pub use applicant::{
    Applicant, BeneficiaryRecord, Insured, PersonalData, ProductSelection, QuoteOperation,
};
pub use context::{PlanCatalog, PlanCover, PlanProduct, QuoteContext};
pub use outcome::PricingOutcome;
pub use pricing_request::{
    BeneficiaryRequest, ContractInfo, CoverRequest, OperationKind, PricingRequest,
    ProductRequest, PromotionInfo,
};
pub use quote::{AggregatedQuote, InsuredPremium, ProductPremium, QuoteResult, QuoteTotals};
pub use tariff::{
    BeneficiaryTariff, FirstYearReceipts, ProductTariff, Receipt, ServiceFault,
    ServicePromotion, SimulationResponse, Tariff, TariffBreakdown,
};
