//! # Domain Services
//!
//! Stateless business rules used by the quotation pipeline.
//!
//! - [`FrequencyResolver`]: which frequencies to price
//! - [`PromotionEligibility`]: product-specific promotion gating
//! - [`RequestBuilder`] / [`PlanRequestBuilder`]: applicant records to pricing requests

pub mod frequency_resolver;
pub mod promotion_eligibility;
pub mod request_builder;

pub use frequency_resolver::FrequencyResolver;
pub use promotion_eligibility::PromotionEligibility;
pub use request_builder::{PlanRequestBuilder, RequestBuilder, normalize_birth_date};
