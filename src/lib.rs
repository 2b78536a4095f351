//! # Policy Quotation
//!
//! Insurance policy quotation engine.
//!
//! A quote prices a new policy, or the inclusion of beneficiaries into an
//! existing collective policy, by calling a remote rating service once per
//! billing frequency and folding the tariffs into a single caller-facing
//! [`QuoteResult`](domain::entities::QuoteResult): per-insured premiums,
//! total payment and discount, applied promotions and the first-year
//! receipt schedule.
//!
//! ## Layers
//!
//! - [`domain`]: value objects, entities and pure business rules
//! - [`application`]: the quotation pipeline and its error type
//! - [`infrastructure`]: the rating service port and adapters
//! - [`config`]: typed configuration
//!
//! ## Example
//!
//! ```ignore
//! use policy_quotation::application::services::QuotationEngine;
//! use policy_quotation::config::QuotationConfig;
//! use policy_quotation::infrastructure::pricing::HttpPricingService;
//! use std::sync::Arc;
//!
//! let config = QuotationConfig::load()?;
//! let service = HttpPricingService::new(&config.service.base_url, config.service.timeout_ms)?;
//! let engine = QuotationEngine::from_config(&config, Arc::new(service))?;
//! let result = engine.quote(&applicant, &[], None, true, &context).await?;
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
