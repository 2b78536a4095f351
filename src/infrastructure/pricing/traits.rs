//! # Pricing Service Port
//!
//! The rating service the quotation engine calls once per frequency.
//!
//! # Examples
//!
//! ```ignore
//! use policy_quotation::infrastructure::pricing::traits::PricingService;
//!
//! struct MyRatingService { /* ... */ }
//!
//! #[async_trait::async_trait]
//! impl PricingService for MyRatingService {
//!     // ... implement simulate
//! }
//! ```

use crate::domain::entities::{PricingRequest, SimulationResponse};
use crate::infrastructure::pricing::error::PricingResult;
use async_trait::async_trait;
use std::fmt;

/// Remote rating service.
///
/// A call either yields a [`SimulationResponse`] (carrying a tariff, or a
/// service error with a machine-readable code) or fails in transport.
#[async_trait]
pub trait PricingService: Send + Sync + fmt::Debug {
    /// Prices one request.
    ///
    /// # Errors
    ///
    /// Returns a `PricingServiceError` when the call itself fails (timeout,
    /// connection, undecodable response).
    async fn simulate(&self, request: &PricingRequest) -> PricingResult<SimulationResponse>;

    /// Name used in logs.
    fn name(&self) -> &str {
        "pricing-service"
    }
}
