//! # Pricing Task
//!
//! One unit of dispatched work: price the request built for one frequency,
//! applying the [`RetryPolicy`] inside the same task.

use crate::application::error::QuotationResult;
use crate::application::services::retry::RetryPolicy;
use crate::domain::entities::{PricingOutcome, PricingRequest};
use crate::domain::value_objects::Frequency;
use crate::infrastructure::pricing::traits::PricingService;
use std::sync::Arc;

/// Pricing call for one frequency.
#[derive(Debug, Clone)]
pub struct PricingTask {
    service: Arc<dyn PricingService>,
    policy: Arc<RetryPolicy>,
    request: PricingRequest,
}

impl PricingTask {
    /// Creates a task.
    #[must_use]
    pub fn new(
        service: Arc<dyn PricingService>,
        policy: Arc<RetryPolicy>,
        request: PricingRequest,
    ) -> Self {
        Self {
            service,
            policy,
            request,
        }
    }

    /// Frequency this task prices.
    #[inline]
    #[must_use]
    pub fn frequency(&self) -> Frequency {
        self.request.frequency()
    }

    /// The request this task sends.
    #[inline]
    #[must_use]
    pub fn request(&self) -> &PricingRequest {
        &self.request
    }

    /// Runs the task to its single outcome.
    ///
    /// # Errors
    ///
    /// Returns a `QuoteError` when a call fails in transport.
    pub async fn run(self) -> QuotationResult<PricingOutcome> {
        self.policy
            .execute(self.service.as_ref(), &self.request)
            .await
    }
}
