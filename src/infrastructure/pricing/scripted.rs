//! # Scripted Pricing Service
//!
//! In-memory [`PricingService`] that answers from a per-frequency script.
//!
//! Each frequency has a queue of replies consumed one per call; the last
//! reply of a queue is repeated once the queue is down to it. Frequencies
//! without a script get the fallback reply. An artificial latency can be
//! set per frequency to control completion order.
//!
//! # Examples
//!
//! ```
//! use policy_quotation::domain::entities::{SimulationResponse, Tariff};
//! use policy_quotation::domain::value_objects::Frequency;
//! use policy_quotation::infrastructure::pricing::ScriptedPricingService;
//!
//! let service = ScriptedPricingService::new(SimulationResponse::priced(Tariff::default()))
//!     .with_script(
//!         Frequency::Monthly,
//!         vec![Ok(SimulationResponse::failed("COD_PROMOCIONAL_INVALIDO", "unknown code"))],
//!     );
//! assert_eq!(service.call_count(), 0);
//! ```

use crate::domain::entities::{PricingRequest, SimulationResponse};
use crate::domain::value_objects::Frequency;
use crate::infrastructure::pricing::error::PricingResult;
use crate::infrastructure::pricing::traits::PricingService;
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;
use parking_lot::Mutex;

/// In-memory rating service driven by a script.
#[derive(Debug, Clone)]
pub struct ScriptedPricingService {
    fallback: PricingResult<SimulationResponse>,
    scripts: Arc<Mutex<HashMap<Frequency, VecDeque<PricingResult<SimulationResponse>>>>>,
    latency: HashMap<Frequency, Duration>,
    calls: Arc<Mutex<Vec<PricingRequest>>>,
}

impl ScriptedPricingService {
    /// Creates a service answering every call with `fallback`.
    #[must_use]
    pub fn new(fallback: SimulationResponse) -> Self {
        Self::with_fallback(Ok(fallback))
    }

    /// Creates a service whose fallback may be a transport failure.
    #[must_use]
    pub fn with_fallback(fallback: PricingResult<SimulationResponse>) -> Self {
        Self {
            fallback,
            scripts: Arc::new(Mutex::new(HashMap::new())),
            latency: HashMap::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Scripts the replies for one frequency.
    #[must_use]
    pub fn with_script(
        self,
        frequency: Frequency,
        replies: Vec<PricingResult<SimulationResponse>>,
    ) -> Self {
        self.scripts.lock().insert(frequency, replies.into());
        self
    }

    /// Delays every reply for `frequency`.
    #[must_use]
    pub fn with_latency(mut self, frequency: Frequency, latency: Duration) -> Self {
        self.latency.insert(frequency, latency);
        self
    }

    /// Number of calls received so far.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Requests received so far, in arrival order.
    #[must_use]
    pub fn calls(&self) -> Vec<PricingRequest> {
        self.calls.lock().clone()
    }

    /// Number of calls received for one frequency.
    #[must_use]
    pub fn calls_for(&self, frequency: Frequency) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|r| r.frequency() == frequency)
            .count()
    }

    fn next_reply(&self, frequency: Frequency) -> PricingResult<SimulationResponse> {
        let mut scripts = self.scripts.lock();
        match scripts.get_mut(&frequency) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap_or_else(|| self.fallback.clone()),
            Some(queue) => queue.front().cloned().unwrap_or_else(|| self.fallback.clone()),
            None => self.fallback.clone(),
        }
    }
}

#[async_trait]
impl PricingService for ScriptedPricingService {
    async fn simulate(&self, request: &PricingRequest) -> PricingResult<SimulationResponse> {
        let frequency = request.frequency();
        self.calls.lock().push(request.clone());

        if let Some(latency) = self.latency.get(&frequency) {
            tokio::time::sleep(*latency).await;
        }
        self.next_reply(frequency)
    }

    fn name(&self) -> &str {
        "scripted-pricing-service"
    }
}
