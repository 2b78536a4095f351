//! # Retry Policy
//!
//! Recovery for a rejected promotional code.
//!
//! When the rating service answers with the configured "invalid promotional
//! code" error, the request is priced once more with its promotion codes
//! removed. The retry runs synchronously inside the same task and happens
//! at most once; the original code is kept on the outcome as an advisory.
//!
//! | first response | retried response | outcome |
//! |----------------|------------------|---------|
//! | tariff, no error | - | `Success` |
//! | invalid code | tariff, no error | `Success` with advisory |
//! | invalid code | invalid code again | `RecoverableError` |
//! | invalid code | any other error | `FatalError` |
//! | any other error | - | `FatalError` |
//!
//! A response with neither a tariff nor an error is fatal.

use crate::application::error::{QuotationResult, QuoteError};
use crate::domain::entities::{PricingOutcome, PricingRequest, SimulationResponse};
use crate::infrastructure::pricing::traits::PricingService;

/// Error code the rating service uses for an unknown promotional code.
pub const INVALID_PROMOTION_CODE: &str = "COD_PROMOCIONAL_INVALIDO";

/// Message used when the service returns neither a tariff nor an error.
pub const NO_TARIFF_MESSAGE: &str = "pricing service returned no tariff";

/// Recovery policy for rejected promotional codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    invalid_promotion_code: String,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(INVALID_PROMOTION_CODE)
    }
}

impl RetryPolicy {
    /// Creates a policy triggered by `invalid_promotion_code` (matched ignoring case).
    #[must_use]
    pub fn new(invalid_promotion_code: impl Into<String>) -> Self {
        Self {
            invalid_promotion_code: invalid_promotion_code.into(),
        }
    }

    /// The error code that triggers a retry.
    #[must_use]
    pub fn invalid_promotion_code(&self) -> &str {
        &self.invalid_promotion_code
    }

    /// Returns true if the response signals the recoverable error.
    #[must_use]
    pub fn is_recoverable(&self, response: &SimulationResponse) -> bool {
        response.has_error_code(&self.invalid_promotion_code)
    }

    /// Prices `request`, retrying once without promotion codes when the
    /// service rejects the code.
    ///
    /// # Errors
    ///
    /// Returns a `QuoteError::DispatchFailed` when a call fails in transport.
    /// Service-level rejections are returned as `PricingOutcome::FatalError`.
    pub async fn execute(
        &self,
        service: &dyn PricingService,
        request: &PricingRequest,
    ) -> QuotationResult<PricingOutcome> {
        let frequency = request.frequency();
        let response = simulate(service, request).await?;

        if !self.is_recoverable(&response) {
            return Ok(settle(service, request, response, None));
        }

        let code = response
            .error
            .as_ref()
            .map(|e| e.code.clone())
            .unwrap_or_else(|| self.invalid_promotion_code.clone());
        tracing::info!(
            service = service.name(),
            %frequency,
            code = %code,
            request = %request_json(request),
            response = %response_text(&response),
            "promotional code rejected; pricing again without it"
        );

        let stripped = request.without_promotion_codes();
        let retried = simulate(service, &stripped).await?;

        if self.is_recoverable(&retried) {
            return Ok(PricingOutcome::RecoverableError { frequency, code });
        }
        Ok(settle(service, &stripped, retried, Some(code)))
    }
}

/// Calls the service, logging transport failures before they propagate.
async fn simulate(
    service: &dyn PricingService,
    request: &PricingRequest,
) -> QuotationResult<SimulationResponse> {
    service.simulate(request).await.map_err(|e| {
        tracing::error!(
            service = service.name(),
            frequency = %request.frequency(),
            error = %e,
            retryable = e.is_retryable(),
            "pricing call failed in transport"
        );
        QuoteError::from(e)
    })
}

/// Turns a response that will not be retried into an outcome.
fn settle(
    service: &dyn PricingService,
    request: &PricingRequest,
    response: SimulationResponse,
    advisory: Option<String>,
) -> PricingOutcome {
    let frequency = request.frequency();
    let response = match response {
        SimulationResponse {
            tariff: Some(tariff),
            error: None,
            ..
        } => {
            return PricingOutcome::Success {
                frequency,
                tariff,
                advisory,
            };
        }
        other => other,
    };

    let message = response
        .error
        .as_ref()
        .map(|e| e.description.clone())
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| NO_TARIFF_MESSAGE.to_string());
    tracing::error!(
        service = service.name(),
        %frequency,
        error = %message,
        request = %request_json(request),
        response = %response_text(&response),
        "pricing service rejected the request"
    );
    PricingOutcome::FatalError { frequency, message }
}

fn request_json(request: &PricingRequest) -> String {
    serde_json::to_string(request).unwrap_or_default()
}

fn response_text(response: &SimulationResponse) -> String {
    match &response.raw {
        Some(raw) => raw.clone(),
        None => serde_json::to_string(response).unwrap_or_default(),
    }
}
