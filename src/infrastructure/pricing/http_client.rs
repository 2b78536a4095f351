//! # HTTP Pricing Service
//!
//! [`PricingService`] adapter for a rating service exposed over HTTP/JSON.
//!
//! The request is POSTed as JSON to `{base_url}/simulation`. The response
//! body is the [`SimulationResponse`] envelope; a non-success status whose
//! body still decodes to an envelope with an error is treated as a service
//! error, anything else as a transport failure.

use crate::domain::entities::{PricingRequest, SimulationResponse};
use crate::infrastructure::pricing::error::{PricingResult, PricingServiceError};
use crate::infrastructure::pricing::traits::PricingService;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Path of the simulation endpoint.
const SIMULATION_PATH: &str = "simulation";

/// Rating service reached over HTTP.
#[derive(Debug, Clone)]
pub struct HttpPricingService {
    client: Client,
    endpoint: String,
    timeout_ms: u64,
}

impl HttpPricingService {
    /// Creates a client for the service at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns `PricingServiceError::InternalError` if the client cannot be created.
    pub fn new(base_url: &str, timeout_ms: u64) -> PricingResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .map_err(|e| {
                PricingServiceError::internal_error(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            endpoint: format!("{}/{}", base_url.trim_end_matches('/'), SIMULATION_PATH),
            timeout_ms,
        })
    }

    /// Returns the configured timeout in milliseconds.
    #[inline]
    #[must_use]
    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    /// Returns the full simulation endpoint.
    #[inline]
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn map_reqwest_error(&self, error: reqwest::Error) -> PricingServiceError {
        if error.is_timeout() {
            PricingServiceError::timeout(format!("Request timed out after {}ms", self.timeout_ms))
        } else if error.is_connect() {
            PricingServiceError::connection(format!("Connection failed: {}", error))
        } else {
            PricingServiceError::connection(format!("HTTP request failed: {}", error))
        }
    }

    fn map_status_error(status: StatusCode, body: &str) -> PricingServiceError {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                PricingServiceError::authentication(format!("Authentication failed: {}", body))
            }
            _ => PricingServiceError::status(status.as_u16(), body.to_string()),
        }
    }
}

#[async_trait]
impl PricingService for HttpPricingService {
    async fn simulate(&self, request: &PricingRequest) -> PricingResult<SimulationResponse> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.map_reqwest_error(e))?;

        match serde_json::from_str::<SimulationResponse>(&body) {
            Ok(mut decoded) if status.is_success() || decoded.has_error() => {
                decoded.raw = Some(body);
                Ok(decoded)
            }
            Ok(_) => Err(Self::map_status_error(status, &body)),
            Err(e) if status.is_success() => Err(PricingServiceError::protocol_error(format!(
                "Failed to parse response: {}",
                e
            ))),
            Err(_) => Err(Self::map_status_error(status, &body)),
        }
    }

    fn name(&self) -> &str {
        "http-pricing-service"
    }
}
