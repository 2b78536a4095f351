//! # Pricing Service
//!
//! Port and adapters for the remote rating service.
//!
//! - [`PricingService`]: the async port the quotation engine calls
//! - [`HttpPricingService`]: HTTP/JSON adapter
//! - [`ScriptedPricingService`]: in-memory adapter answering from a script
//! - [`PricingServiceError`]: transport-level failures

pub mod error;
pub mod http_client;
pub mod scripted;
pub mod traits;

pub use error::{PricingResult, PricingServiceError};
pub use http_client::HttpPricingService;
pub use scripted::ScriptedPricingService;
pub use traits::PricingService;
