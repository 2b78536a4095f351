//! # Application Layer
//!
//! Orchestration of the quotation use case on top of the domain rules and
//! the pricing service port.

pub mod error;
pub mod services;
