//! # Infrastructure Layer
//!
//! Adapters for external systems.
//!
//! - [`pricing`]: the rating service port and its HTTP and in-memory adapters

pub mod pricing;
