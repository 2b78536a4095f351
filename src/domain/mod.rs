//! # Domain Layer
//!
//! Value objects, entities and pure business rules of the quotation engine.
//! Nothing in this layer performs I/O.

pub mod entities;
pub mod errors;
pub mod services;
pub mod value_objects;
