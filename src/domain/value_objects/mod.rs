//! # Value Objects
//!
//! Immutable types with validation and domain semantics.
//!
//! - [`Frequency`] / [`FrequencySlots`]: billing periods and the four-slot totals
//! - [`ProductId`], [`QuotationId`]: identifiers
//! - [`AppliedPromotion`], [`PromotionKind`]: promotions reported to the caller
//! - [`TierInfo`]: per-product tier coefficients
//! - [`CheckedArithmetic`]: overflow-safe accumulation

pub mod arithmetic;
pub mod frequency;
pub mod ids;
pub mod promotion;
pub mod tier;

pub use arithmetic::{ArithmeticError, ArithmeticResult, CheckedArithmetic};
pub use frequency::{Frequency, FrequencySlots, ParseFrequencyError};
pub use ids::{ProductId, QuotationId};
pub use promotion::{AppliedPromotion, PromotionKind};
pub use tier::{ProductTier, TierInfo};
