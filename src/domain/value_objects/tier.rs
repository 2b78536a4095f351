//! # Tier Coefficients
//!
//! Per-product pricing coefficients supplied by the caller as a single
//! `#`-delimited string.
//!
//! The layout is positional: position 0 is ignored, positions 1, 2 and 3
//! are the coefficients of the three tier products (in the configured
//! order), and the last position, truncated to an integer, is the global
//! tier.
//!
//! # Examples
//!
//! ```
//! use policy_quotation::domain::value_objects::ids::ProductId;
//! use policy_quotation::domain::value_objects::tier::TierInfo;
//!
//! let products = [ProductId::new(1), ProductId::new(5), ProductId::new(3)];
//! let tier = TierInfo::parse("0#1.10#0.95#1.00#2.7", &products).unwrap().unwrap();
//!
//! assert_eq!(tier.global_tier, 2);
//! assert_eq!(tier.product_tiers.len(), 3);
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::ids::ProductId;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Separator between positions in the coefficient string.
pub const TIER_SEPARATOR: char = '#';

/// Coefficient for a single tier product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductTier {
    /// Product the coefficient applies to.
    pub product_id: ProductId,
    /// Coefficient value.
    pub value: Decimal,
}

/// Tier information sent with a pricing request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierInfo {
    /// One coefficient per configured tier product.
    pub product_tiers: Vec<ProductTier>,
    /// Global tier, truncated to an integer.
    pub global_tier: i64,
}

impl TierInfo {
    /// Parses a coefficient string.
    ///
    /// Returns `Ok(None)` for an empty string.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTier` if the string has fewer positions
    /// than the tier products need, or if a used position is not numeric.
    pub fn parse(coefficients: &str, tier_products: &[ProductId]) -> DomainResult<Option<Self>> {
        if coefficients.is_empty() {
            return Ok(None);
        }

        let positions: Vec<&str> = coefficients.split(TIER_SEPARATOR).collect();
        if positions.len() <= tier_products.len() {
            return Err(DomainError::invalid_tier(format!(
                "expected more than {} positions, got {}",
                tier_products.len(),
                positions.len()
            )));
        }

        let product_tiers = tier_products
            .iter()
            .zip(positions.iter().skip(1))
            .map(|(product_id, raw)| {
                Ok(ProductTier {
                    product_id: *product_id,
                    value: parse_coefficient(raw)?,
                })
            })
            .collect::<DomainResult<Vec<_>>>()?;

        let global = positions
            .last()
            .map(|raw| parse_coefficient(raw))
            .transpose()?
            .unwrap_or_default();
        let global_tier = global
            .trunc()
            .to_i64()
            .ok_or_else(|| DomainError::invalid_tier(format!("global tier out of range: {global}")))?;

        Ok(Some(Self {
            product_tiers,
            global_tier,
        }))
    }
}

fn parse_coefficient(raw: &str) -> DomainResult<Decimal> {
    let trimmed = raw.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| DomainError::invalid_tier(format!("not a number: {raw:?}")))
}
