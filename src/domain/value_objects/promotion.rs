//! # Promotions
//!
//! Applied-promotion value objects reported back to the caller.
//!
//! The rating service reports promotions with a free-form type string; it is
//! mapped onto [`PromotionKind`] so the assembler can decide whether a
//! percentage discount changed the price baseline.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of benefit a promotion grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PromotionKind {
    /// Percentage discount on the premium.
    PercentageDiscount,
    /// Some months of the first year are free.
    FreeMonths,
    /// Non-monetary gift.
    Gift,
    /// Any type the service reports that is not modelled here.
    #[default]
    Other,
}

impl PromotionKind {
    /// Returns true if the promotion discounts the premium by a percentage.
    #[inline]
    #[must_use]
    pub const fn is_percentage_discount(self) -> bool {
        matches!(self, Self::PercentageDiscount)
    }
}

impl fmt::Display for PromotionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PercentageDiscount => write!(f, "PERCENTAGE_DISCOUNT"),
            Self::FreeMonths => write!(f, "FREE_MONTHS"),
            Self::Gift => write!(f, "GIFT"),
            Self::Other => write!(f, "OTHER"),
        }
    }
}

impl FromStr for PromotionKind {
    type Err = std::convert::Infallible;

    /// Never fails: unknown types map to [`PromotionKind::Other`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_uppercase().replace('-', "_").as_str() {
            "PERCENTAGE_DISCOUNT" | "DESCUENTO_PORCENTAJE" | "1" => Self::PercentageDiscount,
            "FREE_MONTHS" | "MESES_GRATIS" | "2" => Self::FreeMonths,
            "GIFT" | "REGALO" | "3" => Self::Gift,
            _ => Self::Other,
        })
    }
}

/// A promotion applied to the quoted policy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AppliedPromotion {
    /// Numeric promotion id, when the service's code is numeric.
    pub id: Option<i64>,
    /// Human-readable description.
    pub description: Option<String>,
    /// Kind of benefit.
    pub kind: PromotionKind,
}

impl AppliedPromotion {
    /// Builds an applied promotion from the service's raw code, description and type.
    #[must_use]
    pub fn from_service(code: Option<&str>, description: Option<String>, kind: &str) -> Self {
        let kind = kind.parse().unwrap_or_default();
        Self {
            id: code.and_then(|c| c.trim().parse().ok()),
            description,
            kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_parsing_is_lenient() {
        assert_eq!(
            "percentage-discount".parse::<PromotionKind>(),
            Ok(PromotionKind::PercentageDiscount)
        );
        assert_eq!(
            "DESCUENTO_PORCENTAJE".parse::<PromotionKind>(),
            Ok(PromotionKind::PercentageDiscount)
        );
        assert_eq!("whatever".parse::<PromotionKind>(), Ok(PromotionKind::Other));
    }

    #[test]
    fn from_service_parses_numeric_codes_only() {
        let promo = AppliedPromotion::from_service(Some("1234"), None, "GIFT");
        assert_eq!(promo.id, Some(1234));
        assert_eq!(promo.kind, PromotionKind::Gift);

        let promo = AppliedPromotion::from_service(Some("SUMMER"), Some("x".into()), "1");
        assert_eq!(promo.id, None);
        assert!(promo.kind.is_percentage_discount());
    }
}
