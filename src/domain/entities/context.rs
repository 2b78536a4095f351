//! # Quote Context
//!
//! Per-call context values: the commercial plan catalog, the exception
//! flags configured for the contract, and caller switches.

use crate::domain::value_objects::ProductId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Exception flag that disables promotions on the department-store collective product.
pub const PROMO_ECI_COLECTIVOS: &str = "PROMO_ECI_COLECTIVOS";

/// Exception flag that disables promotions on the pharmacy product.
pub const PROMO_FARMACIA: &str = "PROMO_FARMACIA";

/// A cover offered under a plan product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanCover {
    /// Cover id.
    pub cover_id: i64,
    /// True if the cover is mandatory.
    pub mandatory: bool,
    /// Minimum insured capital.
    #[serde(default)]
    pub minimum_capital: Option<Decimal>,
}

/// A product of the commercial plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanProduct {
    /// Product id.
    pub product_id: ProductId,
    /// Commercial name shown to the customer.
    pub commercial_name: String,
    /// True if the product cannot be removed from the plan.
    pub mandatory: bool,
    /// Covers available under the product.
    #[serde(default)]
    pub covers: Vec<PlanCover>,
}

impl PlanProduct {
    /// Covers that must be sent with a pricing request: mandatory ones with
    /// a positive minimum capital.
    pub fn priced_covers(&self) -> impl Iterator<Item = (i64, Decimal)> + '_ {
        self.covers.iter().filter_map(|cover| match cover.minimum_capital {
            Some(capital) if cover.mandatory && capital > Decimal::ZERO => {
                Some((cover.cover_id, capital))
            }
            _ => None,
        })
    }
}

/// The commercial plan being quoted.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanCatalog {
    /// Products of the plan.
    #[serde(default)]
    pub products: Vec<PlanProduct>,
}

impl PlanCatalog {
    /// Looks a product up by id.
    #[must_use]
    pub fn product(&self, product_id: ProductId) -> Option<&PlanProduct> {
        self.products.iter().find(|p| p.product_id == product_id)
    }
}

/// Context values accompanying a quote call.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteContext {
    /// Plan catalog.
    #[serde(default)]
    pub plan: PlanCatalog,
    /// Exception flags configured for the contract.
    #[serde(default)]
    pub exceptions: Vec<String>,
    /// Quote only the monthly frequency.
    #[serde(default)]
    pub monthly_only: bool,
}

impl QuoteContext {
    /// Returns true if the named exception flag is configured.
    #[must_use]
    pub fn has_exception(&self, flag: &str) -> bool {
        let present = self.exceptions.iter().any(|e| e == flag);
        tracing::debug!(flag, present, "checked contract exception flag");
        present
    }
}
