//! # Tariff
//!
//! The rating service's priced breakdown for one simulated frequency, and
//! the raw response envelope it arrives in.

use crate::domain::value_objects::ProductId;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Amounts priced for one product line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TariffBreakdown {
    /// Net premium.
    pub premium: Decimal,
    /// Insurance premium tax.
    pub premium_tax: Decimal,
    /// Compensation-consortium surcharge, billed in the first installment only.
    pub css: Decimal,
    /// Discount in the service's native monthly/quarterly units.
    pub discount: Decimal,
}

impl TariffBreakdown {
    /// Steady-state installment amount: premium plus tax, no surcharge.
    #[inline]
    #[must_use]
    pub fn steady_state_amount(&self) -> Decimal {
        self.premium + self.premium_tax
    }
}

/// Tariff of one product for one beneficiary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductTariff {
    /// Product id.
    pub product_id: ProductId,
    /// Product description as reported by the service.
    #[serde(default)]
    pub description: Option<String>,
    /// Priced amounts.
    #[serde(default)]
    pub breakdown: TariffBreakdown,
}

/// Tariffs of every product for one beneficiary.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeneficiaryTariff {
    /// Product lines, in service order.
    #[serde(default)]
    pub products: Vec<ProductTariff>,
}

/// A promotion as reported by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicePromotion {
    /// Promotion code.
    #[serde(default)]
    pub code: Option<String>,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
    /// Type string.
    #[serde(default)]
    pub kind: String,
}

/// A receipt of the first-year schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    /// Product the receipt belongs to; absent for policy-level receipts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<ProductId>,
    /// Issue date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue_date: Option<NaiveDate>,
    /// Amount.
    pub amount: Decimal,
}

/// First-year receipt schedule.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirstYearReceipts {
    /// Policy-level receipts; the first one includes the one-time surcharge.
    #[serde(default)]
    pub policy_receipts: Vec<Receipt>,
    /// Per-product receipts.
    #[serde(default)]
    pub product_receipts: Vec<Receipt>,
}

/// A successfully priced tariff.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tariff {
    /// Per-beneficiary breakdown, in request order.
    #[serde(default)]
    pub beneficiaries: Vec<BeneficiaryTariff>,
    /// Policy-level applied promotions; the service repeats each entry once per beneficiary.
    #[serde(default)]
    pub promotions: Vec<ServicePromotion>,
    /// First-year receipts, when the service computed them.
    #[serde(default)]
    pub receipts: Option<FirstYearReceipts>,
}

/// Error reported by the rating service inside a well-formed response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceFault {
    /// Machine-readable code.
    pub code: String,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
}

/// Response envelope of one simulation call.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResponse {
    /// Priced tariff, present on success.
    #[serde(default)]
    pub tariff: Option<Tariff>,
    /// Service error, present on failure.
    #[serde(default)]
    pub error: Option<ServiceFault>,
    /// Raw response body, kept for diagnostics.
    #[serde(skip)]
    pub raw: Option<String>,
}

impl SimulationResponse {
    /// Successful response carrying a tariff.
    #[must_use]
    pub fn priced(tariff: Tariff) -> Self {
        Self {
            tariff: Some(tariff),
            error: None,
            raw: None,
        }
    }

    /// Failed response carrying a service error.
    #[must_use]
    pub fn failed(code: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            tariff: None,
            error: Some(ServiceFault {
                code: code.into(),
                description: description.into(),
            }),
            raw: None,
        }
    }

    /// Returns true if the service reported an error.
    #[inline]
    #[must_use]
    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    /// Returns true if the error code matches `code`, ignoring case.
    #[must_use]
    pub fn has_error_code(&self, code: &str) -> bool {
        self.error
            .as_ref()
            .is_some_and(|e| e.code.eq_ignore_ascii_case(code))
    }
}
