//! # Pricing Request
//!
//! The immutable payload sent to the rating service, built once per
//! frequency being quoted.

use crate::domain::entities::applicant::QuoteOperation;
use crate::domain::errors::DomainError;
use crate::domain::value_objects::{Frequency, ProductId, TierInfo};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Operation kind, sent to the service as its numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum OperationKind {
    /// New policy.
    NewPolicy = 1,
    /// Beneficiary inclusion into an existing policy.
    BeneficiaryInclusion = 2,
}

impl OperationKind {
    /// Returns the wire code.
    #[inline]
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }
}

impl From<&QuoteOperation> for OperationKind {
    fn from(operation: &QuoteOperation) -> Self {
        if operation.is_inclusion() {
            Self::BeneficiaryInclusion
        } else {
            Self::NewPolicy
        }
    }
}

impl TryFrom<u8> for OperationKind {
    type Error = DomainError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::NewPolicy),
            2 => Ok(Self::BeneficiaryInclusion),
            other => Err(DomainError::InvalidOperation(other)),
        }
    }
}

impl From<OperationKind> for u8 {
    fn from(kind: OperationKind) -> Self {
        kind.code()
    }
}

/// Promotion information: the automatic-promotions switch plus zero or one code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromotionInfo {
    /// Let the service apply automatic promotions.
    pub automatic: bool,
    /// Promotion codes entered by the applicant.
    pub codes: Vec<String>,
}

/// A cover requested for a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverRequest {
    /// Cover id.
    pub cover_id: i64,
    /// Insured capital.
    pub capital: Decimal,
}

/// A product requested for a beneficiary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    /// Product id.
    pub product_id: ProductId,
    /// Covers to price.
    pub covers: Vec<CoverRequest>,
}

/// A beneficiary to price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeneficiaryRequest {
    /// Name, for traceability.
    pub name: String,
    /// Birth date as `dd/MM/yyyy`.
    pub birth_date: String,
    /// Relationship to the policyholder (1 = policyholder, 11 = other).
    pub relationship: u8,
    /// Sex code.
    pub sex: u8,
    /// Profession id.
    pub profession_id: i64,
    /// Existing client id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<i64>,
    /// Products to price.
    pub products: Vec<ProductRequest>,
}

/// Contract-level information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractInfo {
    /// Zero-padded five-digit postal code.
    pub postal_code: String,
    /// Effective date.
    pub effective_date: NaiveDate,
    /// Frequency being priced.
    pub frequency: Frequency,
    /// Commercial plan id.
    pub plan_id: i64,
    /// Intermediary id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intermediary_id: Option<i64>,
    /// Existing policy id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy_id: Option<i64>,
    /// Collective id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collective_id: Option<i64>,
    /// Department id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_id: Option<i64>,
    /// Company id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_id: Option<i64>,
}

/// Request sent to the rating service for one frequency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingRequest {
    /// Operation kind.
    pub operation: OperationKind,
    /// Promotion info. Every applicant carries a policyholder, so the plan
    /// builder always sends it; other builders may leave it out.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promotions: Option<PromotionInfo>,
    /// Tier info.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<TierInfo>,
    /// Beneficiaries to price.
    pub beneficiaries: Vec<BeneficiaryRequest>,
    /// Contract info.
    pub contract: ContractInfo,
}

impl PricingRequest {
    /// Frequency this request prices.
    #[inline]
    #[must_use]
    pub fn frequency(&self) -> Frequency {
        self.contract.frequency
    }

    /// Returns true if the request carries at least one promotion code.
    #[must_use]
    pub fn has_promotion_code(&self) -> bool {
        self.promotions.as_ref().is_some_and(|p| !p.codes.is_empty())
    }

    /// Returns a copy of this request with the promotion codes removed.
    #[must_use]
    pub fn without_promotion_codes(&self) -> Self {
        let mut stripped = self.clone();
        if let Some(promotions) = stripped.promotions.as_mut() {
            promotions.codes.clear();
        }
        stripped
    }
}
