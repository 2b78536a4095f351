//! # Applicant
//!
//! Caller-supplied records describing who is being insured and under which
//! contract.
//!
//! A quote is either for a brand-new policy (the policyholder plus any
//! additional insureds) or for the inclusion of new beneficiaries into an
//! existing collective policy. [`QuoteOperation`] captures that distinction
//! once, at the top of the pipeline.

use crate::domain::value_objects::{Frequency, ProductId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Personal data of an insured person or beneficiary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalData {
    /// Full name.
    pub name: String,
    /// Birth date as `dd/MM/yyyy`, or an age in years, or absent.
    #[serde(default)]
    pub birth_date: Option<String>,
    /// Sex code; 0 means unspecified.
    #[serde(default)]
    pub sex: u8,
    /// Profession id; 0 or negative means unspecified.
    #[serde(default)]
    pub profession_id: i64,
}

/// An insured person on the applicant record (policyholder or additional insured).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insured {
    /// Personal data.
    pub personal: PersonalData,
    /// Existing client id, if known.
    #[serde(default)]
    pub client_id: Option<i64>,
    /// Products this person already contracts.
    #[serde(default)]
    pub contracted_products: Vec<ProductId>,
    /// True if the person held a previous policy (has a card).
    #[serde(default)]
    pub prior_policy: bool,
}

/// Applicant record for a quotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Applicant {
    /// Policyholder.
    pub policyholder: Insured,
    /// Additional insured persons, in order.
    #[serde(default)]
    pub insureds: Vec<Insured>,
    /// Postal code of the first registered address.
    pub postal_code: Option<u32>,
    /// Effective date of the contract.
    pub effective_date: NaiveDate,
    /// Payment frequency on file for an existing policy.
    pub payment_frequency: Frequency,
    /// Commercial plan id.
    pub plan_id: i64,
    /// Intermediary (broker) id.
    #[serde(default)]
    pub intermediary_id: Option<i64>,
    /// Existing policy id; `None` or 0 for a new policy.
    #[serde(default)]
    pub policy_id: Option<i64>,
    /// Collective id; 0 when not a collective policy.
    #[serde(default)]
    pub collective_id: i64,
    /// Department id within a collective.
    #[serde(default)]
    pub department_id: Option<i64>,
    /// Company id within a collective.
    #[serde(default)]
    pub company_id: Option<i64>,
    /// Promotional code entered by the applicant.
    #[serde(default)]
    pub promotion_code: Option<String>,
    /// `#`-delimited tier coefficient string.
    #[serde(default)]
    pub tier_coefficients: Option<String>,
}

impl Applicant {
    /// Returns true if the applicant references an existing policy.
    #[must_use]
    pub fn has_existing_policy(&self) -> bool {
        self.policy_id.is_some_and(|id| id != 0)
    }

    /// Returns true if the policyholder or any insured held a previous policy.
    #[must_use]
    pub fn has_prior_policy_card(&self) -> bool {
        self.policyholder.prior_policy || self.insureds.iter().any(|i| i.prior_policy)
    }
}

/// A beneficiary to include into an existing policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeneficiaryRecord {
    /// Personal data.
    pub personal: PersonalData,
}

/// Additional products selected for one insured position.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSelection {
    /// Products to add.
    #[serde(default)]
    pub products: Vec<ProductId>,
}

/// What is being quoted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuoteOperation {
    /// A new policy, optionally with extra products per insured position.
    NewPolicy {
        /// Extra products; index 0 is the policyholder.
        additional_products: Vec<ProductSelection>,
    },
    /// Inclusion of beneficiaries into an existing policy.
    Inclusion {
        /// Beneficiaries being included.
        beneficiaries: Vec<BeneficiaryRecord>,
    },
}

impl QuoteOperation {
    /// Resolves the operation from the caller's raw lists.
    ///
    /// A beneficiary list, even an empty one, means an inclusion.
    #[must_use]
    pub fn resolve(
        products: &[ProductSelection],
        beneficiaries: Option<&[BeneficiaryRecord]>,
    ) -> Self {
        match beneficiaries {
            Some(beneficiaries) => Self::Inclusion {
                beneficiaries: beneficiaries.to_vec(),
            },
            None => Self::NewPolicy {
                additional_products: products.to_vec(),
            },
        }
    }

    /// Returns true for beneficiary inclusions.
    #[inline]
    #[must_use]
    pub const fn is_inclusion(&self) -> bool {
        matches!(self, Self::Inclusion { .. })
    }

    /// Wire code of the operation.
    #[inline]
    #[must_use]
    pub const fn code(&self) -> u8 {
        match self {
            Self::NewPolicy { .. } => 1,
            Self::Inclusion { .. } => 2,
        }
    }
}
