//! # Request Builder
//!
//! Deterministic mapping from the applicant records to a [`PricingRequest`].
//!
//! [`RequestBuilder`] is the seam the quotation engine depends on;
//! [`PlanRequestBuilder`] is the default mapping against the plan catalog.

use crate::domain::entities::{
    Applicant, BeneficiaryRequest, ContractInfo, CoverRequest, Insured, OperationKind,
    PersonalData, PlanCatalog, PricingRequest, ProductRequest, ProductSelection,
    PromotionInfo, QuoteContext, QuoteOperation,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::{Frequency, ProductId, TierInfo};
use chrono::{Datelike, Local, Months, NaiveDate};
use std::fmt;

/// Relationship code of the policyholder.
pub const RELATIONSHIP_POLICYHOLDER: u8 = 1;

/// Relationship code of any other insured or beneficiary.
pub const RELATIONSHIP_OTHER: u8 = 11;

/// Sex code sent when the record leaves it unspecified.
const DEFAULT_SEX: u8 = 2;

/// Profession id sent when the record leaves it unspecified.
const DEFAULT_PROFESSION: i64 = 1;

/// Age assumed when no birth date is available.
const DEFAULT_AGE: &str = "18";

const DATE_FORMAT: &str = "%d/%m/%Y";

/// Builds the pricing request for one frequency.
pub trait RequestBuilder: Send + Sync + fmt::Debug {
    /// Builds the request.
    ///
    /// # Errors
    ///
    /// Returns a `DomainError` if the applicant records cannot be mapped
    /// (missing address, malformed tier string, invalid birth date).
    fn build(
        &self,
        applicant: &Applicant,
        operation: &QuoteOperation,
        context: &QuoteContext,
        frequency: Frequency,
    ) -> DomainResult<PricingRequest>;
}

/// Default request builder backed by the plan catalog.
#[derive(Debug, Clone)]
pub struct PlanRequestBuilder {
    tier_products: Vec<ProductId>,
    automatic_promotions: bool,
    reference_date: Option<NaiveDate>,
}

impl PlanRequestBuilder {
    /// Creates a builder keyed to the given tier products.
    #[must_use]
    pub fn new(tier_products: Vec<ProductId>, automatic_promotions: bool) -> Self {
        Self {
            tier_products,
            automatic_promotions,
            reference_date: None,
        }
    }

    /// Fixes the date ages are counted back from (defaults to today).
    #[must_use]
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    fn today(&self) -> NaiveDate {
        self.reference_date
            .unwrap_or_else(|| Local::now().date_naive())
    }

    fn promotion_info(&self, applicant: &Applicant) -> PromotionInfo {
        PromotionInfo {
            automatic: self.automatic_promotions,
            codes: applicant.promotion_code.iter().cloned().collect(),
        }
    }

    fn tier_info(&self, applicant: &Applicant) -> DomainResult<Option<TierInfo>> {
        match applicant.tier_coefficients.as_deref() {
            Some(raw) => TierInfo::parse(raw, &self.tier_products),
            None => Ok(None),
        }
    }

    fn beneficiaries(
        &self,
        applicant: &Applicant,
        operation: &QuoteOperation,
        plan: &PlanCatalog,
    ) -> DomainResult<Vec<BeneficiaryRequest>> {
        let today = self.today();
        match operation {
            QuoteOperation::Inclusion { beneficiaries } => {
                let products = products_with_covers(&applicant.policyholder.contracted_products, plan);
                beneficiaries
                    .iter()
                    .map(|b| {
                        Ok(BeneficiaryRequest {
                            name: b.personal.name.clone(),
                            birth_date: normalize_birth_date(b.personal.birth_date.as_deref(), today)?,
                            relationship: RELATIONSHIP_OTHER,
                            sex: b.personal.sex,
                            profession_id: profession_or_default(&b.personal),
                            client_id: None,
                            products: products.clone(),
                        })
                    })
                    .collect()
            }
            QuoteOperation::NewPolicy {
                additional_products,
            } => {
                let insureds = std::iter::once(&applicant.policyholder).chain(&applicant.insureds);
                insureds
                    .enumerate()
                    .map(|(position, insured)| {
                        new_policy_beneficiary(
                            insured,
                            position,
                            additional_products.get(position),
                            plan,
                            today,
                        )
                    })
                    .collect()
            }
        }
    }

    fn contract_info(
        &self,
        applicant: &Applicant,
        operation: &QuoteOperation,
        frequency: Frequency,
    ) -> DomainResult<ContractInfo> {
        let postal_code = applicant.postal_code.ok_or(DomainError::MissingAddress)?;
        let mut contract = ContractInfo {
            postal_code: format!("{postal_code:05}"),
            effective_date: applicant.effective_date,
            frequency,
            plan_id: applicant.plan_id,
            intermediary_id: applicant.intermediary_id,
            policy_id: None,
            collective_id: None,
            department_id: None,
            company_id: None,
        };

        if applicant.has_existing_policy() {
            // Individual product inclusions must not carry the policy id.
            let collective_operation = applicant.collective_id > 0
                || (applicant.department_id.is_some() && applicant.company_id.is_some());
            if operation.is_inclusion() || collective_operation {
                contract.policy_id = applicant.policy_id;
            }
            if operation.is_inclusion() {
                contract.collective_id = Some(applicant.collective_id);
            }
            contract.department_id = applicant.department_id;
            contract.company_id = applicant.company_id;
        }

        Ok(contract)
    }
}

impl RequestBuilder for PlanRequestBuilder {
    fn build(
        &self,
        applicant: &Applicant,
        operation: &QuoteOperation,
        context: &QuoteContext,
        frequency: Frequency,
    ) -> DomainResult<PricingRequest> {
        Ok(PricingRequest {
            operation: OperationKind::from(operation),
            promotions: Some(self.promotion_info(applicant)),
            tier: self.tier_info(applicant)?,
            beneficiaries: self.beneficiaries(applicant, operation, &context.plan)?,
            contract: self.contract_info(applicant, operation, frequency)?,
        })
    }
}

fn new_policy_beneficiary(
    insured: &Insured,
    position: usize,
    extra: Option<&ProductSelection>,
    plan: &PlanCatalog,
    today: NaiveDate,
) -> DomainResult<BeneficiaryRequest> {
    let mut products = products_with_covers(&insured.contracted_products, plan);
    if let Some(extra) = extra {
        products.extend(products_with_covers(&extra.products, plan));
    }

    let relationship = if position == 0 {
        RELATIONSHIP_POLICYHOLDER
    } else {
        RELATIONSHIP_OTHER
    };
    let client_id = match (position, insured.client_id) {
        (0, Some(id)) if id > 0 => Some(id),
        (0, _) => None,
        (_, id) => id,
    };

    Ok(BeneficiaryRequest {
        name: insured.personal.name.clone(),
        birth_date: normalize_birth_date(insured.personal.birth_date.as_deref(), today)?,
        relationship,
        sex: if insured.personal.sex == 0 {
            DEFAULT_SEX
        } else {
            insured.personal.sex
        },
        profession_id: DEFAULT_PROFESSION,
        client_id,
        products,
    })
}

fn profession_or_default(personal: &PersonalData) -> i64 {
    if personal.profession_id > 0 {
        personal.profession_id
    } else {
        DEFAULT_PROFESSION
    }
}

fn products_with_covers(products: &[ProductId], plan: &PlanCatalog) -> Vec<ProductRequest> {
    products
        .iter()
        .map(|&product_id| ProductRequest {
            product_id,
            covers: plan
                .product(product_id)
                .map(|p| {
                    p.priced_covers()
                        .map(|(cover_id, capital)| CoverRequest { cover_id, capital })
                        .collect()
                })
                .unwrap_or_default(),
        })
        .collect()
}

/// Normalises a birth date that may have been given as an age.
///
/// A value containing `/` is passed through. Anything else is an age in
/// years and becomes the first day of `today`'s month, that many years ago.
/// A missing value or `"//"` counts as 18 years.
///
/// # Errors
///
/// Returns `DomainError::InvalidBirthDate` if the age is not a number or
/// reaches before the calendar start.
pub fn normalize_birth_date(raw: Option<&str>, today: NaiveDate) -> DomainResult<String> {
    let raw = match raw.map(str::trim) {
        None | Some("//") | Some("") => DEFAULT_AGE,
        Some(value) if value.contains('/') => return Ok(value.to_string()),
        Some(value) => value,
    };

    let age: u32 = raw
        .parse()
        .map_err(|_| DomainError::invalid_birth_date(format!("not an age: {raw:?}")))?;
    let birth = today
        .with_day(1)
        .and_then(|first| first.checked_sub_months(Months::new(age.saturating_mul(12))))
        .ok_or_else(|| DomainError::invalid_birth_date(format!("age out of range: {age}")))?;

    Ok(birth.format(DATE_FORMAT).to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::entities::applicant::fixtures::{applicant, insured, person};
    use crate::domain::entities::{BeneficiaryRecord, PlanCover, PlanProduct};
    use rust_decimal::Decimal;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 17).unwrap()
    }

    fn builder() -> PlanRequestBuilder {
        PlanRequestBuilder::new(
            vec![ProductId::new(1), ProductId::new(5), ProductId::new(3)],
            true,
        )
        .with_reference_date(today())
    }

    fn context() -> QuoteContext {
        QuoteContext {
            plan: PlanCatalog {
                products: vec![PlanProduct {
                    product_id: ProductId::new(1),
                    commercial_name: "Health Basic".into(),
                    mandatory: true,
                    covers: vec![PlanCover {
                        cover_id: 100,
                        mandatory: true,
                        minimum_capital: Some(Decimal::new(6000, 0)),
                    }],
                }],
            },
            ..QuoteContext::default()
        }
    }

    fn new_policy(extra: Vec<ProductSelection>) -> QuoteOperation {
        QuoteOperation::NewPolicy {
            additional_products: extra,
        }
    }

    #[test]
    fn birth_dates_pass_through_or_derive_from_age() {
        assert_eq!(
            normalize_birth_date(Some("05/11/1990"), today()).unwrap(),
            "05/11/1990"
        );
        assert_eq!(normalize_birth_date(Some("30"), today()).unwrap(), "01/06/1994");
        assert_eq!(normalize_birth_date(None, today()).unwrap(), "01/06/2006");
        assert_eq!(normalize_birth_date(Some("//"), today()).unwrap(), "01/06/2006");
        assert!(normalize_birth_date(Some("thirty"), today()).is_err());
    }

    #[test]
    fn new_policy_maps_holder_and_insureds() {
        let mut applicant = applicant();
        applicant.policyholder.personal.sex = 0;
        applicant.policyholder.client_id = Some(0);
        let mut second = insured("second", &[5]);
        second.client_id = Some(44);
        applicant.insureds.push(second);
        applicant.promotion_code = Some("WELCOME".into());

        let extra = vec![
            ProductSelection {
                products: vec![ProductId::new(670)],
            },
            ProductSelection::default(),
        ];
        let request = builder()
            .build(&applicant, &new_policy(extra), &context(), Frequency::Annual)
            .unwrap();

        assert_eq!(request.operation, OperationKind::NewPolicy);
        assert_eq!(request.promotions.as_ref().unwrap().codes, vec!["WELCOME"]);
        assert_eq!(request.beneficiaries.len(), 2);

        let holder = &request.beneficiaries[0];
        assert_eq!(holder.relationship, RELATIONSHIP_POLICYHOLDER);
        assert_eq!(holder.sex, 2);
        assert_eq!(holder.client_id, None);
        assert_eq!(
            holder.products.iter().map(|p| p.product_id.get()).collect::<Vec<_>>(),
            vec![1, 670]
        );
        assert_eq!(holder.products[0].covers.len(), 1);
        assert!(holder.products[1].covers.is_empty());

        let second = &request.beneficiaries[1];
        assert_eq!(second.relationship, RELATIONSHIP_OTHER);
        assert_eq!(second.client_id, Some(44));
        assert_eq!(second.profession_id, 1);
        assert_eq!(request.contract.frequency, Frequency::Annual);
        assert_eq!(request.contract.policy_id, None);
    }

    #[test]
    fn inclusion_uses_holder_products_and_policy_ids() {
        let mut applicant = applicant();
        applicant.policy_id = Some(5500);
        applicant.collective_id = 12;
        let mut child = person("child");
        child.profession_id = 9;
        let operation = QuoteOperation::Inclusion {
            beneficiaries: vec![BeneficiaryRecord { personal: child }],
        };

        let request = builder()
            .build(&applicant, &operation, &context(), Frequency::Quarterly)
            .unwrap();

        assert_eq!(request.operation, OperationKind::BeneficiaryInclusion);
        assert_eq!(request.beneficiaries.len(), 1);
        assert_eq!(request.beneficiaries[0].relationship, RELATIONSHIP_OTHER);
        assert_eq!(request.beneficiaries[0].profession_id, 9);
        assert_eq!(request.beneficiaries[0].products[0].product_id, ProductId::new(1));
        assert_eq!(request.contract.policy_id, Some(5500));
        assert_eq!(request.contract.collective_id, Some(12));
    }

    #[test]
    fn individual_product_inclusion_omits_policy_id() {
        let mut applicant = applicant();
        applicant.policy_id = Some(5500);
        applicant.department_id = Some(3);

        let request = builder()
            .build(&applicant, &new_policy(vec![]), &context(), Frequency::Monthly)
            .unwrap();

        assert_eq!(request.contract.policy_id, None);
        assert_eq!(request.contract.collective_id, None);
        assert_eq!(request.contract.department_id, Some(3));
    }

    #[test]
    fn postal_code_is_zero_padded() {
        let mut applicant = applicant();
        applicant.postal_code = Some(8001);
        let request = builder()
            .build(&applicant, &new_policy(vec![]), &context(), Frequency::Monthly)
            .unwrap();
        assert_eq!(request.contract.postal_code, "08001");
    }

    #[test]
    fn missing_address_and_bad_tier_are_errors() {
        let mut applicant = applicant();
        applicant.postal_code = None;
        let err = builder()
            .build(&applicant, &new_policy(vec![]), &context(), Frequency::Monthly)
            .unwrap_err();
        assert_eq!(err, DomainError::MissingAddress);

        let mut applicant = self::applicant();
        applicant.tier_coefficients = Some("1#2".into());
        let err = builder()
            .build(&applicant, &new_policy(vec![]), &context(), Frequency::Monthly)
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidTier(_)));
    }

    #[test]
    fn tier_info_is_attached() {
        let mut applicant = applicant();
        applicant.tier_coefficients = Some("0#1.1#1.2#1.3#2".into());
        let request = builder()
            .build(&applicant, &new_policy(vec![]), &context(), Frequency::Monthly)
            .unwrap();
        let tier = request.tier.unwrap();
        assert_eq!(tier.global_tier, 2);
        assert_eq!(tier.product_tiers[1].product_id, ProductId::new(5));
    }
}
