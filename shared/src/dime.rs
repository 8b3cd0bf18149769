//! DIME life-insurance needs calculation.

use serde::{Deserialize, Serialize};

use crate::format::serialize_amount;
use crate::models::UserData;

/// Years of income the policy should replace.
pub const INCOME_REPLACEMENT_YEARS: f64 = 10.0;

/// Education allowance per dependent.
pub const EDUCATION_PER_DEPENDENT: f64 = 100_000.0;

/// Debt, Income replacement, Mortgage and Education breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimeResult {
    #[serde(serialize_with = "serialize_amount")]
    pub debt: f64,
    #[serde(serialize_with = "serialize_amount")]
    pub income_replacement: f64,
    #[serde(serialize_with = "serialize_amount")]
    pub mortgage: f64,
    #[serde(serialize_with = "serialize_amount")]
    pub education: f64,
    #[serde(serialize_with = "serialize_amount")]
    pub total_needed: f64,
    /// Shortfall against existing coverage, never negative
    #[serde(serialize_with = "serialize_amount")]
    pub gap: f64,
}

impl DimeResult {
    pub fn compute(user: &UserData) -> Self {
        let debt = user.other_debts;
        let income_replacement = user.annual_income * INCOME_REPLACEMENT_YEARS;
        let mortgage = user.mortgage_balance;
        let education = user.dependents as f64 * EDUCATION_PER_DEPENDENT;
        let total_needed = debt + income_replacement + mortgage + education;
        let gap = (total_needed - user.existing_insurance).max(0.0);

        Self {
            debt,
            income_replacement,
            mortgage,
            education,
            total_needed,
            gap,
        }
    }
}
