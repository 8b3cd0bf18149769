//! Shared data models.

use serde::de::{Deserializer, Error as DeError};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::advice::AdviceResult;
use crate::dime::DimeResult;
use crate::format::{serialize_amount, serialize_optional_amount};
use crate::{Error, Result};

/// Financial profile submitted by the caller.
///
/// Construct through [`UserData::from_candidate`] so the field rules are
/// always applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    #[validate(range(min = 0.0))]
    #[serde(serialize_with = "serialize_amount")]
    pub annual_income: f64,
    #[validate(range(min = 0.0))]
    #[serde(serialize_with = "serialize_amount")]
    pub mortgage_balance: f64,
    #[validate(range(min = 0.0))]
    #[serde(serialize_with = "serialize_amount")]
    pub other_debts: f64,
    #[serde(deserialize_with = "deserialize_count")]
    pub dependents: u64,
    #[validate(range(min = 0.0))]
    #[serde(serialize_with = "serialize_amount")]
    pub existing_insurance: f64,
    #[serde(default)]
    pub name: String,
    #[serde(
        default,
        deserialize_with = "deserialize_present_integer",
        skip_serializing_if = "Option::is_none"
    )]
    pub household_size: Option<i64>,
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub marital_status: Option<String>,
    #[validate(range(min = 0.0))]
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        serialize_with = "serialize_optional_amount",
        skip_serializing_if = "Option::is_none"
    )]
    pub education_savings: Option<f64>,
}

impl UserData {
    /// Deserialize and validate a candidate payload.
    pub fn from_candidate(candidate: serde_json::Value) -> Result<Self> {
        let user_data: UserData =
            serde_json::from_value(candidate).map_err(|e| Error::Validation(e.to_string()))?;
        user_data.validate()?;
        Ok(user_data)
    }
}

/// Successful DIME planner response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DimeResponse {
    pub user_data: UserData,
    pub results: DimeResult,
    pub advice_json: AdviceResult,
    pub advice: String,
}

/// Accepts any JSON number with no fractional part, so `2` and `2.0` both
/// count as integers.
fn whole_number<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    if value.fract() != 0.0 {
        return Err(D::Error::custom(format!("expected an integer, got {}", value)));
    }
    Ok(value)
}

fn deserialize_count<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    // 2^64, the first whole f64 that no longer fits.
    const LIMIT: f64 = 18_446_744_073_709_551_616.0;

    let value = whole_number(deserializer)?;
    if value < 0.0 || value >= LIMIT {
        return Err(D::Error::custom(format!("expected a non-negative count, got {}", value)));
    }
    Ok(value as u64)
}

/// Optional fields may be left out, but an explicit `null` is rejected.
/// Absence is handled by `#[serde(default)]`, so this only runs for values
/// that are present.
fn deserialize_present<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

fn deserialize_present_integer<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    // -2^63 is exact in f64; 2^63 is the first value past i64::MAX.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;

    let value = whole_number(deserializer)?;
    if value < -LIMIT || value >= LIMIT {
        return Err(D::Error::custom(format!("integer out of range: {}", value)));
    }
    Ok(Some(value as i64))
}
