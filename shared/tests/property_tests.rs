/// Property-based tests using proptest
/// Invariants of the DIME calculation and input validation that must hold for all profiles
use proptest::prelude::*;
use serde_json::json;
use shared::{DimeResult, Error, UserData};

const REQUIRED_AMOUNTS: [&str; 4] = ["annualIncome", "mortgageBalance", "otherDebts", "existingInsurance"];

fn amount() -> impl Strategy<Value = f64> {
    0.0f64..1e12
}

fn profile(income: f64, mortgage: f64, debts: f64, dependents: u32, insurance: f64) -> serde_json::Value {
    json!({
        "annualIncome": income,
        "mortgageBalance": mortgage,
        "otherDebts": debts,
        "dependents": dependents,
        "existingInsurance": insurance
    })
}

// Property: total is the sum of the four components and the gap is floored at zero
proptest! {
    #[test]
    fn total_is_sum_and_gap_never_negative(
        income in amount(),
        mortgage in amount(),
        debts in amount(),
        dependents in any::<u32>(),
        insurance in amount()
    ) {
        let user = UserData::from_candidate(profile(income, mortgage, debts, dependents, insurance)).unwrap();
        let r = DimeResult::compute(&user);

        prop_assert_eq!(r.debt, debts);
        prop_assert_eq!(r.income_replacement, income * 10.0);
        prop_assert_eq!(r.mortgage, mortgage);
        prop_assert_eq!(r.education, f64::from(dependents) * 100_000.0);
        prop_assert_eq!(r.total_needed, r.debt + r.income_replacement + r.mortgage + r.education);
        prop_assert!(r.gap >= 0.0);
        prop_assert_eq!(r.gap, (r.total_needed - insurance).max(0.0));
    }

    #[test]
    fn enveloped_payload_gives_same_result(
        income in amount(),
        mortgage in amount(),
        debts in amount(),
        dependents in 0u32..20,
        insurance in amount()
    ) {
        let bare = profile(income, mortgage, debts, dependents, insurance);
        let wrapped = json!({ "userData": bare.clone() });

        let from_bare = UserData::from_candidate(shared::extract_candidate(bare)).unwrap();
        let from_wrapped = UserData::from_candidate(shared::extract_candidate(wrapped)).unwrap();

        prop_assert_eq!(DimeResult::compute(&from_bare), DimeResult::compute(&from_wrapped));
    }
}

// Property: any negative required field is a validation error
proptest! {
    #[test]
    fn negative_required_amount_is_rejected(
        field in 0usize..REQUIRED_AMOUNTS.len(),
        negative in -1e12f64..-1e-9
    ) {
        let mut payload = profile(80_000.0, 200_000.0, 15_000.0, 2, 100_000.0);
        payload[REQUIRED_AMOUNTS[field]] = json!(negative);

        prop_assert!(matches!(UserData::from_candidate(payload), Err(Error::Validation(_))));
    }

    #[test]
    fn negative_dependents_is_rejected(dependents in i64::MIN..0) {
        let mut payload = profile(80_000.0, 200_000.0, 15_000.0, 2, 100_000.0);
        payload["dependents"] = json!(dependents);

        prop_assert!(matches!(UserData::from_candidate(payload), Err(Error::Validation(_))));
    }
}
