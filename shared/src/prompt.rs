//! Prompt construction for the advisory model.

use crate::dime::DimeResult;
use crate::format::format_amount;
use crate::models::UserData;

/// Build the instruction sent to the model for one profile.
pub fn build_prompt(user: &UserData, results: &DimeResult) -> String {
    format!(
        "You are an insurance and financial education assistant for a DIME life insurance planner.\n\
         Return ONLY valid JSON matching the provided schema.\n\
         \n\
         Rules:\n\
         - Educational only; this is not financial advice.\n\
         - Never ask for sensitive data (no SSN, date of birth, home address or medical information).\n\
         - Use plain language. Be practical and concise.\n\
         - Do not name specific insurers, and never recommend a specific product as \"best\".\n\
         \n\
         User profile:\n\
         - Income: ${income}\n\
         - Mortgage: ${mortgage}\n\
         - Other debts: ${debts}\n\
         - Dependents: {dependents}\n\
         - Existing life insurance: ${insurance}\n\
         \n\
         DIME results:\n\
         - Total needed: ${total}\n\
         - Gap: ${gap}",
        income = format_amount(user.annual_income),
        mortgage = format_amount(user.mortgage_balance),
        debts = format_amount(user.other_debts),
        dependents = user.dependents,
        insurance = format_amount(user.existing_insurance),
        total = format_amount(results.total_needed),
        gap = format_amount(results.gap),
    )
}
