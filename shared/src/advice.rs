//! Structured advisory copy returned by the AI model.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use validator::Validate;

use crate::{Error, Result};

/// Minimum entries in each advice list.
pub const MIN_ITEMS: u64 = 3;
/// Maximum entries in each advice list.
pub const MAX_ITEMS: u64 = 8;

/// Advice as produced by the model, after validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AdviceResult {
    pub what_numbers_mean: String,
    #[validate(length(min = 3, max = 8))]
    pub priorities: Vec<String>,
    #[validate(length(min = 3, max = 8))]
    pub coverage_strategy: Vec<String>,
    pub disclaimer: String,
}

impl AdviceResult {
    /// Plain-text rendering with four labeled sections.
    pub fn render(&self) -> String {
        [
            format!("What the numbers mean:\n{}", self.what_numbers_mean),
            format!("Priorities:\n- {}", self.priorities.join("\n- ")),
            format!("Coverage strategy ideas:\n- {}", self.coverage_strategy.join("\n- ")),
            format!("Disclaimer:\n{}", self.disclaimer),
        ]
        .join("\n\n")
    }
}

/// Parse and validate raw model output.
///
/// Every failure is a [`Error::Generation`]; there is no attempt to repair
/// partial output.
pub fn parse_advice(raw: &str) -> Result<AdviceResult> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(Error::Generation("model returned no text".to_string()));
    }

    let advice: AdviceResult = serde_json::from_str(raw)
        .map_err(|e| Error::Generation(format!("model output is not valid advice JSON: {}", e)))?;

    advice
        .validate()
        .map_err(|e| Error::Generation(format!("model output failed validation: {}", e)))?;

    Ok(advice)
}

/// JSON Schema sent to the model as the required response shape.
pub fn response_schema() -> Value {
    let string_list = json!({
        "type": "array",
        "items": { "type": "string" },
        "minItems": MIN_ITEMS,
        "maxItems": MAX_ITEMS
    });

    json!({
        "type": "object",
        "properties": {
            "whatNumbersMean": { "type": "string" },
            "priorities": string_list,
            "coverageStrategy": string_list,
            "disclaimer": { "type": "string" }
        },
        "required": ["whatNumbersMean", "priorities", "coverageStrategy", "disclaimer"],
        "additionalProperties": false
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn advice_json(priorities: usize, strategies: usize) -> Value {
        json!({
            "whatNumbersMean": "You need about $1.2M.",
            "priorities": (1..=priorities).map(|i| format!("priority {}", i)).collect::<Vec<_>>(),
            "coverageStrategy": (1..=strategies).map(|i| format!("idea {}", i)).collect::<Vec<_>>(),
            "disclaimer": "Educational only."
        })
    }

    #[test]
    fn test_parse_valid_with_whitespace() {
        let raw = format!("\n  {}  \n", advice_json(3, 8));
        let advice = parse_advice(&raw).unwrap();
        assert_eq!(advice.priorities.len(), 3);
        assert_eq!(advice.coverage_strategy.len(), 8);
        assert_eq!(advice.disclaimer, "Educational only.");
    }

    #[test]
    fn test_parse_rejects_empty_and_non_json() {
        assert!(matches!(parse_advice("   "), Err(Error::Generation(_))));
        assert!(matches!(parse_advice("Here is your advice!"), Err(Error::Generation(_))));
    }

    #[test]
    fn test_parse_rejects_missing_field() {
        let mut value = advice_json(3, 3);
        value.as_object_mut().unwrap().remove("disclaimer");
        assert!(matches!(parse_advice(&value.to_string()), Err(Error::Generation(_))));
    }

    #[test]
    fn test_parse_rejects_list_bounds() {
        for (p, c) in [(2, 3), (3, 2), (9, 3), (3, 9), (0, 0)] {
            let raw = advice_json(p, c).to_string();
            assert!(
                matches!(parse_advice(&raw), Err(Error::Generation(_))),
                "priorities={} strategies={} should fail",
                p,
                c
            );
        }
    }

    #[test]
    fn test_parse_rejects_wrong_item_type() {
        let mut value = advice_json(3, 3);
        value["priorities"] = json!([1, 2, 3]);
        assert!(parse_advice(&value.to_string()).is_err());
    }

    #[test]
    fn test_render_sections() {
        let advice = AdviceResult {
            what_numbers_mean: "Meaning.".to_string(),
            priorities: vec!["a".into(), "b".into(), "c".into()],
            coverage_strategy: vec!["x".into(), "y".into(), "z".into()],
            disclaimer: "Not advice.".to_string(),
        };

        assert_eq!(
            advice.render(),
            "What the numbers mean:\nMeaning.\n\n\
             Priorities:\n- a\n- b\n- c\n\n\
             Coverage strategy ideas:\n- x\n- y\n- z\n\n\
             Disclaimer:\nNot advice."
        );
    }

    #[test]
    fn test_schema_bounds_match_validation() {
        let schema = response_schema();
        assert_eq!(schema["properties"]["priorities"]["minItems"], json!(3));
        assert_eq!(schema["properties"]["coverageStrategy"]["maxItems"], json!(8));
        assert_eq!(schema["required"].as_array().unwrap().len(), 4);
    }
}
