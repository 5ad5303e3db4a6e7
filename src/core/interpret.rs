use crate::utils::error::{Result, WizardError};
use serde_json::Value;

/// 解讀預測回應的策略，依 [`InterpretStrategy::ORDER`] 順序嘗試
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterpretStrategy {
    /// `{"prediction": 123456.78}`
    PredictionKey,
    /// 只有一個欄位的物件，例如 `{"price": 300000}`
    SingleEntry,
    /// `[123456.78]`
    FirstElement,
}

impl InterpretStrategy {
    pub const ORDER: [InterpretStrategy; 3] = [
        InterpretStrategy::PredictionKey,
        InterpretStrategy::SingleEntry,
        InterpretStrategy::FirstElement,
    ];

    pub fn name(self) -> &'static str {
        match self {
            InterpretStrategy::PredictionKey => "prediction-key",
            InterpretStrategy::SingleEntry => "single-entry",
            InterpretStrategy::FirstElement => "first-element",
        }
    }

    pub fn extract(self, body: &Value) -> Option<f64> {
        match (self, body) {
            (InterpretStrategy::PredictionKey, Value::Object(map)) => {
                map.get("prediction").and_then(as_number)
            }
            (InterpretStrategy::SingleEntry, Value::Object(map)) if map.len() == 1 => {
                map.values().next().and_then(as_number)
            }
            (InterpretStrategy::FirstElement, Value::Array(items)) => {
                items.first().and_then(as_number)
            }
            _ => None,
        }
    }
}

/// 數字或可解析成數字的字串
pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

pub fn interpret(body: &Value) -> Option<(InterpretStrategy, f64)> {
    InterpretStrategy::ORDER
        .iter()
        .find_map(|strategy| strategy.extract(body).map(|value| (*strategy, value)))
}

/// 解析 200 回應的原始內容並取出估價
pub fn interpret_body(raw: &str) -> Result<f64> {
    let body: Value =
        serde_json::from_str(raw).map_err(|source| WizardError::MalformedResponse {
            source,
            body: raw.to_string(),
        })?;

    match interpret(&body) {
        Some((strategy, value)) => {
            tracing::debug!("Prediction extracted with strategy '{}'", strategy.name());
            Ok(value)
        }
        None => Err(WizardError::UnexpectedFormat {
            body: body.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_prediction_key() {
        let body = json!({"prediction": 250000});
        assert_eq!(
            InterpretStrategy::PredictionKey.extract(&body),
            Some(250000.0)
        );
        assert_eq!(
            interpret(&body),
            Some((InterpretStrategy::PredictionKey, 250000.0))
        );
    }

    #[test]
    fn test_prediction_key_wins_over_other_fields() {
        let body = json!({"model": "xgb", "prediction": 123456.78});
        assert_eq!(InterpretStrategy::SingleEntry.extract(&body), None);
        assert_eq!(
            interpret(&body),
            Some((InterpretStrategy::PredictionKey, 123456.78))
        );
    }

    #[test]
    fn test_single_entry_fallback() {
        let body = json!({"price": 300000});
        assert_eq!(InterpretStrategy::PredictionKey.extract(&body), None);
        assert_eq!(
            interpret(&body),
            Some((InterpretStrategy::SingleEntry, 300000.0))
        );
    }

    #[test]
    fn test_first_element_of_sequence() {
        assert_eq!(
            interpret(&json!([199999.5, 1])),
            Some((InterpretStrategy::FirstElement, 199999.5))
        );
        assert_eq!(
            interpret(&json!(["210000"])),
            Some((InterpretStrategy::FirstElement, 210000.0))
        );
        assert_eq!(InterpretStrategy::FirstElement.extract(&json!({"a": 1})), None);
    }

    #[test]
    fn test_nothing_numeric() {
        assert_eq!(interpret(&json!({"a": 1, "b": 2})), None);
        assert_eq!(interpret(&json!({"prediction": null})), None);
        assert_eq!(interpret(&json!([])), None);
        assert_eq!(interpret(&json!(["abc"])), None);
        assert_eq!(interpret(&json!(42)), None);
    }

    #[test]
    fn test_interpret_body_errors() {
        let err = interpret_body(r#"{"a": 1, "b": 2}"#).unwrap_err();
        match err {
            WizardError::UnexpectedFormat { body } => assert!(body.contains("\"a\"")),
            other => panic!("unexpected error: {:?}", other),
        }

        let err = interpret_body("<html>oops</html>").unwrap_err();
        assert!(matches!(err, WizardError::MalformedResponse { .. }));
    }
}
