use crate::domain::model::PropertyDraft;
use crate::utils::error::{Result, WizardError};
use serde_json::{Map, Value};

pub type Payload = Map<String, Value>;

/// 以預設值為底，覆蓋 `fields` 中每個有值的欄位；`null` 視為缺值
pub fn overlay(mut defaults: Payload, fields: &Payload) -> Payload {
    for (key, value) in fields {
        if value.is_null() {
            continue;
        }
        defaults.insert(key.clone(), value.clone());
    }
    defaults
}

pub fn default_payload() -> Result<Payload> {
    to_payload(&PropertyDraft::default())
}

/// 預測請求的 body：預設欄位 + 草稿欄位（草稿優先）
pub fn build_payload(draft: &PropertyDraft) -> Result<Payload> {
    let fields = to_payload(draft)?;
    Ok(overlay(default_payload()?, &fields))
}

fn to_payload(draft: &PropertyDraft) -> Result<Payload> {
    match serde_json::to_value(draft)? {
        Value::Object(map) => Ok(map),
        other => Err(WizardError::ConfigError {
            message: format!("property draft serialized to a non-object value: {}", other),
        }),
    }
}
