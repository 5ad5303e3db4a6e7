use crate::utils::error::{Result, WizardError};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(WizardError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(WizardError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(WizardError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(WizardError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(WizardError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(WizardError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_country_code(field_name: &str, value: &str) -> Result<()> {
    if value.len() != 2 || !value.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(WizardError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Expected a two-letter ISO country code".to_string(),
        });
    }
    Ok(())
}

/// 表單欄位的範圍檢查，錯誤是給使用者看的而不是設定錯誤
pub fn validate_field_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(WizardError::InvalidFieldValue {
            field: field_name.to_string(),
            reason: format!("{} is not between {} and {}", value, min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("prediction.endpoint", "https://example.com/predict").is_ok());
        assert!(validate_url("prediction.endpoint", "http://127.0.0.1:8000/predict").is_ok());
        assert!(validate_url("prediction.endpoint", "").is_err());
        assert!(validate_url("prediction.endpoint", "invalid-url").is_err());
        assert!(validate_url("prediction.endpoint", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("timeout_seconds", 10, 1).is_ok());
        assert!(validate_positive_number("timeout_seconds", 0, 1).is_err());
    }

    #[test]
    fn test_validate_country_code() {
        assert!(validate_country_code("geocoding.country_code", "BE").is_ok());
        assert!(validate_country_code("geocoding.country_code", "BEL").is_err());
        assert!(validate_country_code("geocoding.country_code", "1B").is_err());
    }

    #[test]
    fn test_validate_field_range() {
        assert!(validate_field_range("number_of_facades", 4u8, 1, 4).is_ok());
        let err = validate_field_range("number_of_facades", 5u8, 1, 4).unwrap_err();
        assert!(matches!(err, WizardError::InvalidFieldValue { .. }));
    }
}
