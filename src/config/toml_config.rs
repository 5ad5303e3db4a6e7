use crate::utils::error::{Result, WizardError};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub prediction: Option<PredictionConfig>,
    pub geocoding: Option<GeocodingConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PredictionConfig {
    pub endpoint: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeocodingConfig {
    pub geonames_path: Option<String>,
    pub download_url: Option<String>,
    pub cache_dir: Option<String>,
    pub country_code: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(WizardError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| WizardError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${PREDICT_URL})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| WizardError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn endpoint(&self) -> Option<&str> {
        self.prediction.as_ref()?.endpoint.as_deref()
    }

    pub fn timeout_seconds(&self) -> Option<u64> {
        self.prediction.as_ref()?.timeout_seconds
    }

    pub fn geonames_path(&self) -> Option<&str> {
        self.geocoding.as_ref()?.geonames_path.as_deref()
    }

    pub fn download_url(&self) -> Option<&str> {
        self.geocoding.as_ref()?.download_url.as_deref()
    }

    pub fn cache_dir(&self) -> Option<&str> {
        self.geocoding.as_ref()?.cache_dir.as_deref()
    }

    pub fn country_code(&self) -> Option<&str> {
        self.geocoding.as_ref()?.country_code.as_deref()
    }
}
