pub mod toml_config;

use crate::adapters::geonames::DEFAULT_DOWNLOAD_URL;
use crate::adapters::http::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECONDS};
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_country_code, validate_path, validate_positive_number, validate_url, Validate,
};
#[cfg(feature = "cli")]
use clap::Parser;
use serde::{Deserialize, Serialize};
use toml_config::TomlConfig;

/// 合併後的執行設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub api_endpoint: String,
    pub timeout_seconds: u64,
    pub geonames_path: Option<String>,
    pub geonames_url: String,
    pub cache_dir: Option<String>,
    pub country_code: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            geonames_path: None,
            geonames_url: DEFAULT_DOWNLOAD_URL.to_string(),
            cache_dir: None,
            country_code: "BE".to_string(),
        }
    }
}

impl AppConfig {
    /// 檔案中有設定的值覆蓋預設值
    pub fn from_toml(file: &TomlConfig) -> Self {
        let defaults = Self::default();
        Self {
            api_endpoint: file
                .endpoint()
                .map(str::to_string)
                .unwrap_or(defaults.api_endpoint),
            timeout_seconds: file.timeout_seconds().unwrap_or(defaults.timeout_seconds),
            geonames_path: file.geonames_path().map(str::to_string),
            geonames_url: file
                .download_url()
                .map(str::to_string)
                .unwrap_or(defaults.geonames_url),
            cache_dir: file.cache_dir().map(str::to_string),
            country_code: file
                .country_code()
                .map(str::to_ascii_uppercase)
                .unwrap_or(defaults.country_code),
        }
    }
}

impl ConfigProvider for AppConfig {
    fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }

    fn geonames_path(&self) -> Option<&str> {
        self.geonames_path.as_deref()
    }

    fn geonames_url(&self) -> &str {
        &self.geonames_url
    }

    fn cache_dir(&self) -> Option<&str> {
        self.cache_dir.as_deref()
    }

    fn country_code(&self) -> &str {
        &self.country_code
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_url("prediction.endpoint", &self.api_endpoint)?;
        validate_positive_number("prediction.timeout_seconds", self.timeout_seconds, 1)?;
        if let Some(path) = &self.geonames_path {
            validate_path("geocoding.geonames_path", path)?;
        }
        validate_url("geocoding.download_url", &self.geonames_url)?;
        if let Some(dir) = &self.cache_dir {
            validate_path("geocoding.cache_dir", dir)?;
        }
        validate_country_code("geocoding.country_code", &self.country_code)?;
        Ok(())
    }
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Serialize, Deserialize, Parser)]
#[command(name = "immo-wizard")]
#[command(about = "Step-by-step property price estimation for Belgian real estate")]
pub struct CliConfig {
    /// Prediction endpoint (default http://127.0.0.1:8000/predict)
    #[arg(long)]
    pub api_endpoint: Option<String>,

    /// Prediction request timeout in seconds (default 10)
    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    /// Local GeoNames postal code dump; skips the download
    #[arg(long)]
    pub geonames_path: Option<String>,

    /// Base URL of the GeoNames postal code archives (<url>/<COUNTRY>.zip)
    #[arg(long)]
    pub geonames_url: Option<String>,

    /// Directory where the downloaded GeoNames dump is cached
    #[arg(long)]
    pub cache_dir: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 載入設定檔（若有），再套用命令列覆蓋設定
    pub fn resolve(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path);
                AppConfig::from_toml(&TomlConfig::from_file(path)?)
            }
            None => AppConfig::default(),
        };

        if let Some(endpoint) = &self.api_endpoint {
            config.api_endpoint = endpoint.clone();
        }
        if let Some(timeout) = self.timeout_seconds {
            config.timeout_seconds = timeout;
        }
        if let Some(path) = &self.geonames_path {
            config.geonames_path = Some(path.clone());
        }
        if let Some(url) = &self.geonames_url {
            config.geonames_url = url.clone();
        }
        if let Some(dir) = &self.cache_dir {
            config.cache_dir = Some(dir.clone());
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::WizardError;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert_eq!(config.api_endpoint(), "http://127.0.0.1:8000/predict");
        assert_eq!(config.timeout_seconds(), 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_toml_keeps_defaults_for_missing_values() {
        let file = TomlConfig::from_toml_str("[geocoding]\ncountry_code = \"be\"\n").unwrap();
        let config = AppConfig::from_toml(&file);
        assert_eq!(config.api_endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.country_code, "BE");
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let config = AppConfig {
            timeout_seconds: 0,
            ..AppConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(WizardError::InvalidConfigValueError { .. })
        ));
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_cli_overrides_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[prediction]\nendpoint = \"http://file.local/predict\"\ntimeout_seconds = 7"
        )
        .unwrap();

        let cli = CliConfig::parse_from([
            "immo-wizard",
            "--config",
            file.path().to_str().unwrap(),
            "--api-endpoint",
            "http://cli.local/predict",
        ]);
        let config = cli.resolve().unwrap();

        assert_eq!(config.api_endpoint, "http://cli.local/predict");
        assert_eq!(config.timeout_seconds, 7);
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_cli_sets_geonames_download() {
        let cli = CliConfig::parse_from([
            "immo-wizard",
            "--geonames-url",
            "http://mirror.local/zip",
            "--cache-dir",
            "/tmp/immo-cache",
        ]);
        let config = cli.resolve().unwrap();

        assert_eq!(config.geonames_url(), "http://mirror.local/zip");
        assert_eq!(config.cache_dir(), Some("/tmp/immo-cache"));
        assert_eq!(AppConfig::default().geonames_url, DEFAULT_DOWNLOAD_URL);
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_cli_rejects_bad_endpoint() {
        let cli = CliConfig::parse_from(["immo-wizard", "--api-endpoint", "not a url"]);
        assert!(cli.resolve().is_err());
    }
}
