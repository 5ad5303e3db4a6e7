use thiserror::Error;

#[derive(Error, Debug)]
pub enum WizardError {
    #[error("Invalid postal code: {postal_code}")]
    InvalidPostalCode { postal_code: u32 },

    #[error("Error while calling the API: {0}")]
    NetworkFailure(#[from] reqwest::Error),

    #[error("API error {status}: {body}")]
    BadStatus { status: u16, body: String },

    #[error("Unexpected response format from API: {body}")]
    UnexpectedFormat { body: String },

    #[error("Malformed response from API ({source}): {body}")]
    MalformedResponse {
        #[source]
        source: serde_json::Error,
        body: String,
    },

    #[error("Cannot go {action} from the {page} page")]
    InvalidTransition { page: String, action: String },

    #[error("Subtype '{subtype}' is not available for a {property_type}")]
    InvalidSubtype {
        subtype: String,
        property_type: String,
    },

    #[error("Invalid value for {field}: {reason}")]
    InvalidFieldValue { field: String, reason: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("GeoNames data error: {0}")]
    GeonamesError(#[from] csv::Error),

    #[error("GeoNames archive error: {0}")]
    ArchiveError(#[from] zip::result::ZipError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// 使用者輸入，可在畫面上直接修正
    Input,
    /// 連線或逾時
    Network,
    /// 預測服務回應了，但內容不可用
    Api,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl WizardError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            WizardError::InvalidPostalCode { .. }
            | WizardError::InvalidTransition { .. }
            | WizardError::InvalidSubtype { .. }
            | WizardError::InvalidFieldValue { .. } => ErrorCategory::Input,
            WizardError::NetworkFailure(_) => ErrorCategory::Network,
            WizardError::BadStatus { .. }
            | WizardError::UnexpectedFormat { .. }
            | WizardError::MalformedResponse { .. } => ErrorCategory::Api,
            WizardError::ConfigError { .. } | WizardError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            WizardError::GeonamesError(_)
            | WizardError::ArchiveError(_)
            | WizardError::IoError(_)
            | WizardError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Low,
            ErrorCategory::Network | ErrorCategory::Api => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 預測失敗只影響當下這次動作，使用者可以再按一次
    pub fn is_retryable(&self) -> bool {
        matches!(self.category(), ErrorCategory::Network | ErrorCategory::Api)
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            WizardError::InvalidPostalCode { .. } => {
                "Invalid postal code! Please try again.".to_string()
            }
            WizardError::NetworkFailure(e) if e.is_timeout() => {
                format!("Error while calling the API: the request timed out ({})", e)
            }
            WizardError::NetworkFailure(e) => format!("Error while calling the API: {}", e),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            WizardError::InvalidPostalCode { .. } => {
                "Enter a Belgian postal code such as 1000 (Bruxelles) or 9000 (Gent)"
            }
            WizardError::NetworkFailure(_) => {
                "Check that the prediction service is running, then press 'Get prediction' again"
            }
            WizardError::BadStatus { .. } => {
                "The prediction service rejected the request; check its logs and try again"
            }
            WizardError::UnexpectedFormat { .. } | WizardError::MalformedResponse { .. } => {
                "The prediction service answered with an unknown format; check the endpoint URL"
            }
            WizardError::InvalidTransition { .. } => "Use one of the actions listed on the screen",
            WizardError::InvalidSubtype { .. } => "Pick one of the subtypes listed for this type",
            WizardError::InvalidFieldValue { .. } => "Enter a value within the allowed range",
            WizardError::ConfigError { .. } | WizardError::InvalidConfigValueError { .. } => {
                "Fix the configuration file or command-line flags and start again"
            }
            WizardError::GeonamesError(_) => {
                "Make sure the GeoNames file is a tab separated postal code dump"
            }
            WizardError::ArchiveError(_) => {
                "Download the GeoNames archive by hand and pass the unpacked file with --geonames-path"
            }
            WizardError::IoError(_) | WizardError::SerializationError(_) => {
                "Check file permissions and available disk space"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, WizardError>;
