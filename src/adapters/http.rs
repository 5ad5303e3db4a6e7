use crate::core::interpret::interpret_body;
use crate::core::payload::{build_payload, Payload};
use crate::domain::model::PropertyDraft;
use crate::domain::ports::{ConfigProvider, PriceEstimator};
use crate::utils::error::{Result, WizardError};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000/predict";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

/// 呼叫外部預測服務 (`POST /predict`)
#[derive(Debug, Clone)]
pub struct HttpPriceEstimator {
    endpoint: String,
    client: Client,
}

impl HttpPriceEstimator {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            endpoint: endpoint.into(),
            client,
        })
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        Self::new(
            config.api_endpoint(),
            Duration::from_secs(config.timeout_seconds()),
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// 送出已組好的 payload；只有 200 才解讀內容
    pub async fn send(&self, payload: &Payload) -> Result<f64> {
        tracing::debug!("Making prediction request to: {}", self.endpoint);
        let response = self.client.post(&self.endpoint).json(payload).send().await?;

        let status = response.status();
        tracing::debug!("Prediction response status: {}", status);
        let body = response.text().await?;

        if status != StatusCode::OK {
            tracing::warn!("Prediction service returned {}: {}", status, body);
            return Err(WizardError::BadStatus {
                status: status.as_u16(),
                body,
            });
        }

        interpret_body(&body)
    }
}

#[async_trait]
impl PriceEstimator for HttpPriceEstimator {
    async fn predict(&self, draft: &PropertyDraft) -> Result<f64> {
        let payload = build_payload(draft)?;
        let value = self.send(&payload).await;

        match &value {
            Ok(v) => tracing::info!("✅ Prediction received: {}", v),
            Err(e) => tracing::error!(
                "❌ Prediction failed: {} (Category: {:?})",
                e,
                e.category()
            ),
        }

        value
    }
}
