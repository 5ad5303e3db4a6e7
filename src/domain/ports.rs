use crate::domain::model::PropertyDraft;
use crate::utils::error::Result;
use async_trait::async_trait;

/// 郵遞區號查地名。查不到或查詢失敗一律回傳 `None`，不往外拋錯。
pub trait LocalityResolver: Send + Sync {
    fn resolve(&self, postal_code: u32) -> Option<String>;
}

#[async_trait]
pub trait PriceEstimator: Send + Sync {
    async fn predict(&self, draft: &PropertyDraft) -> Result<f64>;
}

pub trait ConfigProvider: Send + Sync {
    fn api_endpoint(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
    fn geonames_path(&self) -> Option<&str>;
    fn geonames_url(&self) -> &str;
    fn cache_dir(&self) -> Option<&str>;
    fn country_code(&self) -> &str;
}
