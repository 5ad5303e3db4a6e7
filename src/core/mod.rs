pub mod interpret;
pub mod payload;
pub mod wizard;

pub use crate::domain::model::{PredictionRecord, PropertyDraft};
pub use crate::domain::ports::{ConfigProvider, LocalityResolver, PriceEstimator};
pub use crate::utils::error::Result;
pub use wizard::{DraftEdit, Navigation, Page, Session};
