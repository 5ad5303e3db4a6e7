pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::AppConfig;

pub use adapters::{GeoNamesResolver, HttpPriceEstimator};
pub use app::TerminalWizard;
pub use crate::core::{DraftEdit, Navigation, Page, Session};
pub use domain::model::PropertyDraft;
pub use utils::error::{Result, WizardError};
