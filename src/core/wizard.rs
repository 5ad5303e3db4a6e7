use crate::domain::model::{
    Amenity, BuildingState, PredictionRecord, PropertyDraft, PropertySubtype, PropertyType,
};
use crate::domain::ports::{LocalityResolver, PriceEstimator};
use crate::utils::error::{Result, WizardError};
use crate::utils::validation::validate_field_range;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Welcome,
    PostalCode,
    Basics,
    Extras,
    Prediction,
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Page::Welcome => "Welcome",
            Page::PostalCode => "Step 1",
            Page::Basics => "Step 2",
            Page::Extras => "Step 3",
            Page::Prediction => "Prediction",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Back,
    Next,
    NewPrediction,
}

impl fmt::Display for Navigation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Navigation::Back => write!(f, "back"),
            Navigation::Next => write!(f, "next"),
            Navigation::NewPrediction => write!(f, "to a new prediction"),
        }
    }
}

/// 轉換表。欄位是否有效不影響前進。
pub fn next_page(page: Page, nav: Navigation) -> Option<Page> {
    match (page, nav) {
        (Page::Welcome, Navigation::Next) => Some(Page::PostalCode),
        (Page::PostalCode, Navigation::Back) => Some(Page::Welcome),
        (Page::PostalCode, Navigation::Next) => Some(Page::Basics),
        (Page::Basics, Navigation::Back) => Some(Page::PostalCode),
        (Page::Basics, Navigation::Next) => Some(Page::Extras),
        (Page::Extras, Navigation::Back) => Some(Page::Basics),
        (Page::Extras, Navigation::Next) => Some(Page::Prediction),
        (Page::Prediction, Navigation::NewPrediction) => Some(Page::Welcome),
        _ => None,
    }
}

/// 單一欄位的編輯，每個編輯只屬於一個畫面
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DraftEdit {
    PostalCode(u32),
    PropertyType(PropertyType),
    Subtype(PropertySubtype),
    BuildingState(BuildingState),
    Facades(u8),
    LivingArea(u32),
    Rooms(u32),
    Amenity(Amenity, bool),
    GardenSurface(u32),
    TerraceSurface(u32),
}

impl DraftEdit {
    pub fn page(&self) -> Page {
        match self {
            DraftEdit::PostalCode(_) => Page::PostalCode,
            DraftEdit::PropertyType(_)
            | DraftEdit::Subtype(_)
            | DraftEdit::BuildingState(_)
            | DraftEdit::Facades(_)
            | DraftEdit::LivingArea(_)
            | DraftEdit::Rooms(_) => Page::Basics,
            DraftEdit::Amenity(..) | DraftEdit::GardenSurface(_) | DraftEdit::TerraceSurface(_) => {
                Page::Extras
            }
        }
    }

    fn field(&self) -> &'static str {
        match self {
            DraftEdit::PostalCode(_) => "postal_code",
            DraftEdit::PropertyType(_) => "type_of_property",
            DraftEdit::Subtype(_) => "subtype_of_property",
            DraftEdit::BuildingState(_) => "state_of_building",
            DraftEdit::Facades(_) => "number_of_facades",
            DraftEdit::LivingArea(_) => "living_area",
            DraftEdit::Rooms(_) => "number_of_rooms",
            DraftEdit::Amenity(amenity, _) => amenity.field_name(),
            DraftEdit::GardenSurface(_) => "garden_surface",
            DraftEdit::TerraceSurface(_) => "terrace_surface",
        }
    }
}

/// 第一步郵遞區號的提示訊息，只是建議，不會擋住下一步
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostalCodeFeedback {
    Valid { postal_code: u32, locality: String },
    Invalid { postal_code: u32 },
}

impl fmt::Display for PostalCodeFeedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostalCodeFeedback::Valid {
                postal_code,
                locality,
            } => write!(
                f,
                "Valid postal code! The locality for postal code {} is: {}",
                postal_code, locality
            ),
            PostalCodeFeedback::Invalid { postal_code } => f.write_str(
                &WizardError::InvalidPostalCode {
                    postal_code: *postal_code,
                }
                .user_friendly_message(),
            ),
        }
    }
}

/// 一個使用者工作階段的全部狀態
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    page: Page,
    draft: PropertyDraft,
    feedback: Option<PostalCodeFeedback>,
    last_prediction: Option<PredictionRecord>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            page: Page::Welcome,
            draft: PropertyDraft::default(),
            feedback: None,
            last_prediction: None,
        }
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn draft(&self) -> &PropertyDraft {
        &self.draft
    }

    pub fn feedback(&self) -> Option<&PostalCodeFeedback> {
        self.feedback.as_ref()
    }

    pub fn last_prediction(&self) -> Option<&PredictionRecord> {
        self.last_prediction.as_ref()
    }

    pub fn navigate(&mut self, nav: Navigation) -> Result<Page> {
        let target = next_page(self.page, nav).ok_or_else(|| WizardError::InvalidTransition {
            page: self.page.to_string(),
            action: nav.to_string(),
        })?;

        if nav == Navigation::NewPrediction {
            tracing::info!("🔄 Starting a new prediction, draft reset to defaults");
            self.draft.reset();
            self.feedback = None;
            self.last_prediction = None;
        }

        tracing::debug!("Page {} -> {}", self.page, target);
        self.page = target;
        Ok(target)
    }

    /// 立即把編輯寫進草稿；編輯必須屬於目前畫面
    pub fn apply(&mut self, edit: DraftEdit, resolver: &dyn LocalityResolver) -> Result<()> {
        if edit.page() != self.page {
            return Err(WizardError::InvalidFieldValue {
                field: edit.field().to_string(),
                reason: format!("not editable on the {} page", self.page),
            });
        }

        match edit {
            DraftEdit::PostalCode(0) => {
                self.feedback = None;
            }
            DraftEdit::PostalCode(postal_code) => match resolver.resolve(postal_code) {
                Some(locality) => {
                    tracing::debug!("Postal code {} resolved to {}", postal_code, locality);
                    self.draft.postal_code = postal_code;
                    self.draft.locality_name = locality.clone();
                    self.feedback = Some(PostalCodeFeedback::Valid {
                        postal_code,
                        locality,
                    });
                }
                None => {
                    tracing::warn!("Postal code {} could not be resolved", postal_code);
                    self.feedback = Some(PostalCodeFeedback::Invalid { postal_code });
                }
            },
            DraftEdit::PropertyType(property_type) => self.draft.set_type(property_type),
            DraftEdit::Subtype(subtype) => {
                let property_type = self.draft.type_of_property;
                if !property_type.allows(subtype) {
                    return Err(WizardError::InvalidSubtype {
                        subtype: subtype.to_string(),
                        property_type: property_type.to_string(),
                    });
                }
                self.draft.subtype_of_property = subtype;
            }
            DraftEdit::BuildingState(state) => self.draft.state_of_building = state,
            DraftEdit::Facades(facades) => {
                validate_field_range("number_of_facades", facades, 1, 4)?;
                self.draft.number_of_facades = facades;
            }
            DraftEdit::LivingArea(area) => self.draft.living_area = area,
            DraftEdit::Rooms(rooms) => self.draft.number_of_rooms = rooms,
            DraftEdit::Amenity(amenity, present) => self.draft.set_amenity(amenity, present),
            DraftEdit::GardenSurface(surface) => {
                self.require_amenity(Amenity::Garden, "garden_surface")?;
                self.draft.garden_surface = f64::from(surface);
            }
            DraftEdit::TerraceSurface(surface) => {
                self.require_amenity(Amenity::Terrace, "terrace_surface")?;
                self.draft.terrace_surface = surface;
            }
        }

        Ok(())
    }

    fn require_amenity(&self, amenity: Amenity, field: &str) -> Result<()> {
        if !self.draft.has(amenity) {
            return Err(WizardError::InvalidFieldValue {
                field: field.to_string(),
                reason: format!("answer yes to '{}' first", amenity.question()),
            });
        }
        Ok(())
    }

    /// 送出預測。失敗時草稿不變，可以再試一次。
    pub async fn predict(&mut self, estimator: &dyn PriceEstimator) -> Result<PredictionRecord> {
        if self.page != Page::Prediction {
            return Err(WizardError::InvalidTransition {
                page: self.page.to_string(),
                action: "to a prediction".to_string(),
            });
        }

        let value = estimator.predict(&self.draft).await?;
        let record = PredictionRecord::new(value);
        self.last_prediction = Some(record.clone());
        Ok(record)
    }
}
