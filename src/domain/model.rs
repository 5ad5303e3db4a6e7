use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PropertyType {
    #[default]
    House,
    Apartment,
}

impl PropertyType {
    pub const ALL: [PropertyType; 2] = [PropertyType::House, PropertyType::Apartment];

    /// 此類型可選的子類型，第一個是切換類型時的預設值
    pub fn subtypes(self) -> &'static [PropertySubtype] {
        use PropertySubtype::*;
        match self {
            PropertyType::House => &[
                House,
                Villa,
                Chalet,
                Cottage,
                Bungalow,
                Mansion,
                MasterHouse,
                Unknown,
            ],
            PropertyType::Apartment => &[
                Flat,
                FlatStudio,
                Duplex,
                Triplex,
                GroundFloor,
                Penthouse,
                Loft,
                MixedBuilding,
                Unknown,
            ],
        }
    }

    pub fn allows(self, subtype: PropertySubtype) -> bool {
        self.subtypes().contains(&subtype)
    }

    pub fn default_subtype(self) -> PropertySubtype {
        self.subtypes()[0]
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyType::House => write!(f, "House"),
            PropertyType::Apartment => write!(f, "Apartment"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PropertySubtype {
    #[default]
    House,
    Villa,
    Chalet,
    Cottage,
    Bungalow,
    Mansion,
    MasterHouse,
    Flat,
    FlatStudio,
    Duplex,
    Triplex,
    GroundFloor,
    Penthouse,
    Loft,
    MixedBuilding,
    Unknown,
}

impl fmt::Display for PropertySubtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 顯示名稱和 JSON 名稱相同
        fmt::Debug::fmt(self, f)
    }
}

/// 建物狀態。`Good` 只作為預設值存在，不在 [`BuildingState::OPTIONS`] 裡。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BuildingState {
    #[serde(rename = "GOOD")]
    #[default]
    Good,
    Normal,
    #[serde(rename = "To renovate")]
    ToRenovate,
    Excellent,
    #[serde(rename = "Fully renovated")]
    FullyRenovated,
    New,
    #[serde(rename = "To restore")]
    ToRestore,
    #[serde(rename = "Under construction")]
    UnderConstruction,
    #[serde(rename = "To demolish")]
    ToDemolish,
    Unknown,
}

impl BuildingState {
    /// 畫面上提供的選項
    // NOTE: 舊版清單把 "To demolish" 和 "Unknown" 黏成一個選項，這裡分開列出；
    // 預設值 "GOOD" 仍不在清單內，待確認模型實際接受的值。
    pub const OPTIONS: [BuildingState; 9] = [
        BuildingState::Normal,
        BuildingState::ToRenovate,
        BuildingState::Excellent,
        BuildingState::FullyRenovated,
        BuildingState::New,
        BuildingState::ToRestore,
        BuildingState::UnderConstruction,
        BuildingState::ToDemolish,
        BuildingState::Unknown,
    ];

    pub fn label(self) -> &'static str {
        match self {
            BuildingState::Good => "GOOD",
            BuildingState::Normal => "Normal",
            BuildingState::ToRenovate => "To renovate",
            BuildingState::Excellent => "Excellent",
            BuildingState::FullyRenovated => "Fully renovated",
            BuildingState::New => "New",
            BuildingState::ToRestore => "To restore",
            BuildingState::UnderConstruction => "Under construction",
            BuildingState::ToDemolish => "To demolish",
            BuildingState::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for BuildingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 有/無的設施旗標，序列化成 1.0 / 0.0
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Amenity {
    EquippedKitchen,
    Furnished,
    OpenFire,
    Terrace,
    Garden,
    SwimmingPool,
}

impl Amenity {
    pub const ALL: [Amenity; 6] = [
        Amenity::Garden,
        Amenity::Terrace,
        Amenity::SwimmingPool,
        Amenity::OpenFire,
        Amenity::EquippedKitchen,
        Amenity::Furnished,
    ];

    pub fn field_name(self) -> &'static str {
        match self {
            Amenity::EquippedKitchen => "equipped_kitchen",
            Amenity::Furnished => "furnished",
            Amenity::OpenFire => "open_fire",
            Amenity::Terrace => "terrace",
            Amenity::Garden => "garden",
            Amenity::SwimmingPool => "swimming_pool",
        }
    }

    pub fn question(self) -> &'static str {
        match self {
            Amenity::EquippedKitchen => "Is there an equipped kitchen?",
            Amenity::Furnished => "Is the place furnished?",
            Amenity::OpenFire => "Is there a fireplace?",
            Amenity::Terrace => "Is there a terrace?",
            Amenity::Garden => "Is there a garden?",
            Amenity::SwimmingPool => "Is there a swimming pool?",
        }
    }
}

/// 精靈逐步填寫的物件資料，欄位名稱即預測 API 的 JSON 欄位
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyDraft {
    pub locality_name: String,
    pub postal_code: u32,
    pub price: f64,
    pub type_of_property: PropertyType,
    pub subtype_of_property: PropertySubtype,
    pub number_of_rooms: u32,
    pub living_area: u32,
    pub equipped_kitchen: f64,
    pub furnished: f64,
    pub open_fire: f64,
    pub terrace: f64,
    pub garden: f64,
    pub number_of_facades: u8,
    pub swimming_pool: f64,
    pub state_of_building: BuildingState,
    pub garden_surface: f64,
    pub terrace_surface: u32,
}

impl Default for PropertyDraft {
    fn default() -> Self {
        Self {
            locality_name: "Bruxelles".to_string(),
            postal_code: 1000,
            price: 0.0,
            type_of_property: PropertyType::House,
            subtype_of_property: PropertySubtype::House,
            number_of_rooms: 4,
            living_area: 180,
            equipped_kitchen: 1.0,
            furnished: 0.0,
            open_fire: 0.0,
            terrace: 0.0,
            garden: 0.0,
            number_of_facades: 3,
            swimming_pool: 0.0,
            state_of_building: BuildingState::Good,
            garden_surface: 0.0,
            terrace_surface: 0,
        }
    }
}

impl PropertyDraft {
    /// 切換類型；原本的子類型若不屬於新類型，改成新類型的第一個子類型
    pub fn set_type(&mut self, property_type: PropertyType) {
        self.type_of_property = property_type;
        if !property_type.allows(self.subtype_of_property) {
            self.subtype_of_property = property_type.default_subtype();
        }
    }

    pub fn has(&self, amenity: Amenity) -> bool {
        self.flag(amenity) >= 0.5
    }

    fn flag(&self, amenity: Amenity) -> f64 {
        match amenity {
            Amenity::EquippedKitchen => self.equipped_kitchen,
            Amenity::Furnished => self.furnished,
            Amenity::OpenFire => self.open_fire,
            Amenity::Terrace => self.terrace,
            Amenity::Garden => self.garden,
            Amenity::SwimmingPool => self.swimming_pool,
        }
    }

    /// 設定設施旗標；花園/露台設為「無」時面積歸零
    pub fn set_amenity(&mut self, amenity: Amenity, present: bool) {
        let value = if present { 1.0 } else { 0.0 };
        match amenity {
            Amenity::EquippedKitchen => self.equipped_kitchen = value,
            Amenity::Furnished => self.furnished = value,
            Amenity::OpenFire => self.open_fire = value,
            Amenity::Terrace => {
                self.terrace = value;
                if !present {
                    self.terrace_surface = 0;
                }
            }
            Amenity::Garden => {
                self.garden = value;
                if !present {
                    self.garden_surface = 0.0;
                }
            }
            Amenity::SwimmingPool => self.swimming_pool = value,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// 最近一次成功的估價
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub value: f64,
    pub requested_at: DateTime<Utc>,
}

impl PredictionRecord {
    pub fn new(value: f64) -> Self {
        Self {
            value,
            requested_at: Utc::now(),
        }
    }
}
