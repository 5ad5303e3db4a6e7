use crate::core::wizard::{DraftEdit, Navigation, Page};
use crate::domain::model::{Amenity, BuildingState, PropertySubtype, PropertyType};
use crate::utils::error::{Result, WizardError};

/// 終端機輸入解析後的動作
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Navigate(Navigation),
    Edit(DraftEdit),
    Predict,
    Quit,
}

pub fn parse_command(page: Page, line: &str) -> Result<Command> {
    let line = line.trim();
    let (keyword, argument) = match line.split_once(char::is_whitespace) {
        Some((keyword, rest)) => (keyword, rest.trim()),
        None => (line, ""),
    };
    let keyword = keyword.to_ascii_lowercase();

    match (page, keyword.as_str()) {
        (_, "q" | "quit" | "exit") => return Ok(Command::Quit),
        (Page::Welcome, "" | "s" | "start") => return Ok(Command::Navigate(Navigation::Next)),
        (Page::Prediction, "p" | "predict") => return Ok(Command::Predict),
        (Page::Prediction, "new") => return Ok(Command::Navigate(Navigation::NewPrediction)),
        (_, "b" | "back") => return Ok(Command::Navigate(Navigation::Back)),
        (_, "n" | "next") => return Ok(Command::Navigate(Navigation::Next)),
        _ => {}
    }

    let edit = match (page, keyword.as_str()) {
        (Page::PostalCode, "postal") => DraftEdit::PostalCode(parse_number("postal_code", argument)?),
        (Page::PostalCode, _) if argument.is_empty() => {
            DraftEdit::PostalCode(parse_number("postal_code", &keyword)?)
        }
        (Page::Basics, "type") => DraftEdit::PropertyType(parse_property_type(argument)?),
        (Page::Basics, "subtype") => DraftEdit::Subtype(parse_subtype(argument)?),
        (Page::Basics, "state") => DraftEdit::BuildingState(parse_building_state(argument)?),
        (Page::Basics, "facades") => DraftEdit::Facades(parse_number("number_of_facades", argument)?),
        (Page::Basics, "area") => DraftEdit::LivingArea(parse_number("living_area", argument)?),
        (Page::Basics, "rooms") => DraftEdit::Rooms(parse_number("number_of_rooms", argument)?),
        (Page::Extras, "garden-surface") => {
            DraftEdit::GardenSurface(parse_number("garden_surface", argument)?)
        }
        (Page::Extras, "terrace-surface") => {
            DraftEdit::TerraceSurface(parse_number("terrace_surface", argument)?)
        }
        (Page::Extras, amenity) => match amenity_keyword(amenity) {
            Some(amenity) => DraftEdit::Amenity(amenity, parse_yes_no(amenity, argument)?),
            None => return Err(unknown_command(page, line)),
        },
        _ => return Err(unknown_command(page, line)),
    };

    Ok(Command::Edit(edit))
}

fn unknown_command(page: Page, line: &str) -> WizardError {
    WizardError::InvalidFieldValue {
        field: "command".to_string(),
        reason: format!("'{}' is not available on the {} page", line, page),
    }
}

fn parse_number<T: std::str::FromStr>(field: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| WizardError::InvalidFieldValue {
            field: field.to_string(),
            reason: format!("'{}' is not a non-negative whole number", value),
        })
}

fn parse_property_type(value: &str) -> Result<PropertyType> {
    PropertyType::ALL
        .into_iter()
        .find(|t| t.to_string().eq_ignore_ascii_case(value))
        .ok_or_else(|| WizardError::InvalidFieldValue {
            field: "type_of_property".to_string(),
            reason: format!("'{}' is neither House nor Apartment", value),
        })
}

fn parse_subtype(value: &str) -> Result<PropertySubtype> {
    PropertyType::ALL
        .iter()
        .flat_map(|t| t.subtypes().iter().copied())
        .find(|s| s.to_string().eq_ignore_ascii_case(value))
        .ok_or_else(|| WizardError::InvalidFieldValue {
            field: "subtype_of_property".to_string(),
            reason: format!("'{}' is not a known subtype", value),
        })
}

/// 依選項編號 (1..) 或名稱
fn parse_building_state(value: &str) -> Result<BuildingState> {
    let by_index = value
        .parse::<usize>()
        .ok()
        .and_then(|i| i.checked_sub(1))
        .and_then(|i| BuildingState::OPTIONS.get(i).copied());

    by_index
        .or_else(|| {
            BuildingState::OPTIONS
                .into_iter()
                .find(|s| s.label().eq_ignore_ascii_case(value))
        })
        .ok_or_else(|| WizardError::InvalidFieldValue {
            field: "state_of_building".to_string(),
            reason: format!("'{}' is not one of the listed states", value),
        })
}

fn amenity_keyword(keyword: &str) -> Option<Amenity> {
    match keyword {
        "garden" => Some(Amenity::Garden),
        "terrace" => Some(Amenity::Terrace),
        "pool" => Some(Amenity::SwimmingPool),
        "fireplace" => Some(Amenity::OpenFire),
        "kitchen" => Some(Amenity::EquippedKitchen),
        "furnished" => Some(Amenity::Furnished),
        _ => None,
    }
}

pub fn amenity_command(amenity: Amenity) -> &'static str {
    match amenity {
        Amenity::Garden => "garden",
        Amenity::Terrace => "terrace",
        Amenity::SwimmingPool => "pool",
        Amenity::OpenFire => "fireplace",
        Amenity::EquippedKitchen => "kitchen",
        Amenity::Furnished => "furnished",
    }
}

fn parse_yes_no(amenity: Amenity, value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "yes" | "y" => Ok(true),
        "no" | "n" => Ok(false),
        _ => Err(WizardError::InvalidFieldValue {
            field: amenity.field_name().to_string(),
            reason: format!("answer yes or no, not '{}'", value),
        }),
    }
}
