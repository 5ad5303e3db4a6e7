use crate::app::commands::amenity_command;
use crate::core::payload::build_payload;
use crate::core::wizard::{Page, PostalCodeFeedback, Session};
use crate::domain::model::{Amenity, BuildingState, PropertyType};
use crate::utils::error::{Result, WizardError};
use crate::utils::format::format_currency;
use std::fmt::{self, Write};

/// 依目前頁面輸出畫面文字；只讀取 session
pub fn render(session: &Session) -> Result<String> {
    let mut out = String::new();
    let written = match session.page() {
        Page::Welcome => render_welcome(&mut out),
        Page::PostalCode => render_postal_code(&mut out, session),
        Page::Basics => render_basics(&mut out, session),
        Page::Extras => render_extras(&mut out, session),
        Page::Prediction => {
            let inputs = serde_json::to_string_pretty(&build_payload(session.draft())?)?;
            render_prediction(&mut out, session, &inputs)
        }
    };
    written.map_err(|e| WizardError::IoError(std::io::Error::other(e)))?;
    Ok(out)
}

fn title(out: &mut String, text: &str) -> fmt::Result {
    writeln!(out)?;
    writeln!(out, "{}", text)?;
    writeln!(out, "{}", "=".repeat(text.chars().count()))
}

fn navigation(out: &mut String) -> fmt::Result {
    writeln!(out)?;
    writeln!(out, "[b] ⬅️ Previous   [n] ➡️ Next   [q] Quit")
}

fn yes_no(present: bool) -> &'static str {
    if present {
        "Yes"
    } else {
        "No"
    }
}

fn joined<T: ToString>(items: &[T]) -> String {
    items
        .iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(" | ")
}

fn render_welcome(out: &mut String) -> fmt::Result {
    title(out, "Welcome to Our Prediction App!")?;
    writeln!(
        out,
        "We are glad to have you here! Press enter to start the prediction process."
    )?;
    writeln!(out)?;
    writeln!(out, "[s] Let's start!   [q] Quit")
}

fn render_postal_code(out: &mut String, session: &Session) -> fmt::Result {
    let draft = session.draft();
    title(out, "Where is your property? 1/3")?;
    writeln!(
        out,
        "Postal code: {} ({})",
        draft.postal_code, draft.locality_name
    )?;
    match session.feedback() {
        Some(feedback @ PostalCodeFeedback::Valid { .. }) => writeln!(out, "✅ {}", feedback)?,
        Some(feedback @ PostalCodeFeedback::Invalid { .. }) => writeln!(out, "❌ {}", feedback)?,
        None => {}
    }
    writeln!(out)?;
    writeln!(out, "Enter your postal code:  <number>")?;
    navigation(out)
}

fn render_basics(out: &mut String, session: &Session) -> fmt::Result {
    let draft = session.draft();
    title(out, "What is your property like? 2/3")?;

    writeln!(out, "🏠 Property type")?;
    writeln!(
        out,
        "  Type of property:    {:<18} type <{}>",
        draft.type_of_property.to_string(),
        joined(&PropertyType::ALL)
    )?;
    writeln!(
        out,
        "  Subtype of property: {:<18} subtype <{}>",
        draft.subtype_of_property.to_string(),
        joined(draft.type_of_property.subtypes())
    )?;
    writeln!(
        out,
        "  State:               {:<18} state <number>",
        draft.state_of_building.to_string()
    )?;
    for (index, state) in BuildingState::OPTIONS.iter().enumerate() {
        writeln!(out, "      {}. {}", index + 1, state)?;
    }

    writeln!(out, "🏠 Property basics")?;
    writeln!(
        out,
        "  Number of facades:   {:<18} facades <1-4>",
        draft.number_of_facades
    )?;
    writeln!(
        out,
        "  Living area (m²):    {:<18} area <number>",
        draft.living_area
    )?;
    writeln!(
        out,
        "  Number of bedrooms:  {:<18} rooms <number>",
        draft.number_of_rooms
    )?;
    navigation(out)
}

fn render_extras(out: &mut String, session: &Session) -> fmt::Result {
    let draft = session.draft();
    title(out, "Anything ✨extras✨?  3/3")?;

    for amenity in Amenity::ALL {
        let present = draft.has(amenity);
        writeln!(
            out,
            "  {:<31} {:<4} {} <yes|no>",
            amenity.question(),
            yes_no(present),
            amenity_command(amenity)
        )?;
        match amenity {
            Amenity::Garden if present => writeln!(
                out,
                "    Garden surface (m²)           {:<4} garden-surface <number>",
                draft.garden_surface
            )?,
            Amenity::Terrace if present => writeln!(
                out,
                "    Terrace surface (m²)          {:<4} terrace-surface <number>",
                draft.terrace_surface
            )?,
            _ => {}
        }
    }
    navigation(out)
}

fn render_prediction(out: &mut String, session: &Session, inputs: &str) -> fmt::Result {
    title(out, "Price prediction")?;

    writeln!(out, "Your inputs")?;
    writeln!(out, "{}", inputs)?;

    if let Some(record) = session.last_prediction() {
        writeln!(out)?;
        writeln!(
            out,
            "Estimated price: {} (requested {})",
            format_currency(record.value),
            record.requested_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
    }

    writeln!(out)?;
    writeln!(out, "[p] Get prediction   [new] New prediction   [q] Quit")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::wizard::{DraftEdit, Navigation};
    use crate::domain::ports::LocalityResolver;

    struct NoResolver;

    impl LocalityResolver for NoResolver {
        fn resolve(&self, _postal_code: u32) -> Option<String> {
            None
        }
    }

    #[test]
    fn test_rendering_every_page_leaves_session_unchanged() {
        let mut session = Session::new();
        loop {
            let before = session.clone();
            let first = render(&session).unwrap();
            let second = render(&session).unwrap();
            assert_eq!(first, second);
            assert_eq!(session, before);

            if session.navigate(Navigation::Next).is_err() {
                break;
            }
        }
        assert_eq!(session.page(), Page::Prediction);
    }

    #[test]
    fn test_postal_code_page_shows_feedback() {
        let mut session = Session::new();
        session.navigate(Navigation::Next).unwrap();
        session
            .apply(DraftEdit::PostalCode(1234), &NoResolver)
            .unwrap();

        let screen = render(&session).unwrap();
        assert!(screen.contains("Where is your property? 1/3"));
        assert!(screen.contains("❌ Invalid postal code! Please try again."));
        assert!(screen.contains("Postal code: 1000 (Bruxelles)"));
    }

    #[test]
    fn test_basics_page_lists_subtypes_of_current_type() {
        let mut session = Session::new();
        session.navigate(Navigation::Next).unwrap();
        session.navigate(Navigation::Next).unwrap();

        let screen = render(&session).unwrap();
        assert!(screen.contains("Villa"));
        assert!(!screen.contains("Penthouse"));
        assert!(screen.contains("GOOD"));
        assert!(screen.contains("9. Unknown"));
    }

    #[test]
    fn test_prediction_page_shows_inputs() {
        let mut session = Session::new();
        for _ in 0..4 {
            session.navigate(Navigation::Next).unwrap();
        }

        let screen = render(&session).unwrap();
        assert!(screen.contains("Your inputs"));
        assert!(screen.contains("\"locality_name\": \"Bruxelles\""));
        assert!(!screen.contains("Estimated price"));
    }
}
