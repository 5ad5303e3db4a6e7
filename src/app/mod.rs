pub mod commands;
pub mod screens;
pub mod terminal;

pub use terminal::TerminalWizard;
