//! Actions raised by widgets while a frame is drawn.

use shared::domain::Field;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    ShortEdited(String),
    LongEdited(String),
    LegacyToggled(bool),
    GenerateShort,
    GenerateLong,
    Clear,
    Copy(Field),
}

impl UiAction {
    pub fn name(&self) -> &'static str {
        match self {
            UiAction::ShortEdited(_) => "short_edited",
            UiAction::LongEdited(_) => "long_edited",
            UiAction::LegacyToggled(_) => "legacy_toggled",
            UiAction::GenerateShort => "generate_short",
            UiAction::GenerateLong => "generate_long",
            UiAction::Clear => "clear",
            UiAction::Copy(_) => "copy",
        }
    }
}
