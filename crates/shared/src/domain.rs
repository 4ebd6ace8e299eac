use serde::{Deserialize, Serialize};

/// One of the two synchronized text fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Short,
    Long,
}

impl Field {
    pub fn label(self) -> &'static str {
        match self {
            Field::Short => "ShortUUID",
            Field::Long => "UUID",
        }
    }

    pub fn other(self) -> Field {
        match self {
            Field::Short => Field::Long,
            Field::Long => Field::Short,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConverterSnapshot {
    pub short_form: String,
    pub long_form: String,
    pub legacy: bool,
    pub is_valid: bool,
}

/// Partial state update; present values are applied short, long, then legacy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatePatch {
    pub short_form: Option<String>,
    pub long_form: Option<String>,
    pub legacy: Option<bool>,
}
