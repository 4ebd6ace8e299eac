use std::{collections::HashMap, sync::Mutex};

use anyhow::{anyhow, Result};
use shared::{
    domain::{Field, MessageKind},
    error::CodecError,
};
use shortuuid::ShortUuid;
use uuid::Uuid;

mod controller;
pub mod normalize;
pub mod scheduler;

pub use controller::{ConverterBuilder, ConverterController};
pub use scheduler::{HideScheduler, HideTask, NeverHide, ScheduledHide, TokioHideScheduler};

pub const LEGACY_PREFERENCE_KEY: &str = "shortuuid-legacy-mode";

/// Encode/decode collaborator. Encoding has a dedicated legacy entry point
/// while decoding takes the legacy flag, matching the library it fronts.
pub trait Encoder: Send + Sync {
    fn encode(&self, canonical_uuid: &str) -> Result<String, CodecError>;
    fn legacy_encode(&self, canonical_uuid: &str) -> Result<String, CodecError>;
    fn decode(&self, short_form: &str, legacy: bool) -> Result<String, CodecError>;
    fn uuid(&self) -> String;
    fn alphabet(&self) -> &str;
}

/// Receives every visible state change. Implementations must tolerate calls
/// from the hide timer's thread.
pub trait Presenter: Send + Sync {
    fn set_field_text(&self, field: Field, text: &str);
    fn set_field_invalid(&self, field: Field, invalid: bool);
    fn set_busy(&self, busy: bool);
    fn show_message(&self, kind: MessageKind, text: &str);
    fn hide_messages(&self);
}

pub trait PreferenceStore: Send + Sync {
    fn load_bool(&self, key: &str) -> Result<Option<bool>>;
    fn save_bool(&self, key: &str, value: bool) -> Result<()>;
}

pub trait Clipboard: Send + Sync {
    fn write_text(&self, text: &str) -> Result<()>;
}

pub struct ShortUuidEncoder {
    codec: ShortUuid,
}

impl ShortUuidEncoder {
    pub fn new(codec: ShortUuid) -> Self {
        Self { codec }
    }

    fn parse(canonical_uuid: &str) -> Result<Uuid, CodecError> {
        Uuid::parse_str(canonical_uuid).map_err(|err| CodecError::encode(err.to_string()))
    }
}

impl Default for ShortUuidEncoder {
    fn default() -> Self {
        Self::new(ShortUuid::new())
    }
}

impl Encoder for ShortUuidEncoder {
    fn encode(&self, canonical_uuid: &str) -> Result<String, CodecError> {
        Ok(self.codec.encode(&Self::parse(canonical_uuid)?))
    }

    fn legacy_encode(&self, canonical_uuid: &str) -> Result<String, CodecError> {
        Ok(self.codec.legacy_encode(&Self::parse(canonical_uuid)?))
    }

    fn decode(&self, short_form: &str, legacy: bool) -> Result<String, CodecError> {
        self.codec
            .decode(short_form, legacy)
            .map(|uuid| uuid.hyphenated().to_string())
            .map_err(|err| CodecError::decode(err.to_string()))
    }

    fn uuid(&self) -> String {
        self.codec.random()
    }

    fn alphabet(&self) -> &str {
        self.codec.alphabet()
    }
}

/// Process-local preferences; lost when the process exits.
#[derive(Default)]
pub struct MemoryPreferences {
    values: Mutex<HashMap<String, bool>>,
}

impl PreferenceStore for MemoryPreferences {
    fn load_bool(&self, key: &str) -> Result<Option<bool>> {
        let values = self
            .values
            .lock()
            .map_err(|_| anyhow!("preference map poisoned"))?;
        Ok(values.get(key).copied())
    }

    fn save_bool(&self, key: &str, value: bool) -> Result<()> {
        let mut values = self
            .values
            .lock()
            .map_err(|_| anyhow!("preference map poisoned"))?;
        values.insert(key.to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
