use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Shape or alphabet check failed before the encoder was consulted.
    Validation,
    /// The encoder rejected well-shaped input.
    Conversion,
    CollaboratorUnavailable,
}

/// Failure reported by an encoder implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("{reason}")]
    Encode { reason: String },
    #[error("{reason}")]
    Decode { reason: String },
    #[error("ShortUUID library not loaded")]
    Unavailable,
}

impl CodecError {
    pub fn encode(reason: impl Into<String>) -> Self {
        Self::Encode {
            reason: reason.into(),
        }
    }

    pub fn decode(reason: impl Into<String>) -> Self {
        Self::Decode {
            reason: reason.into(),
        }
    }
}

/// Controller error; `Display` is the text shown in the error banner.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConverterError {
    #[error("Invalid ShortUUID: {reason}")]
    ShortFormInvalid { kind: ErrorKind, reason: String },
    #[error("Invalid UUID: {reason}")]
    LongFormInvalid { kind: ErrorKind, reason: String },
    #[error("ShortUUID encoder unavailable")]
    EncoderUnavailable,
    #[error("presenter unavailable")]
    PresenterUnavailable,
    #[error("Failed to copy to clipboard")]
    ClipboardFailed { reason: String },
}

impl ConverterError {
    pub fn short_validation(reason: impl Into<String>) -> Self {
        Self::ShortFormInvalid {
            kind: ErrorKind::Validation,
            reason: reason.into(),
        }
    }

    pub fn long_validation(reason: impl Into<String>) -> Self {
        Self::LongFormInvalid {
            kind: ErrorKind::Validation,
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ShortFormInvalid { kind, .. } | Self::LongFormInvalid { kind, .. } => *kind,
            Self::EncoderUnavailable | Self::PresenterUnavailable => {
                ErrorKind::CollaboratorUnavailable
            }
            Self::ClipboardFailed { .. } => ErrorKind::CollaboratorUnavailable,
        }
    }
}
