use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use tank_editor_core::StageConfig;
use tank_editor_system_converter::{to_editor_content, StageFormatError};
use thiserror::Error;

const SHARE_DOMAIN: &str = "tank";
const SHARE_VERSION: &str = "v1";

/// Identifier prefix emitted before the encoded stage payload.
pub(crate) const SHARE_HEADER: &str = "tank:v1";
/// Delimiter used to separate the prefix, version and payload.
const FIELD_DELIMITER: char = ':';

/// Errors that can occur while encoding or decoding share codes.
#[derive(Debug, Error)]
pub(crate) enum ShareCodeError {
    /// The provided string was empty or contained only whitespace.
    #[error("share code was empty")]
    EmptyPayload,
    /// The encoded stage did not contain a version segment.
    #[error("share code is missing the version")]
    MissingVersion,
    /// The encoded stage did not include the payload segment.
    #[error("share code is missing the payload")]
    MissingPayload,
    /// The share code used an unexpected prefix segment.
    #[error("share code prefix '{0}' is not supported")]
    InvalidPrefix(String),
    /// The share code used an unsupported version identifier.
    #[error("share code version '{0}' is not supported")]
    UnsupportedVersion(String),
    /// The base64 payload could not be decoded.
    #[error("could not decode share code payload: {0}")]
    InvalidEncoding(#[source] base64::DecodeError),
    /// The payload could not be converted to or from JSON.
    #[error("could not process share code payload: {0}")]
    InvalidPayload(#[source] serde_json::Error),
    /// The payload is valid JSON but not a loadable stage.
    #[error("share code does not hold a loadable stage: {0}")]
    InvalidStage(#[from] StageFormatError),
}

/// Encodes the stage into a single-line string suitable for clipboard transfer.
pub(crate) fn encode(stage: &StageConfig) -> Result<String, ShareCodeError> {
    let json = serde_json::to_vec(stage).map_err(ShareCodeError::InvalidPayload)?;
    let encoded = STANDARD_NO_PAD.encode(json);
    Ok(format!("{SHARE_HEADER}{FIELD_DELIMITER}{encoded}"))
}

/// Decodes a stage from its share code, checking that the editor can load it.
pub(crate) fn decode(value: &str) -> Result<StageConfig, ShareCodeError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ShareCodeError::EmptyPayload);
    }

    let mut parts = trimmed.splitn(3, FIELD_DELIMITER);
    let domain = parts.next().unwrap_or_default();
    let version = parts.next().ok_or(ShareCodeError::MissingVersion)?;
    let payload = parts.next().ok_or(ShareCodeError::MissingPayload)?;

    if domain != SHARE_DOMAIN {
        return Err(ShareCodeError::InvalidPrefix(domain.to_owned()));
    }
    if version != SHARE_VERSION {
        return Err(ShareCodeError::UnsupportedVersion(version.to_owned()));
    }

    let bytes = STANDARD_NO_PAD
        .decode(payload.as_bytes())
        .map_err(ShareCodeError::InvalidEncoding)?;
    let stage: StageConfig =
        serde_json::from_slice(&bytes).map_err(ShareCodeError::InvalidPayload)?;
    let _ = to_editor_content(&stage)?;

    Ok(stage)
}
