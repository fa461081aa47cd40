//! Versioned JSON envelope shared by both artifact files.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Highest (and only) artifact document version this build understands.
pub const SUPPORTED_FORMAT_VERSION: u32 = 1;

#[derive(Deserialize)]
struct VersionHeader {
    format_version: u32,
}

#[derive(Serialize, Deserialize)]
struct Document<T> {
    format_version: u32,
    #[serde(flatten)]
    artifact: T,
}

/// Reads only `format_version`, so a newer document is reported as such
/// rather than as a confusing decode error.
pub(crate) fn peek_version(bytes: &[u8]) -> Result<u32, serde_json::Error> {
    serde_json::from_slice::<VersionHeader>(bytes).map(|header| header.format_version)
}

pub(crate) fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, serde_json::Error> {
    serde_json::from_slice::<Document<T>>(bytes).map(|doc| doc.artifact)
}

pub(crate) fn encode<T: Serialize>(artifact: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&Document {
        format_version: SUPPORTED_FORMAT_VERSION,
        artifact,
    })
}
