use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

/// Opaque encoded reference image, carried through the pipeline untouched.
/// The pipeline only ever checks for presence; the bytes stay whatever the
/// caller handed in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReferenceImage(String);

impl ReferenceImage {
    pub fn from_data_uri(data_uri: impl Into<String>) -> Self {
        ReferenceImage(data_uri.into())
    }

    pub fn from_bytes(mime: &str, bytes: &[u8]) -> Self {
        ReferenceImage(format!("data:{};base64,{}", mime, STANDARD.encode(bytes)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
