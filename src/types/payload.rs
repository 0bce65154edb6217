use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::request_id::generate_request_id;

/// Default body for a NIN lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NinPayload {
    pub id: String,
    pub premium_nin: bool,
    pub is_subject_consent: bool,
}

impl NinPayload {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            premium_nin: true,
            is_subject_consent: true,
        }
    }
}

/// Default body for a virtual NIN lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VninPayload {
    pub id: String,
    pub is_subject_consent: bool,
}

impl VninPayload {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            is_subject_consent: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BvnMetadata {
    pub request_id: String,
}

/// Default body for a BVN lookup. Each instance gets a fresh `requestId`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BvnPayload {
    pub id: String,
    pub metadata: BvnMetadata,
    pub is_subject_consent: bool,
    #[serde(rename = "premiumBVN")]
    pub premium_bvn: bool,
}

impl BvnPayload {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            metadata: BvnMetadata {
                request_id: generate_request_id(),
            },
            is_subject_consent: true,
            premium_bvn: true,
        }
    }
}

/// Where the body of a verification request comes from.
///
/// Exactly one source is ever sent: an explicit payload replaces the default
/// body wholesale, it is never merged with it.
#[derive(Debug, Clone, PartialEq)]
pub enum PayloadSource {
    /// Build the default body around this identifier
    Identifier(String),
    /// Send this body verbatim
    Explicit(Value),
}

impl PayloadSource {
    /// True when this source carries nothing usable.
    pub fn is_empty(&self) -> bool {
        match self {
            PayloadSource::Identifier(id) => id.is_empty(),
            PayloadSource::Explicit(value) => is_empty_value(value),
        }
    }
}

impl From<&str> for PayloadSource {
    fn from(id: &str) -> Self {
        PayloadSource::Identifier(id.to_string())
    }
}

impl From<String> for PayloadSource {
    fn from(id: String) -> Self {
        PayloadSource::Identifier(id)
    }
}

impl From<Value> for PayloadSource {
    fn from(payload: Value) -> Self {
        PayloadSource::Explicit(payload)
    }
}

/// A single verification call: payload source plus optional endpoint override
#[derive(Debug, Clone, PartialEq)]
pub struct VerificationRequest {
    pub source: PayloadSource,
    pub path: Option<String>,
}

impl VerificationRequest {
    pub fn identifier(id: impl Into<String>) -> Self {
        Self {
            source: PayloadSource::Identifier(id.into()),
            path: None,
        }
    }

    pub fn payload(payload: Value) -> Self {
        Self {
            source: PayloadSource::Explicit(payload),
            path: None,
        }
    }

    /// Send to `path` (relative to the base URL) instead of the default endpoint.
    pub fn at_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

impl From<PayloadSource> for VerificationRequest {
    fn from(source: PayloadSource) -> Self {
        Self { source, path: None }
    }
}

impl From<&str> for VerificationRequest {
    fn from(id: &str) -> Self {
        Self::identifier(id)
    }
}

impl From<String> for VerificationRequest {
    fn from(id: String) -> Self {
        Self::identifier(id)
    }
}

impl From<Value> for VerificationRequest {
    fn from(payload: Value) -> Self {
        Self::payload(payload)
    }
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::String(s) => s.is_empty() || s == "0",
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
    }
}
