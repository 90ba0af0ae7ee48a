//! Wire types for the zone DNSSEC endpoints.
//!
//! Field names follow the Cloudflare v4 JSON schema so the structs can be
//! forwarded to callers without a translation layer.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Signing state of a zone as reported by Cloudflare.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum DnssecStatus {
    Active,
    Pending,
    Disabled,
    PendingDisabled,
    Error,
    #[serde(other)]
    Unknown,
}

impl DnssecStatus {
    pub fn is_active(self) -> bool {
        self == DnssecStatus::Active
    }
}

impl std::fmt::Display for DnssecStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Pending => write!(f, "pending"),
            Self::Disabled => write!(f, "disabled"),
            Self::PendingDisabled => write!(f, "pending-disabled"),
            Self::Error => write!(f, "error"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// DNSSEC configuration of a zone.
///
/// Everything except the status and the three feature flags is passed
/// through untouched, including fields this crate does not name.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DnssecSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<DnssecStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dnssec_multi_signer: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dnssec_presigned: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dnssec_use_nsec3: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digest: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digest_algorithm: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digest_type: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ds: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_tag: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_type: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_on: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of `PATCH /zones/{zone_id}/dnssec`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DnssecUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<DnssecStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dnssec_multi_signer: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dnssec_presigned: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dnssec_use_nsec3: Option<bool>,
}

impl DnssecUpdate {
    /// An update that only changes the signing status.
    pub fn status(status: DnssecStatus) -> Self {
        Self {
            status: Some(status),
            dnssec_multi_signer: None,
            dnssec_presigned: None,
            dnssec_use_nsec3: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiMessage {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
}

/// Cloudflare v4 response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    pub success: Option<bool>,
    #[serde(default)]
    pub errors: Vec<ApiMessage>,
    #[serde(default)]
    pub messages: Vec<ApiMessage>,
    pub result: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn first_error(&self) -> Option<&str> {
        self.errors.first().map(|e| e.message.as_str())
    }
}
