//! Typed client for the Cloudflare v4 REST API.
//!
//! Only the zone-scoped DNSSEC endpoints are modelled. Responses keep the
//! v4 envelope (`success`, `errors`, `messages`, `result`) so callers can
//! decide how to interpret a missing result or a reported failure.

mod client;
mod error;
pub mod types;

pub use client::{CloudflareClient, Credentials, DEFAULT_BASE_URL};
pub use error::CloudflareError;
pub use types::{ApiMessage, ApiResponse, DnssecSettings, DnssecStatus, DnssecUpdate};
