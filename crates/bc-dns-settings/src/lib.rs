//! DNSSEC settings for Cloudflare zones.
//!
//! Every operation issues a single API call through the shared client handle
//! and reduces the outcome to a `bool` or an optional settings record.
//! Failures never reach the caller; they are reported through `tracing`.

mod settings;

pub use bc_cloudflare_api::{DnssecSettings, DnssecStatus};
pub use bc_session::{ClientResolver, SessionConfig, SharedClientResolver};
pub use settings::CloudflareDnsSettings;
pub use tokio_util::sync::CancellationToken;

/// Operations every DNS settings utility provides.
#[async_trait::async_trait]
pub trait DnsSettingsUtil: Send + Sync {
    /// `true` only when the zone's DNSSEC status is active.
    async fn get_dnssec_status(&self, zone_id: &str, cancel: Option<&CancellationToken>) -> bool;

    /// Full DNSSEC configuration, including multi-signer, presigned and
    /// NSEC3 settings.
    async fn get_dnssec_details(
        &self,
        zone_id: &str,
        cancel: Option<&CancellationToken>,
    ) -> Option<DnssecSettings>;

    /// Returns the `success` flag Cloudflare reported for the update.
    async fn enable_dnssec(&self, zone_id: &str, cancel: Option<&CancellationToken>) -> bool;

    async fn disable_dnssec(&self, zone_id: &str, cancel: Option<&CancellationToken>) -> bool;
}
