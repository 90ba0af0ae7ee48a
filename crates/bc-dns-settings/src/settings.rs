use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use bc_cloudflare_api::{ApiResponse, CloudflareError, DnssecSettings, DnssecStatus, DnssecUpdate};
use bc_session::{ClientResolver, SessionConfig, SharedClientResolver};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::DnsSettingsUtil;

/// DNSSEC utility backed by the Cloudflare API.
///
/// Holds nothing but the resolver, so one instance can serve any number of
/// concurrent callers.
pub struct CloudflareDnsSettings<R> {
    resolver: Arc<R>,
}

impl<R> Clone for CloudflareDnsSettings<R> {
    fn clone(&self) -> Self {
        Self {
            resolver: Arc::clone(&self.resolver),
        }
    }
}

impl CloudflareDnsSettings<SharedClientResolver> {
    /// Wires a utility together with its own lazily-built client handle.
    pub fn from_config(config: SessionConfig) -> Self {
        Self::new(Arc::new(SharedClientResolver::new(config)))
    }
}

impl<R: ClientResolver + 'static> CloudflareDnsSettings<R> {
    pub fn new(resolver: Arc<R>) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &Arc<R> {
        &self.resolver
    }

    /// Type-erased handle for callers that keep a single shared instance.
    pub fn shared(self) -> Arc<dyn DnsSettingsUtil> {
        Arc::new(self)
    }

    async fn fetch(
        &self,
        zone_id: &str,
        cancel: Option<&CancellationToken>,
    ) -> Result<ApiResponse<DnssecSettings>, CloudflareError> {
        with_cancel(cancel, async {
            let client = self.resolver.resolve(cancel).await?;
            let resp = client.get_dnssec(zone_id).await?;
            if resp.success == Some(false) {
                return Err(CloudflareError::Rejected(
                    resp.first_error().unwrap_or("success: false").to_string(),
                ));
            }
            Ok(resp)
        })
        .await
    }

    async fn update(
        &self,
        zone_id: &str,
        status: DnssecStatus,
        cancel: Option<&CancellationToken>,
    ) -> Result<ApiResponse<DnssecSettings>, CloudflareError> {
        let body = DnssecUpdate::status(status);
        with_cancel(cancel, async {
            let client = self.resolver.resolve(cancel).await?;
            client.patch_dnssec(zone_id, &body).await
        })
        .await
    }

    async fn set_status(
        &self,
        zone_id: &str,
        status: DnssecStatus,
        cancel: Option<&CancellationToken>,
    ) -> bool {
        let action = if status.is_active() { "enable" } else { "disable" };
        info!(zone_id, action, "Updating DNSSEC status to {}", status);

        match self.update(zone_id, status, cancel).await {
            Ok(resp) => {
                let success = resp.success.unwrap_or(false);
                if success {
                    info!(zone_id, action, "DNSSEC {} succeeded", action);
                } else {
                    warn!(
                        zone_id,
                        action,
                        success,
                        error = resp.first_error().unwrap_or("none reported"),
                        "DNSSEC {} was not accepted",
                        action
                    );
                }
                success
            }
            Err(e) => {
                report_failure(action, zone_id, &e);
                false
            }
        }
    }
}

#[async_trait]
impl<R: ClientResolver + 'static> DnsSettingsUtil for CloudflareDnsSettings<R> {
    async fn get_dnssec_status(&self, zone_id: &str, cancel: Option<&CancellationToken>) -> bool {
        info!(zone_id, "Getting DNSSEC status");

        match self.fetch(zone_id, cancel).await {
            Ok(resp) => {
                // pending, pending-disabled and error all read as inactive
                let is_active = resp
                    .result
                    .and_then(|r| r.status)
                    .is_some_and(DnssecStatus::is_active);
                let label = if is_active { "Active" } else { "Inactive" };
                info!(zone_id, status = label, "Resolved DNSSEC status");
                is_active
            }
            Err(e) => {
                report_failure("get status", zone_id, &e);
                false
            }
        }
    }

    async fn get_dnssec_details(
        &self,
        zone_id: &str,
        cancel: Option<&CancellationToken>,
    ) -> Option<DnssecSettings> {
        info!(zone_id, "Getting DNSSEC details");

        match self.fetch(zone_id, cancel).await {
            Ok(resp) => match resp.result {
                Some(details) => {
                    info!(
                        zone_id,
                        status = ?details.status,
                        multi_signer = ?details.dnssec_multi_signer,
                        presigned = ?details.dnssec_presigned,
                        nsec3 = ?details.dnssec_use_nsec3,
                        "Retrieved DNSSEC details"
                    );
                    Some(details)
                }
                None => {
                    warn!(zone_id, "No DNSSEC details found");
                    None
                }
            },
            Err(e) => {
                report_failure("get details", zone_id, &e);
                None
            }
        }
    }

    async fn enable_dnssec(&self, zone_id: &str, cancel: Option<&CancellationToken>) -> bool {
        self.set_status(zone_id, DnssecStatus::Active, cancel).await
    }

    async fn disable_dnssec(&self, zone_id: &str, cancel: Option<&CancellationToken>) -> bool {
        self.set_status(zone_id, DnssecStatus::Disabled, cancel).await
    }
}

/// Races `fut` against the cancellation token, if one was given.
async fn with_cancel<T, F>(cancel: Option<&CancellationToken>, fut: F) -> Result<T, CloudflareError>
where
    F: Future<Output = Result<T, CloudflareError>>,
{
    match cancel {
        Some(token) => {
            tokio::select! {
                biased;
                _ = token.cancelled() => Err(CloudflareError::Cancelled),
                res = fut => res,
            }
        }
        None => fut.await,
    }
}

fn report_failure(operation: &str, zone_id: &str, err: &CloudflareError) {
    match err {
        CloudflareError::Cancelled => {
            warn!(zone_id, operation, "DNSSEC request cancelled");
        }
        _ => {
            error!(zone_id, operation, error = %err, "DNSSEC request failed");
        }
    }
}
