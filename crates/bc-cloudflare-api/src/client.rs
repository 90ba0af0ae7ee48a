use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::CloudflareError;
use crate::types::{ApiMessage, ApiResponse, DnssecSettings, DnssecUpdate};

pub const DEFAULT_BASE_URL: &str = "https://api.cloudflare.com/client/v4";

/// API token, or global API key when an account email is supplied.
#[derive(Clone)]
pub struct Credentials {
    api_key: String,
    email: Option<String>,
}

impl Credentials {
    pub fn new(api_key: &str, email: Option<&str>) -> Self {
        Self {
            api_key: api_key.to_string(),
            email: email.map(|s| s.to_string()),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .field("email", &self.email)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct CloudflareClient {
    client: Client,
    credentials: Credentials,
    base_url: String,
}

impl CloudflareClient {
    pub fn new(api_key: &str, email: Option<&str>) -> Self {
        Self::from_parts(Client::new(), Credentials::new(api_key, email), DEFAULT_BASE_URL)
    }

    pub fn from_parts(client: Client, credentials: Credentials, base_url: &str) -> Self {
        Self {
            client,
            credentials,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn apply_auth(&self, req: RequestBuilder) -> RequestBuilder {
        if let Some(email) = &self.credentials.email {
            req.header("X-Auth-Email", email)
                .header("X-Auth-Key", &self.credentials.api_key)
        } else {
            req.header("Authorization", format!("Bearer {}", self.credentials.api_key))
        }
    }

    /// `{base}/zones/{zone_id}/dnssec`, with the zone id escaped as a single
    /// path segment.
    fn dnssec_url(&self, zone_id: &str) -> Result<Url, CloudflareError> {
        // the URL parser drops dot segments, so these can never stay in place
        if matches!(zone_id, "" | "." | "..") {
            return Err(CloudflareError::InvalidZoneId(zone_id.to_string()));
        }

        let mut url = Url::parse(&self.base_url)
            .map_err(|e| CloudflareError::InvalidConfig(format!("{}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| {
                CloudflareError::InvalidConfig(format!("{} cannot be a base URL", self.base_url))
            })?
            .pop_if_empty()
            .push("zones")
            .push(zone_id)
            .push("dnssec");
        Ok(url)
    }

    /// `GET /zones/{zone_id}/dnssec`
    pub async fn get_dnssec(
        &self,
        zone_id: &str,
    ) -> Result<ApiResponse<DnssecSettings>, CloudflareError> {
        let url = self.dnssec_url(zone_id)?;
        debug!(%url, "GET zone dnssec");

        let response = self.apply_auth(self.client.get(url)).send().await?;
        read_envelope(response).await
    }

    /// `PATCH /zones/{zone_id}/dnssec`
    pub async fn patch_dnssec(
        &self,
        zone_id: &str,
        update: &DnssecUpdate,
    ) -> Result<ApiResponse<DnssecSettings>, CloudflareError> {
        let url = self.dnssec_url(zone_id)?;
        debug!(%url, status = ?update.status, "PATCH zone dnssec");

        let response = self
            .apply_auth(self.client.patch(url))
            .json(update)
            .send()
            .await?;
        read_envelope(response).await
    }
}

/// Decodes the v4 envelope.
///
/// Cloudflare reports most failures as a non-2xx status with
/// `success: false` and an `errors` array in the body. Those become errors
/// carrying the first reported message, falling back to the raw body.
async fn read_envelope<T: DeserializeOwned>(
    response: Response,
) -> Result<ApiResponse<T>, CloudflareError> {
    let status = response.status();
    let body = response.bytes().await?;

    if status.is_success() {
        return serde_json::from_slice(&body)
            .map_err(|e| CloudflareError::DecodeError(e.to_string()));
    }

    let message = error_message(&body);
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(CloudflareError::AuthFailed(message));
    }
    Err(CloudflareError::ApiError {
        status: status.as_u16(),
        message,
    })
}

fn error_message(body: &[u8]) -> String {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        #[serde(default)]
        errors: Vec<ApiMessage>,
    }

    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.errors.into_iter().next())
        .map(|e| e.message)
        .unwrap_or_else(|| String::from_utf8_lossy(body).into_owned())
}
