use std::sync::Arc;

use async_trait::async_trait;
use bc_cloudflare_api::{CloudflareClient, CloudflareError, Credentials};
use tokio::sync::OnceCell;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::config::SessionConfig;

/// Hands out the authenticated API client.
///
/// Implementations own the handle; callers borrow it for a single request
/// and never close or rebuild it.
#[async_trait]
pub trait ClientResolver: Send + Sync {
    async fn resolve(
        &self,
        cancel: Option<&CancellationToken>,
    ) -> Result<Arc<CloudflareClient>, CloudflareError>;
}

/// Builds one `CloudflareClient` on first use and shares it afterwards.
pub struct SharedClientResolver {
    config: SessionConfig,
    client: OnceCell<Arc<CloudflareClient>>,
}

impl SharedClientResolver {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            client: OnceCell::new(),
        }
    }

    /// A resolver that always returns `client`.
    pub fn from_client(client: Arc<CloudflareClient>) -> Self {
        Self {
            config: SessionConfig::default(),
            client: OnceCell::new_with(Some(client)),
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.client.initialized()
    }

    fn build(&self) -> Result<Arc<CloudflareClient>, CloudflareError> {
        self.config
            .validate()
            .map_err(|e| CloudflareError::InvalidConfig(e.to_string()))?;

        let http = reqwest::Client::builder()
            .timeout(self.config.timeout)
            .build()
            .map_err(|e| CloudflareError::HttpError(e.to_string()))?;
        let credentials = Credentials::new(&self.config.api_token, self.config.email.as_deref());

        debug!(base_url = %self.config.base_url, "Created Cloudflare API client");
        Ok(Arc::new(CloudflareClient::from_parts(
            http,
            credentials,
            &self.config.base_url,
        )))
    }
}

#[async_trait]
impl ClientResolver for SharedClientResolver {
    async fn resolve(
        &self,
        cancel: Option<&CancellationToken>,
    ) -> Result<Arc<CloudflareClient>, CloudflareError> {
        if cancel.is_some_and(|token| token.is_cancelled()) {
            return Err(CloudflareError::Cancelled);
        }
        let client = self
            .client
            .get_or_try_init(|| async { self.build() })
            .await?;
        Ok(Arc::clone(client))
    }
}
