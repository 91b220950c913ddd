use async_trait::async_trait;
use aws_config::retry::RetryConfig;
use aws_config::timeout::TimeoutConfig;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_iotdataplane::config::Credentials;
use aws_sdk_iotdataplane::error::DisplayErrorContext;
use aws_sdk_iotdataplane::primitives::Blob;
use aws_sdk_iotdataplane::Client;
use secrecy::ExposeSecret;
use tracing::{debug, error};
use crate::config::{HttpSettings, ShadowSettings};
use crate::errors::{BridgeError, BridgeResult};
use crate::models::{DesiredPatch, ShadowDocument};

/// Read and update access to the classic shadow of the bridged device
#[async_trait]
pub trait ShadowService: Send + Sync {
    /// Fetches the current shadow document
    ///
    /// # Returns
    ///
    /// * `Ok(ShadowDocument)`: The parsed document
    /// * `Err(BridgeError)`: `ShadowError` if the service is unreachable or refuses the request,
    ///   `ShadowPayloadError` if the response is not a shadow document
    async fn get_shadow(&self) -> BridgeResult<ShadowDocument>;

    /// Sends a desired-state patch. Completes once the service accepts it; the device is not awaited
    async fn update_shadow(&self, patch: &DesiredPatch) -> BridgeResult<()>;
}

/// Shadow client for an IoT data-plane endpoint, using `GetThingShadow` / `UpdateThingShadow`
///
/// Requests are always signed. Credentials configured in the settings take precedence;
/// otherwise the default AWS provider chain (environment, profile, container or instance role) is used
#[derive(Debug, Clone)]
pub struct IotShadowClient {
    client: Client,
    thing_name: String,
}

impl IotShadowClient {
    /// Creates a new `IotShadowClient`
    ///
    /// # Arguments
    ///
    /// * `settings`: Endpoint, region, thing name and optional static credentials
    /// * `http`: Shared outbound HTTP settings (request timeout)
    pub async fn new(settings: &ShadowSettings, http: &HttpSettings) -> BridgeResult<Self> {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(settings.region.clone()))
            .endpoint_url(settings.endpoint.as_str().trim_end_matches('/'))
            .retry_config(RetryConfig::disabled());

        match (&settings.access_key_id, &settings.secret_access_key) {
            (Some(access_key_id), Some(secret_access_key)) => {
                loader = loader.credentials_provider(Credentials::new(
                    access_key_id.clone(),
                    secret_access_key.expose_secret().clone(),
                    settings.session_token.as_ref().map(|token| token.expose_secret().clone()),
                    None,
                    "settings",
                ));
            }
            _ => debug!("No credentials in settings; using the default AWS credential chain"),
        }

        if let Some(timeout) = http.request_timeout() {
            loader = loader.timeout_config(TimeoutConfig::builder().operation_timeout(timeout).build());
        }

        let sdk_config = loader.load().await;
        Ok(Self {
            client: Client::new(&sdk_config),
            thing_name: settings.thing_name.clone(),
        })
    }

    pub fn thing_name(&self) -> &str {
        &self.thing_name
    }
}

#[async_trait]
impl ShadowService for IotShadowClient {
    async fn get_shadow(&self) -> BridgeResult<ShadowDocument> {
        let output = self.client
            .get_thing_shadow()
            .thing_name(&self.thing_name)
            .send()
            .await
            .map_err(|e| {
                error!("Shadow read failed: {}", DisplayErrorContext(&e));
                BridgeError::ShadowError(format!("GetThingShadow failed: {}", DisplayErrorContext(&e)))
            })?;

        let payload = output.payload()
            .ok_or_else(|| BridgeError::ShadowPayloadError("GetThingShadow returned no payload".to_string()))?;

        ShadowDocument::from_slice(payload.as_ref())
            .map_err(|e| BridgeError::ShadowPayloadError(e.to_string()))
    }

    async fn update_shadow(&self, patch: &DesiredPatch) -> BridgeResult<()> {
        let body = serde_json::to_vec(patch)?;
        self.client
            .update_thing_shadow()
            .thing_name(&self.thing_name)
            .payload(Blob::new(body))
            .send()
            .await
            .map_err(|e| {
                error!("Shadow update failed: {}", DisplayErrorContext(&e));
                BridgeError::ShadowError(format!("UpdateThingShadow failed: {}", DisplayErrorContext(&e)))
            })?;
        Ok(())
    }
}
