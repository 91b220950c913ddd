use std::sync::Arc;
use serde_json::{Map, Value};
use tokio::sync::Mutex;
use tracing::info;

use crate::errors::BridgeResult;
use crate::models::DesiredPatch;
use crate::services::ShadowService;
use crate::state_management::{ChangeProcessor, PassSummary, PreviousValues};

/// The central controller behind the HTTP surface and the scheduled passes
///
/// It owns the previous-value cache. Passes lock the cache for their whole duration,
/// so concurrent passes run one after the other instead of interleaving their updates.
pub struct ShadowGateway {
    /// The service for reading and patching the device shadow
    shadow: Arc<dyn ShadowService>,
    /// The processor for change-detection passes
    processor: ChangeProcessor,
    /// Last observed value per signal, shared by every pass of this gateway
    previous_values: Mutex<PreviousValues>,
}

impl ShadowGateway {
    /// Creates a new `ShadowGateway` with an empty cache
    ///
    /// # Arguments
    ///
    /// * `shadow`: The `ShadowService` for shadow reads and writes
    /// * `processor`: The `ChangeProcessor` used by `run_processing_pass`
    pub fn new(shadow: Arc<dyn ShadowService>, processor: ChangeProcessor) -> Self {
        Self::with_cache(shadow, processor, PreviousValues::new())
    }

    /// Creates a new `ShadowGateway` starting from an existing cache
    pub fn with_cache(shadow: Arc<dyn ShadowService>, processor: ChangeProcessor, cache: PreviousValues) -> Self {
        info!("Initializing Shadow Gateway");
        Self {
            shadow,
            processor,
            previous_values: Mutex::new(cache),
        }
    }

    /// Reads the shadow and returns reported state overlaid with desired state
    ///
    /// # Returns
    ///
    /// * `Ok(Map<String, Value>)`: The merged attributes; desired values win on collisions
    /// * `Err(BridgeError)`: If the shadow service is unreachable or returns a malformed document
    pub async fn read_shadow(&self) -> BridgeResult<Map<String, Value>> {
        let document = self.shadow.get_shadow().await?;
        Ok(document.merged())
    }

    /// Requests a change of one desired attribute
    ///
    /// Returns as soon as the shadow service accepts the patch; the device's acknowledgement is not awaited
    ///
    /// # Arguments
    ///
    /// * `attribute`: The attribute name
    /// * `value`: The desired value, any JSON
    pub async fn write_shadow_attribute(&self, attribute: &str, value: Value) -> BridgeResult<()> {
        info!("Requesting desired {} = {}", attribute, value);
        self.shadow.update_shadow(&DesiredPatch::single(attribute, value)).await
    }

    /// Executes a single change-processing pass against the gateway's cache
    ///
    /// # Returns
    ///
    /// * `Ok(PassSummary)` if the shadow could be fetched, even when some record writes failed
    /// * `Err(BridgeError)` if the shadow fetch failed
    pub async fn run_processing_pass(&self) -> BridgeResult<PassSummary> {
        let mut cache = self.previous_values.lock().await;
        self.processor.run_pass(&mut cache).await
    }

    /// A copy of the current cache contents
    pub async fn previous_values(&self) -> PreviousValues {
        self.previous_values.lock().await.clone()
    }
}
