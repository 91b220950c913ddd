use async_trait::async_trait;
use tracing::info;
use crate::models::EventRecord;
use crate::errors::BridgeError;
use crate::services::RestClient;
use crate::repositories::repository_trait::Repository;

/// A repository that appends event records to the store's event table.
///
/// The client is optional: a deployment without store credentials still runs,
/// and every insert reports `StoreCredentialsMissing` instead of reaching the network.
pub struct EventRecordRepository {
    /// The REST client, `None` when the base URL or key is not configured.
    client: Option<RestClient>,
    /// The table records are inserted into.
    table: String,
}

impl EventRecordRepository {
    /// Creates a new `EventRecordRepository`.
    ///
    /// # Arguments
    /// * `client`: The `RestClient` to use, if the store is configured.
    /// * `table`: The target table name.
    pub fn new(client: Option<RestClient>, table: impl Into<String>) -> Self {
        Self { client, table: table.into() }
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }
}

#[async_trait]
impl Repository<EventRecord> for EventRecordRepository {
    /// Inserts an event record into the store.
    ///
    /// # Arguments
    /// * `record`: The `EventRecord` to be inserted
    ///
    /// # Returns
    /// * `Ok(())` if the insertion was successful
    /// * `Err(BridgeError)` if credentials are missing or the store rejected the row
    async fn insert(&self, record: &EventRecord) -> Result<(), BridgeError> {
        let client = self.client.as_ref().ok_or_else(|| {
            BridgeError::StoreCredentialsMissing("store base_url and api_key must both be set".to_string())
        })?;

        client.post_json(&self.table, record).await?;

        info!("Guardado: {} - {}", record.kind(), record.signal_id());
        Ok(())
    }
}
