use async_trait::async_trait;
use serde::Serialize;
use crate::errors::BridgeError;

/// Defines a generic asynchronous append-only repository for rows of the event store
#[async_trait]
pub trait Repository<T>: Send + Sync
    where
        T: Serialize + Send + Sync,
{
    /// Inserts a single item into the store
    ///
    /// # Arguments
    ///
    /// * `item`: A reference to the item of type `T` to be inserted
    ///
    /// # Returns
    ///
    /// * `Ok(())` if the insertion is successful
    /// * `Err(BridgeError)` if the store is not configured or rejects the row
    async fn insert(&self, item: &T) -> Result<(), BridgeError>;
}
