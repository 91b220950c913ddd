//! # REST Client

//! This module defines the `RestClient` struct, a thin wrapper over `reqwest` for the PostgREST-style
//! event store. It owns the base URL and access key, attaches the store's authentication headers to every
//! request, and turns non-success statuses into `BridgeError::StoreError`.

use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::Serialize;
use url::Url;
use crate::config::{HttpSettings, StoreSettings};
use crate::errors::{BridgeError, BridgeResult};

/// Represents an authenticated client for the REST event store
#[derive(Debug, Clone)]
pub struct RestClient {
    client: Client,
    /// Base URL of the store, always ending in `/`
    base_url: Url,
    api_key: Secret<String>,
}

impl RestClient {
    /// Creates a new `RestClient`
    ///
    /// # Arguments
    ///
    /// * `base_url`: The store's base URL, e.g. `https://project.supabase.co`
    /// * `api_key`: The key sent as `apikey` and as bearer token
    /// * `http`: Shared outbound HTTP settings
    ///
    /// # Returns
    ///
    /// * `Ok(Self)`: The created client
    /// * `Err(BridgeError)`: If the base URL does not parse or the HTTP client cannot be built
    pub fn new(base_url: &str, api_key: Secret<String>, http: &HttpSettings) -> BridgeResult<Self> {
        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let mut builder = Client::builder();
        if let Some(timeout) = http.request_timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url,
            api_key,
        })
    }

    /// Builds a client from store settings, `None` when the base URL or the key is missing
    pub fn from_settings(store: &StoreSettings, http: &HttpSettings) -> BridgeResult<Option<Self>> {
        match (&store.base_url, &store.api_key) {
            (Some(base_url), Some(api_key)) => Ok(Some(Self::new(base_url, api_key.clone(), http)?)),
            _ => Ok(None),
        }
    }

    /// The URL of a table under the store's REST prefix (`rest/v1/{table}`)
    pub fn table_url(&self, table: &str) -> BridgeResult<Url> {
        Ok(self.base_url.join(&format!("rest/v1/{}", table))?)
    }

    /// Posts a JSON body to a table
    ///
    /// # Arguments
    ///
    /// * `table`: The target table
    /// * `body`: Any serializable row
    ///
    /// # Returns
    ///
    /// * `Ok(())`: If the store answered with a success status
    /// * `Err(BridgeError)`: `StoreError` on transport failure or a non-success status
    pub async fn post_json<T: Serialize + ?Sized>(&self, table: &str, body: &T) -> BridgeResult<()> {
        let url = self.table_url(table)?;
        let key = self.api_key.expose_secret();

        let response = self.client
            .post(url)
            .header("apikey", key.as_str())
            .bearer_auth(key)
            .json(body)
            .send()
            .await
            .map_err(|e| BridgeError::StoreError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(BridgeError::StoreError(format!(
                "Error guardando: {}",
                status.canonical_reason().unwrap_or(status.as_str())
            )));
        }
        Ok(())
    }
}
