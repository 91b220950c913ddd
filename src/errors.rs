/// # Bridge Errors
/// This module defines the `BridgeError` enum, which encapsulates all potential errors that can occur within the PLC shadow bridge.
/// The variants separate shadow-service, event-store and configuration failures so callers can log them meaningfully,
/// while the HTTP layer only ever surfaces the rendered message.


use thiserror::Error;
use std::io;

#[derive(Error, Debug)]
pub enum BridgeError {
    /// Represents transport failures while talking to the device-shadow service.
    #[error("Shadow service error: {0}")]
    ShadowError(String),

    /// Represents a shadow document that could not be interpreted.
    #[error("Malformed shadow payload: {0}")]
    ShadowPayloadError(String),

    /// Represents failures while inserting a record into the event store.
    #[error("Event store error: {0}")]
    StoreError(String),

    /// Represents a missing base URL or access key for the event store.
    #[error("Event store credentials missing: {0}")]
    StoreCredentialsMissing(String),

    /// Represents errors arising from misconfigurations or invalid settings.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Represents a request body that could not be understood.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Represents outbound HTTP failures that are not tied to one collaborator.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Represents standard input/output errors.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// Represents errors that occur during serialization or deserialization of data.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Represents an invalid URL built from configuration.
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),
}

impl From<config::ConfigError> for BridgeError {
    fn from(err: config::ConfigError) -> Self {
        BridgeError::ConfigError(err.to_string())
    }
}

pub type BridgeResult<T> = Result<T, BridgeError>;
