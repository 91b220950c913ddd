//! # Event Store Records

//! This module defines the `EventRecord` enum, the single row shape written to the event store.
//! A record is either a reading of an analog signal or a labelled operational event raised by a rule.
//! Field names follow the store's Spanish-language schema (`tipo`, `signal_id`, `sensor`, `valor`, ...).

use chrono::{DateTime, SecondsFormat, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize, Serializer};

/// Operating mode recorded with an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
pub enum OperatingMode {
    #[display("automático")]
    #[serde(rename = "automático")]
    Automatic,
    #[display("manual")]
    #[serde(rename = "manual")]
    Manual,
}

/// A row of the event store, discriminated by `tipo`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tipo")]
pub enum EventRecord {
    /// An analog value, written on every pass where the signal is reported
    #[serde(rename = "lectura")]
    Reading {
        signal_id: String,
        /// Descriptive label of the sensor
        sensor: String,
        /// `null` when the reported value carries no leading number
        valor: Option<f64>,
        unidad: String,
        #[serde(serialize_with = "serialize_timestamp")]
        timestamp: DateTime<Utc>,
    },
    /// A labelled operational event raised by a digital transition
    #[serde(rename = "evento")]
    Event {
        maquina: String,
        modo_operacion: OperatingMode,
        comentario: String,
        signal_id: String,
        #[serde(serialize_with = "serialize_timestamp")]
        timestamp: DateTime<Utc>,
    },
}

impl EventRecord {
    pub fn reading(signal_id: &str, sensor: &str, valor: Option<f64>, unidad: &str, timestamp: DateTime<Utc>) -> Self {
        EventRecord::Reading {
            signal_id: signal_id.to_string(),
            sensor: sensor.to_string(),
            valor,
            unidad: unidad.to_string(),
            timestamp,
        }
    }

    pub fn event(maquina: &str, modo_operacion: OperatingMode, comentario: &str, signal_id: &str, timestamp: DateTime<Utc>) -> Self {
        EventRecord::Event {
            maquina: maquina.to_string(),
            modo_operacion,
            comentario: comentario.to_string(),
            signal_id: signal_id.to_string(),
            timestamp,
        }
    }

    pub fn signal_id(&self) -> &str {
        match self {
            EventRecord::Reading { signal_id, .. } | EventRecord::Event { signal_id, .. } => signal_id,
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            EventRecord::Reading { timestamp, .. } | EventRecord::Event { timestamp, .. } => *timestamp,
        }
    }

    /// The `tipo` discriminator as stored
    pub fn kind(&self) -> &'static str {
        match self {
            EventRecord::Reading { .. } => "lectura",
            EventRecord::Event { .. } => "evento",
        }
    }

    pub fn is_event(&self) -> bool {
        matches!(self, EventRecord::Event { .. })
    }

    /// The comment of an event, `None` for readings
    pub fn comment(&self) -> Option<&str> {
        match self {
            EventRecord::Event { comentario, .. } => Some(comentario),
            EventRecord::Reading { .. } => None,
        }
    }
}

/// ISO-8601 in UTC with millisecond precision, e.g. `2024-05-01T12:00:00.000Z`
fn serialize_timestamp<S: Serializer>(timestamp: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&timestamp.to_rfc3339_opts(SecondsFormat::Millis, true))
}
