#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Map, Value};

use plc_shadow_bridge::controllers::ShadowGateway;
use plc_shadow_bridge::errors::{BridgeError, BridgeResult};
use plc_shadow_bridge::models::{DesiredPatch, EventRecord, ShadowDocument};
use plc_shadow_bridge::repositories::Repository;
use plc_shadow_bridge::rules::create_default_evaluator;
use plc_shadow_bridge::services::ShadowService;
use plc_shadow_bridge::state_management::ChangeProcessor;

/// In-memory shadow: serves whatever document was last set and records every patch
#[derive(Default)]
pub struct FakeShadow {
    document: Mutex<Option<ShadowDocument>>,
    patches: Mutex<Vec<Value>>,
    unavailable: Mutex<bool>,
}

impl FakeShadow {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set_reported(&self, reported: Value) {
        self.set_document(json!({ "state": { "reported": reported } }));
    }

    pub fn set_document(&self, document: Value) {
        let document: ShadowDocument = serde_json::from_value(document).expect("valid shadow document");
        *self.document.lock().unwrap() = Some(document);
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        *self.unavailable.lock().unwrap() = unavailable;
    }

    pub fn patches(&self) -> Vec<Value> {
        self.patches.lock().unwrap().clone()
    }
}

#[async_trait]
impl ShadowService for FakeShadow {
    async fn get_shadow(&self) -> BridgeResult<ShadowDocument> {
        if *self.unavailable.lock().unwrap() {
            return Err(BridgeError::ShadowError("GetThingShadow failed: connection refused".to_string()));
        }
        Ok(self.document.lock().unwrap().clone().unwrap_or_default())
    }

    async fn update_shadow(&self, patch: &DesiredPatch) -> BridgeResult<()> {
        if *self.unavailable.lock().unwrap() {
            return Err(BridgeError::ShadowError("UpdateThingShadow failed: connection refused".to_string()));
        }
        self.patches.lock().unwrap().push(serde_json::to_value(patch)?);
        Ok(())
    }
}

/// In-memory store that keeps accepted records and rejects records of the listed signals
#[derive(Default)]
pub struct FakeStore {
    records: Mutex<Vec<EventRecord>>,
    rejected_signals: Mutex<Vec<String>>,
}

impl FakeStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn reject_signal(&self, signal_id: &str) {
        self.rejected_signals.lock().unwrap().push(signal_id.to_string());
    }

    pub fn records(&self) -> Vec<EventRecord> {
        self.records.lock().unwrap().clone()
    }

    pub fn events(&self) -> Vec<EventRecord> {
        self.records().into_iter().filter(|r| r.is_event()).collect()
    }

    pub fn readings(&self) -> Vec<EventRecord> {
        self.records().into_iter().filter(|r| !r.is_event()).collect()
    }

    pub fn clear(&self) {
        self.records.lock().unwrap().clear();
    }
}

#[async_trait]
impl Repository<EventRecord> for FakeStore {
    async fn insert(&self, item: &EventRecord) -> Result<(), BridgeError> {
        if self.rejected_signals.lock().unwrap().iter().any(|s| s == item.signal_id()) {
            return Err(BridgeError::StoreError("Error guardando: Bad Request".to_string()));
        }
        self.records.lock().unwrap().push(item.clone());
        Ok(())
    }
}

pub fn processor(shadow: &Arc<FakeShadow>, store: &Arc<dyn Repository<EventRecord>>) -> ChangeProcessor {
    let shadow: Arc<dyn ShadowService> = shadow.clone();
    ChangeProcessor::new(shadow, Arc::clone(store), create_default_evaluator())
}

pub fn gateway(shadow: &Arc<FakeShadow>, store: Arc<dyn Repository<EventRecord>>) -> Arc<ShadowGateway> {
    let processor = processor(shadow, &store);
    let shadow: Arc<dyn ShadowService> = shadow.clone();
    Arc::new(ShadowGateway::new(shadow, processor))
}

/// A reported state with every digital signal at "00" and both analog signals present
pub fn idle_reported() -> Map<String, Value> {
    let value = json!({
        "M..1:22-1": "00",
        "M..1:23-1": "00",
        "Q..1:10-1": "00",
        "Q..1:8-1": "00",
        "Q..1:9-1": "00",
        "Q..1:12-1": "00",
        "I..1:5-1": "01",
        "AI..4:3-1": "2.5",
        "AI..4:1-1": "180.0"
    });
    match value {
        Value::Object(map) => map,
        _ => unreachable!(),
    }
}

pub fn with(mut reported: Map<String, Value>, changes: &[(&str, &str)]) -> Value {
    for (signal, value) in changes {
        reported.insert(signal.to_string(), Value::String(value.to_string()));
    }
    Value::Object(reported)
}
