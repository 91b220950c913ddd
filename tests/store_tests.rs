use chrono::{TimeZone, Utc};
use secrecy::Secret;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use plc_shadow_bridge::config::{HttpSettings, StoreSettings};
use plc_shadow_bridge::errors::BridgeError;
use plc_shadow_bridge::models::{EventRecord, OperatingMode, EMERGENCY, TEMPERATURE};
use plc_shadow_bridge::repositories::{EventRecordRepository, Repository};
use plc_shadow_bridge::services::RestClient;

fn repository(server: &MockServer) -> EventRecordRepository {
    let store = StoreSettings {
        base_url: Some(server.uri()),
        api_key: Some(Secret::new("anon-key".to_string())),
        table: "eventos_industriales".to_string(),
    };
    let client = RestClient::from_settings(&store, &HttpSettings::default()).unwrap();
    assert!(client.is_some());
    EventRecordRepository::new(client, store.table)
}

#[tokio::test]
async fn inserts_event_with_store_headers() {
    let server = MockServer::start().await;
    let timestamp = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();

    Mock::given(method("POST"))
        .and(path("/rest/v1/eventos_industriales"))
        .and(header("apikey", "anon-key"))
        .and(header("authorization", "Bearer anon-key"))
        .and(body_json(json!({
            "tipo": "evento",
            "maquina": "Horno centrifugo",
            "modo_operacion": "manual",
            "comentario": "Emergencia en modo manual centrifugadora",
            "signal_id": "I..1:5-1",
            "timestamp": "2024-05-01T12:00:00.000Z"
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let record = EventRecord::event(
        "Horno centrifugo",
        OperatingMode::Manual,
        "Emergencia en modo manual centrifugadora",
        EMERGENCY,
        timestamp,
    );
    repository(&server).insert(&record).await.unwrap();
}

#[tokio::test]
async fn inserts_reading_row() {
    let server = MockServer::start().await;
    let timestamp = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();

    Mock::given(method("POST"))
        .and(path("/rest/v1/eventos_industriales"))
        .and(body_json(json!({
            "tipo": "lectura",
            "signal_id": "AI..4:1-1",
            "sensor": "Temperatura vulcanizadora",
            "valor": 181.5,
            "unidad": "°C",
            "timestamp": "2024-05-01T12:00:00.000Z"
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let record = EventRecord::reading(TEMPERATURE, "Temperatura vulcanizadora", Some(181.5), "°C", timestamp);
    repository(&server).insert(&record).await.unwrap();
}

#[tokio::test]
async fn rejected_insert_reports_status_reason() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/eventos_industriales"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "message": "Invalid API key" })))
        .mount(&server)
        .await;

    let record = EventRecord::reading(TEMPERATURE, "Temperatura vulcanizadora", Some(1.0), "°C", Utc::now());
    let err = repository(&server).insert(&record).await.unwrap_err();

    match err {
        BridgeError::StoreError(message) => assert_eq!(message, "Error guardando: Unauthorized"),
        other => panic!("Unexpected error: {other}"),
    }
}

#[tokio::test]
async fn missing_credentials_skip_the_network() {
    let repository = EventRecordRepository::new(None, "eventos_industriales");
    assert!(!repository.is_configured());

    let record = EventRecord::reading(TEMPERATURE, "Temperatura vulcanizadora", Some(1.0), "°C", Utc::now());
    let err = repository.insert(&record).await.unwrap_err();

    assert!(matches!(err, BridgeError::StoreCredentialsMissing(_)));
}
