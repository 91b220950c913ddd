use secrecy::Secret;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use plc_shadow_bridge::config::{HttpSettings, ShadowSettings};
use plc_shadow_bridge::errors::BridgeError;
use plc_shadow_bridge::models::DesiredPatch;
use plc_shadow_bridge::services::{IotShadowClient, ShadowService};

const SHADOW_PATH: &str = "/things/HornoConeccionAWS/shadow";

fn settings(server: &MockServer) -> ShadowSettings {
    ShadowSettings {
        endpoint: Url::parse(&server.uri()).unwrap(),
        region: "us-east-1".to_string(),
        thing_name: "HornoConeccionAWS".to_string(),
        access_key_id: Some("AKIDEXAMPLE".to_string()),
        secret_access_key: Some(Secret::new("wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY".to_string())),
        session_token: None,
    }
}

async fn client(settings: &ShadowSettings) -> IotShadowClient {
    IotShadowClient::new(settings, &HttpSettings::default()).await.unwrap()
}

#[tokio::test]
async fn get_shadow_parses_reported_and_desired() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SHADOW_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "state": {
                "reported": { "M..1:22-1": "00", "AI..4:1-1": "180.5" },
                "desired": { "M..1:22-1": "01" }
            },
            "metadata": {},
            "version": 42,
            "timestamp": 1714560000
        })))
        .expect(1)
        .mount(&server)
        .await;

    let document = client(&settings(&server)).await.get_shadow().await.unwrap();

    assert_eq!(document.version, Some(42));
    let merged = document.merged();
    assert_eq!(merged.get("M..1:22-1"), Some(&json!("01")));
    assert_eq!(merged.get("AI..4:1-1"), Some(&json!("180.5")));
    assert_eq!(document.reported().unwrap().value("M..1:22-1").as_deref(), Some("00"));
}

#[tokio::test]
async fn requests_are_signed_for_iotdata() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SHADOW_PATH))
        .and(header_exists("authorization"))
        .and(header_exists("x-amz-date"))
        .and(header("x-amz-security-token", "session-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "state": { "reported": {} } })))
        .expect(1)
        .mount(&server)
        .await;

    let settings = ShadowSettings {
        session_token: Some(Secret::new("session-token".to_string())),
        ..settings(&server)
    };
    client(&settings).await.get_shadow().await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let authorization = requests[0].headers.get("authorization").unwrap().to_str().unwrap().to_string();
    assert!(authorization.starts_with("AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/"));
    assert!(authorization.contains("/us-east-1/iotdata/aws4_request"));
}

#[tokio::test]
async fn update_shadow_sends_desired_patch() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SHADOW_PATH))
        .and(header_exists("authorization"))
        .and(body_json(json!({ "state": { "desired": { "setpoint": 200 } } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "state": { "desired": { "setpoint": 200 } } })))
        .expect(1)
        .mount(&server)
        .await;

    client(&settings(&server)).await
        .update_shadow(&DesiredPatch::single("setpoint", json!(200)))
        .await
        .unwrap();
}

#[tokio::test]
async fn error_status_maps_to_shadow_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SHADOW_PATH))
        .respond_with(
            ResponseTemplate::new(404)
                .insert_header("x-amzn-ErrorType", "ResourceNotFoundException")
                .set_body_json(json!({ "message": "No shadow exists with name: 'HornoConeccionAWS'" })),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(SHADOW_PATH))
        .respond_with(
            ResponseTemplate::new(403)
                .insert_header("x-amzn-ErrorType", "ForbiddenException")
                .set_body_json(json!({ "message": "Forbidden" })),
        )
        .mount(&server)
        .await;

    let client = client(&settings(&server)).await;

    let err = client.get_shadow().await.unwrap_err();
    assert!(matches!(err, BridgeError::ShadowError(_)), "unexpected error: {err}");

    let err = client.update_shadow(&DesiredPatch::single("a", json!(true))).await.unwrap_err();
    assert!(matches!(err, BridgeError::ShadowError(_)), "unexpected error: {err}");
}

#[tokio::test]
async fn malformed_payload_maps_to_payload_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SHADOW_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client(&settings(&server)).await.get_shadow().await.unwrap_err();

    assert!(matches!(err, BridgeError::ShadowPayloadError(_)), "unexpected error: {err}");
}

#[tokio::test]
async fn document_without_state_maps_to_payload_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SHADOW_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "version": 7, "metadata": {} })))
        .mount(&server)
        .await;

    let err = client(&settings(&server)).await.get_shadow().await.unwrap_err();

    assert!(matches!(err, BridgeError::ShadowPayloadError(_)), "unexpected error: {err}");
}
