// SPDX-FileCopyrightText: 2026 Parkdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests running the `parkdesk` binary against a mock backend.
//!
//! Each test starts its own MockServer and points the binary at it through
//! PARKDESK_API_URL. HOME and XDG_CONFIG_HOME are redirected so no operator
//! config file is picked up.

use std::path::PathBuf;
use std::process::Output;

use serde_json::json;
use tokio::process::Command;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn sandbox() -> PathBuf {
    let dir = PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join("parkdesk-e2e");
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

async fn parkdesk(server: &MockServer, args: &[&str]) -> Output {
    let dir = sandbox();
    Command::new(env!("CARGO_BIN_EXE_parkdesk"))
        .args(args)
        .current_dir(&dir)
        .env("HOME", &dir)
        .env("XDG_CONFIG_HOME", &dir)
        .env("PARKDESK_API_URL", server.uri())
        .env_remove("RUST_LOG")
        .output()
        .await
        .unwrap()
}

fn parking_json(time_out: Option<&str>, fee: Option<f64>) -> serde_json::Value {
    json!({
        "id": 7,
        "parkingSlotId": 3,
        "vehicleId": 11,
        "timeIn": "2024-03-01T08:00:00.000Z",
        "timeOut": time_out,
        "fee": fee,
        "__vehicle__": { "id": 11, "plateNumber": "ABC123", "vehicleType": "small" },
        "__parkingSlot__": { "id": 3, "name": "S-1", "parkingType": "small", "status": "occupied" }
    })
}

#[tokio::test]
async fn list_prints_parking_table() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/parkings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([parking_json(None, None)])))
        .mount(&server)
        .await;

    let output = parkdesk(&server, &["list", "--plain"]).await;

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Plate Number"));
    assert!(stdout.contains("ABC123"));
    assert!(stdout.contains("NA"));
    assert!(stdout.contains("Time Out"));
}

#[tokio::test]
async fn list_json_outputs_rows() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/parkings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([parking_json(
            Some("2024-03-01T09:00:00.000Z"),
            Some(40.0),
        )])))
        .mount(&server)
        .await;

    let output = parkdesk(&server, &["list", "--json"]).await;

    assert!(output.status.success());
    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(rows[0]["plate_number"], "ABC123");
    assert_eq!(rows[0]["action"], "Timed Out");
    assert_eq!(rows[0]["fee"], 40.0);
}

#[tokio::test]
async fn time_out_with_yes_prints_fee() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/parkings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([parking_json(None, None)])))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/parkings"))
        .and(body_json(json!({ "entryPointId": 0, "vehicleId": 11, "action": "timeOut" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(parking_json(
            Some("2024-03-01T12:00:00.000Z"),
            Some(60.0),
        )))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/parkings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([parking_json(
            Some("2024-03-01T12:00:00.000Z"),
            Some(60.0),
        )])))
        .mount(&server)
        .await;

    let output = parkdesk(&server, &["time-out", "7", "--yes", "--plain"]).await;

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("60.00"));
    assert!(stdout.contains("Timed Out"));
}

#[tokio::test]
async fn backend_messages_are_printed_and_exit_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/entrypoints"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": 1, "name": "Entry A" }])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/vehicles/plateNumber/ABC123"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/vehicles"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "message": ["first problem", "second problem"]
        })))
        .mount(&server)
        .await;

    let output = parkdesk(
        &server,
        &["time-in", "--plate", "ABC123", "--vehicle-type", "small", "--entry-point", "1", "--plain"],
    )
    .await;

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error: first problem"));
    assert!(stderr.contains("error: second problem"));
}

#[tokio::test]
async fn missing_config_file_fails_before_any_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let output = parkdesk(&server, &["list", "--config", "/nonexistent/parkdesk.toml"]).await;

    assert!(!output.status.success());
}
