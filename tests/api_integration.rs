//! Integration tests for the HTTP API
//!
//! Spins the real axum router on a loopback listener and drives it with
//! reqwest. Conversion endpoints are exercised up to their validation layer,
//! so no external tool binaries are needed.
//!
//! Run: cargo test --test api_integration

use std::sync::Arc;
use transformix_lib::capabilities::CapabilityRegistry;
use transformix_lib::models::{Capability, CapabilityKind, FileFilter, InputShape};
use transformix_lib::server::{build_router, ServerState, DEFAULT_BODY_LIMIT};

/// Bind the full router to an ephemeral loopback port.
async fn spawn_server() -> String {
    let registry = Arc::new(CapabilityRegistry::new());
    let app = build_router(ServerState::new(registry), DEFAULT_BODY_LIMIT);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

fn pdf_part() -> reqwest::multipart::Part {
    reqwest::multipart::Part::bytes(b"%PDF-1.4 not really".to_vec()).file_name("input.pdf")
}

// ============================================================================
// Capability Listing
// ============================================================================

#[tokio::test]
async fn test_listing_returns_all_capabilities_in_order() {
    let server = spawn_server().await;

    let listing: Vec<Capability> = reqwest::get(format!("{}/", server))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(listing.len(), CapabilityKind::ALL.len());
    assert_eq!(listing[0].endpoint, "/convert/word-to-pdf");
    assert_eq!(listing[0].name, "Word to PDF");

    let endpoints: Vec<_> = listing.iter().map(|c| c.endpoint.as_str()).collect();
    let expected: Vec<_> = CapabilityKind::ALL.iter().map(|k| k.endpoint()).collect();
    assert_eq!(endpoints, expected);
}

#[tokio::test]
async fn test_listing_carries_form_schemas() {
    let server = spawn_server().await;

    let listing: Vec<Capability> = reqwest::get(format!("{}/", server))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let merge = listing.iter().find(|c| c.endpoint == "/pdf/merge").unwrap();
    assert_eq!(
        merge.form.input,
        InputShape::FileList {
            accept: FileFilter::Pdf
        }
    );

    let split = listing.iter().find(|c| c.endpoint == "/pdf/split").unwrap();
    assert_eq!(split.form.input, InputShape::SingleFile);
    assert!(split.form.field("from_page").is_some());
}

// ============================================================================
// Validation Errors
// ============================================================================

#[tokio::test]
async fn test_unknown_endpoint_is_404() {
    let server = spawn_server().await;

    let form = reqwest::multipart::Form::new().part("file", pdf_part());
    let response = reqwest::Client::new()
        .post(format!("{}/pdf/frobnicate", server))
        .multipart(form)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_merge_without_files_is_400_with_detail() {
    let server = spawn_server().await;

    let form = reqwest::multipart::Form::new().text("unused", "x");
    let response = reqwest::Client::new()
        .post(format!("{}/pdf/merge", server))
        .multipart(form)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["detail"], "no files uploaded");
}

#[tokio::test]
async fn test_protect_without_password_is_400() {
    let server = spawn_server().await;

    let form = reqwest::multipart::Form::new().part("file", pdf_part());
    let response = reqwest::Client::new()
        .post(format!("{}/pdf/protect", server))
        .multipart(form)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["detail"], "missing required field 'password'");
}

#[tokio::test]
async fn test_html_to_pdf_without_inputs_is_400() {
    let server = spawn_server().await;

    let form = reqwest::multipart::Form::new().text("url", "");
    let response = reqwest::Client::new()
        .post(format!("{}/convert/html-to-pdf", server))
        .multipart(form)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["detail"], "Provide html or url");
}

#[tokio::test]
async fn test_compress_with_malformed_quality_is_400() {
    let server = spawn_server().await;

    let form = reqwest::multipart::Form::new()
        .part("file", pdf_part())
        .text("quality", "very high");
    let response = reqwest::Client::new()
        .post(format!("{}/compress/pdf", server))
        .multipart(form)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["detail"], "field 'quality' must be a number");
}

#[tokio::test]
async fn test_blank_fields_fall_back_to_defaults() {
    // A blank quality part must behave exactly like an absent one: the
    // request passes numeric validation and only fails later, at the tool
    // boundary (400 from a tool run on garbage, or 500 when the tool is not
    // installed), never with a field validation message.
    let server = spawn_server().await;

    let form = reqwest::multipart::Form::new()
        .part("file", pdf_part())
        .text("quality", "");
    let response = reqwest::Client::new()
        .post(format!("{}/compress/pdf", server))
        .multipart(form)
        .send()
        .await
        .unwrap();

    assert!(!response.status().is_success());
    let body: serde_json::Value = response.json().await.unwrap();
    let detail = body["detail"].as_str().unwrap();
    assert!(!detail.contains("must be a number"), "got: {}", detail);
}
