//! Integration tests for the client flow
//!
//! Runs the registry client, upload form, and transfer handler against the
//! real server over loopback: discovery, schema-driven form assembly, and the
//! error-message extraction cascade.
//!
//! Run: cargo test --test client_flow_integration

use std::sync::Arc;
use transformix_lib::capabilities::CapabilityRegistry;
use transformix_lib::client::{RegistryClient, TransferHandler, UploadForm};
use transformix_lib::models::CapabilityKind;
use transformix_lib::server::{build_router, ServerState, DEFAULT_BODY_LIMIT};

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

#[tokio::test]
async fn test_discovery_yields_ordered_capabilities() {
    let server = spawn_server().await;

    let registry = RegistryClient::fetch(&server).await;
    assert_eq!(registry.capabilities().len(), CapabilityKind::ALL.len());
    assert_eq!(registry.capabilities()[0].name, "Word to PDF");

    // Lookup by endpoint and by display name both resolve
    assert!(registry.find("/pdf/merge").is_some());
    assert!(registry.find("merge pdf").is_some());
}

#[tokio::test]
async fn test_discovery_against_dead_server_degrades_silently() {
    // An ephemeral port that was bound and dropped is guaranteed unused.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let registry = RegistryClient::fetch(&format!("http://{}", addr)).await;
    assert!(registry.is_empty());
}

#[tokio::test]
async fn test_server_detail_surfaces_through_transfer() {
    let server = spawn_server().await;
    let registry = RegistryClient::fetch(&server).await;

    // A draft that passes local validation but fails server-side: delete-pages
    // with a junk range list. The server rejects it before any tool runs and
    // the structured detail must come back verbatim.
    let scratch = tempfile::TempDir::new().unwrap();
    let input = scratch.path().join("input.pdf");
    std::fs::write(&input, b"%PDF-1.4 not really").unwrap();

    let capability = registry.find("/pdf/delete-pages").unwrap();
    let mut form = UploadForm::open(capability);
    form.add_file(&input);
    form.set_value("pages", "totally bogus").unwrap();
    let plan = form.begin_submit().unwrap();

    let transfer = TransferHandler::new(registry.api_root()).unwrap();
    let result = transfer.send(plan).await;
    form.finish_submit();

    let message = result.unwrap_err();
    assert!(
        message.contains("not a page number") || message.contains("qpdf"),
        "unexpected message: {}",
        message
    );
    assert!(!form.is_busy());
}

#[tokio::test]
async fn test_missing_password_round_trip() {
    let server = spawn_server().await;
    let registry = RegistryClient::fetch(&server).await;

    let scratch = tempfile::TempDir::new().unwrap();
    let input = scratch.path().join("secret.pdf");
    std::fs::write(&input, b"%PDF-1.4 not really").unwrap();

    // Bypass the form's own required check to prove the server enforces it
    // too and the detail survives extraction.
    let plan = transformix_lib::client::SubmissionPlan {
        endpoint: "/pdf/protect".to_string(),
        parts: vec![(
            "file".to_string(),
            transformix_lib::client::PartValue::File(input),
        )],
    };

    let transfer = TransferHandler::new(registry.api_root()).unwrap();
    let message = transfer.send(plan).await.unwrap_err();
    assert_eq!(message, "missing required field 'password'");
}
