//! Simple example demonstrating basic usage of telemetry-ingest-server-harness
//!
//! This example shows how to:
//! - Start the logging mock service on an OS-assigned port
//! - Write a log entry batch to it over gRPC
//! - Drain the captured requests and the caller identity
//! - Shut the harness down gracefully

use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use telemetry_ingest_server_harness::prelude::*;

/// Helper to create a gRPC request body with length prefix
fn grpc_request_body(data: &[u8]) -> Vec<u8> {
    let mut body = Vec::with_capacity(5 + data.len());
    body.push(0); // No compression
    body.extend_from_slice(&(data.len() as u32).to_be_bytes());
    body.extend_from_slice(data);
    body
}

#[tokio::main]
async fn main() -> Result<(), HarnessError> {
    println!("Starting the telemetry mock services...");

    let config = HarnessConfig::new()
        .with_host("127.0.0.1")
        .with_services([ServiceKind::Logging])
        .with_port(ServiceKind::Logging, 0);
    let harness = Harness::start(config).await?;

    let instance = harness.instance(ServiceKind::Logging).unwrap();
    let captures = instance.captures();
    println!("Logging backend is ready at http://{}\n", instance.endpoint());

    // Create HTTP/2 client for gRPC requests
    let client = Client::builder(TokioExecutor::new())
        .http2_only(true)
        .build_http();

    println!("Writing a log entry batch...");
    let request = hyper::Request::builder()
        .method("POST")
        .uri(format!(
            "http://{}{}",
            instance.endpoint(),
            ServiceKind::Logging.rpc_path()
        ))
        .header("content-type", "application/grpc")
        .header("user-agent", "simple-example/0.1")
        .body(Full::new(Bytes::from(grpc_request_body(&[10, 20, 30]))))
        .unwrap();

    let response = client.request(request).await.expect("Request failed");
    println!("Response status: {}\n", response.status());
    let _ = response.into_body().collect().await.unwrap();

    println!("=== Captured Requests ===");
    for (i, captured) in captures.drain_all().iter().enumerate() {
        println!(
            "Request {}: {} ({} payload bytes)",
            i + 1,
            captured.kind,
            captured.message.data.len()
        );
    }
    println!("Caller identity: {}", captures.take_caller_identity());

    harness.shutdown().await;
    println!("Harness stopped.");

    Ok(())
}
