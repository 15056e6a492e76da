//! Telemetry Ingest Server Harness
//!
//! A test harness that impersonates the gRPC write APIs of cloud telemetry
//! backends. Each mock service accepts any write request, captures it for
//! the test to inspect, reports it through a structured-event sink, and
//! answers with the empty response the real backend would send on success.
//!
//! # Example
//!
//! ```rust,no_run
//! use telemetry_ingest_server_harness::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), HarnessError> {
//!     // Bind the logging service on a port picked by the operating system
//!     let config = HarnessConfig::new()
//!         .with_services([ServiceKind::Logging])
//!         .with_port(ServiceKind::Logging, 0);
//!     let harness = Harness::start(config).await?;
//!
//!     let instance = harness.instance(ServiceKind::Logging).unwrap();
//!     println!("logging backend at {}", instance.endpoint());
//!
//!     // ... point a telemetry exporter at the endpoint and let it write ...
//!
//!     let captures = instance.captures();
//!     harness.shutdown().await;
//!
//!     for request in captures.drain_all() {
//!         println!("captured {} payload bytes", request.message.data.len());
//!     }
//!
//!     Ok(())
//! }
//! ```

mod adapters;
pub mod entities;
pub mod error;
pub mod use_cases;

pub use adapters::gateways::grpc::{GrpcGateway, ServiceInstance};
pub use adapters::sinks::{ConsoleSink, FileSink};
pub use error::HarnessError;

impl use_cases::Harness<ServiceInstance> {
    /// Binds one mock service per enabled kind on the default gRPC
    /// gateway, then starts serving on all of them. Embedders with their
    /// own wire layer go through [`Harness::start_with`] instead.
    ///
    /// [`Harness::start_with`]: use_cases::Harness::start_with
    pub async fn start(config: entities::HarnessConfig) -> Result<Self, HarnessError> {
        Self::start_with(GrpcGateway, config).await
    }
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::entities::{
        CaptureStore, CapturedRequest, HarnessConfig, Message, RunMode, ServiceKind, SinkKind,
    };
    pub use crate::error::HarnessError;
    pub use crate::use_cases::ports::{EventSink, Gateway, Instance, Severity};
    pub use crate::use_cases::Harness;
    pub use crate::{ConsoleSink, FileSink, GrpcGateway, ServiceInstance};
}
