mod record_request;
mod run_harness;

pub mod ports;

pub use record_request::RequestRecorder;
pub use run_harness::Harness;
