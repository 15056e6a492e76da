mod capture_store;
mod captured_request;
mod config;
mod message;
mod service_kind;

pub use capture_store::CaptureStore;
pub use captured_request::CapturedRequest;
pub use config::{HarnessConfig, RunMode, SinkKind};
pub use message::Message;
pub use service_kind::ServiceKind;
