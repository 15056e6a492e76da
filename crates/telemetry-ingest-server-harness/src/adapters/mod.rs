pub mod gateways;
pub mod sinks;
