mod server;

pub use server::{GrpcGateway, ServiceInstance};
