mod gateway;
mod sink;

pub use gateway::{Gateway, Instance};
pub use sink::{EventSink, Severity};
