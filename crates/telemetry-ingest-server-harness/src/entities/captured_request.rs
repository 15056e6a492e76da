use super::{Message, ServiceKind};

/// A write request captured by one mock service instance.
///
/// Immutable once captured; owned by the capture store that appended it
/// until a drain hands it to the test.
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedRequest {
    pub kind: ServiceKind,
    pub message: Message,
}

impl CapturedRequest {
    pub fn new(kind: ServiceKind, message: Message) -> Self {
        Self { kind, message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_captured_request_new() {
        let req = CapturedRequest::new(ServiceKind::Logging, Message::new(vec![1, 2, 3]));
        assert_eq!(req.kind, ServiceKind::Logging);
        assert_eq!(req.message.data, vec![1, 2, 3]);
    }
}
