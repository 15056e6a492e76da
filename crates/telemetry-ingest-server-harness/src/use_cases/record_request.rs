use std::sync::Arc;

use serde_json::json;

use crate::entities::{CaptureStore, CapturedRequest, Message, ServiceKind};
use crate::use_cases::ports::EventSink;

/// Handles one inbound write request on behalf of a mock service: reports
/// it through the sink, captures it for later inspection, and produces the
/// canned empty response the real backend would send on success.
#[derive(Clone)]
pub struct RequestRecorder {
    kind: ServiceKind,
    captures: Arc<CaptureStore>,
    sink: Arc<dyn EventSink>,
}

impl RequestRecorder {
    pub fn new(kind: ServiceKind, captures: Arc<CaptureStore>, sink: Arc<dyn EventSink>) -> Self {
        Self {
            kind,
            captures,
            sink,
        }
    }

    pub fn kind(&self) -> ServiceKind {
        self.kind
    }

    /// Accepts any payload without inspecting it. The raw bytes go into the
    /// sink event base64-encoded, alongside the caller identity.
    pub fn record(&self, payload: Message, caller_identity: String) -> Message {
        self.sink.info_with(
            &format!("received {} write request", self.kind),
            &[
                ("request", json!(base64::encode(&payload.data))),
                ("metadata", json!({ "user-agent": caller_identity.as_str() })),
            ],
        );
        self.captures
            .append(CapturedRequest::new(self.kind, payload), caller_identity);
        Message::empty()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use serde_json::Value;

    use super::*;

    #[derive(Default)]
    struct MemorySink {
        events: Mutex<Vec<(String, Value)>>,
    }

    impl MemorySink {
        fn push(&self, message: &str, fields: &[(&str, Value)]) {
            let mut event = serde_json::Map::new();
            for (key, value) in fields {
                event.insert((*key).to_string(), value.clone());
            }
            if let Ok(mut events) = self.events.lock() {
                events.push((message.to_string(), Value::Object(event)));
            }
        }

        fn events(&self) -> Vec<(String, Value)> {
            self.events
                .lock()
                .map(|events| events.clone())
                .unwrap_or_default()
        }
    }

    impl EventSink for MemorySink {
        fn info(&self, message: &str) {
            self.push(message, &[]);
        }

        fn info_with(&self, message: &str, fields: &[(&str, Value)]) {
            self.push(message, fields);
        }

        fn warn(&self, message: &str) {
            self.push(message, &[]);
        }

        fn warn_with(&self, message: &str, fields: &[(&str, Value)]) {
            self.push(message, fields);
        }

        fn error(&self, message: &str) {
            self.push(message, &[]);
        }

        fn error_with(&self, message: &str, fields: &[(&str, Value)]) {
            self.push(message, fields);
        }

        fn plain(&self, message: &str) {
            self.push(message, &[]);
        }
    }

    fn recorder(kind: ServiceKind) -> (RequestRecorder, Arc<CaptureStore>, Arc<MemorySink>) {
        let captures = Arc::new(CaptureStore::new());
        let sink = Arc::new(MemorySink::default());
        let recorder = RequestRecorder::new(kind, captures.clone(), sink.clone());
        (recorder, captures, sink)
    }

    #[test]
    fn test_record_captures_and_answers_with_the_empty_response() {
        let (recorder, captures, _) = recorder(ServiceKind::Logging);

        let response = recorder.record(Message::new(vec![1, 2, 3]), "client/1.0".to_string());

        assert_eq!(response, Message::empty());
        let drained = captures.drain_all();
        assert_eq!(drained.len(), 1);
        assert_eq!(drained[0].kind, ServiceKind::Logging);
        assert_eq!(drained[0].message, Message::new(vec![1, 2, 3]));
        assert_eq!(captures.take_caller_identity(), "client/1.0");
    }

    #[test]
    fn test_record_reports_payload_and_metadata_through_the_sink() {
        let (recorder, _, sink) = recorder(ServiceKind::Logging);

        recorder.record(Message::new(vec![0, 1, 2]), "client/1.0".to_string());

        let events = sink.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].0, "received logging write request");
        assert_eq!(events[0].1["request"], base64::encode([0u8, 1, 2]));
        assert_eq!(events[0].1["metadata"]["user-agent"], "client/1.0");
    }

    #[test]
    fn test_recorder_reports_its_own_service_kind() {
        let (recorder, _, sink) = recorder(ServiceKind::Metrics);

        recorder.record(Message::empty(), String::new());

        assert_eq!(sink.events()[0].0, "received metrics write request");
    }
}
