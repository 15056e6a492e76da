use serde_json::{Map, Value};

use crate::error::HarnessError;
use crate::use_cases::ports::EventSink;

/// Sink that writes events to standard output.
///
/// Plain events are printed as-is; events with structured fields are
/// rendered as a single JSON object holding the message and the fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink;

impl ConsoleSink {
    pub fn new() -> Self {
        Self
    }

    fn render(message: &str, fields: &[(&str, Value)]) -> Result<String, HarnessError> {
        let mut event = Map::new();
        event.insert("message".to_string(), Value::String(message.to_string()));
        for (key, value) in fields {
            event.insert((*key).to_string(), value.clone());
        }
        serde_json::to_string(&Value::Object(event))
            .map_err(|err| HarnessError::SerializationError(err.to_string()))
    }

    fn print_with(message: &str, fields: &[(&str, Value)]) {
        match Self::render(message, fields) {
            Ok(line) => println!("{line}"),
            Err(err) => eprintln!("could not encode log event: {err}"),
        }
    }
}

impl EventSink for ConsoleSink {
    fn info(&self, message: &str) {
        println!("{message}");
    }

    fn info_with(&self, message: &str, fields: &[(&str, Value)]) {
        Self::print_with(message, fields);
    }

    fn warn(&self, message: &str) {
        println!("{message}");
    }

    fn warn_with(&self, message: &str, fields: &[(&str, Value)]) {
        Self::print_with(message, fields);
    }

    fn error(&self, message: &str) {
        println!("{message}");
    }

    fn error_with(&self, message: &str, fields: &[(&str, Value)]) {
        Self::print_with(message, fields);
    }

    fn plain(&self, message: &str) {
        println!("{message}");
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_render_includes_message_and_fields() {
        let line = ConsoleSink::render(
            "received write request",
            &[("request", json!("AAEC")), ("count", json!(3))],
        )
        .unwrap();

        let event: Value = serde_json::from_str(&line).unwrap();
        assert_eq!(event["message"], "received write request");
        assert_eq!(event["request"], "AAEC");
        assert_eq!(event["count"], 3);
    }

    #[test]
    fn test_render_without_fields_is_just_the_message() {
        let line = ConsoleSink::render("starting", &[]).unwrap();

        let event: Value = serde_json::from_str(&line).unwrap();
        assert_eq!(event, json!({ "message": "starting" }));
    }
}
