use serde_json::Value;

/// Severity attached to a structured event.
///
/// The labels mirror the levels telemetry backends assign to log entries,
/// including `DEFAULT` for events recorded without an assigned severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Debug,
    Info,
    Warning,
    Error,
    Default,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
            Severity::Default => "DEFAULT",
        }
    }
}

/// Trait for the structured-event sinks mock services report through
///
/// Every event carries a message; the `_with` variants attach extra
/// structured fields, rendered in the order given. Implementations must not
/// panic when they cannot write an event: a sink failure is reported on
/// stderr and the harness keeps serving.
pub trait EventSink: Send + Sync {
    /// Record an informational event.
    fn info(&self, message: &str);

    /// Record an informational event with structured fields.
    fn info_with(&self, message: &str, fields: &[(&str, Value)]);

    /// Record a warning event.
    fn warn(&self, message: &str);

    /// Record a warning event with structured fields.
    fn warn_with(&self, message: &str, fields: &[(&str, Value)]);

    /// Record an error event.
    fn error(&self, message: &str);

    /// Record an error event with structured fields.
    fn error_with(&self, message: &str, fields: &[(&str, Value)]);

    /// Record an event with no assigned severity.
    fn plain(&self, message: &str);
}
