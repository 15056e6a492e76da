use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::HarnessError;
use crate::use_cases::ports::{EventSink, Severity};

const MESSAGE_KEY: &str = "message";
const SEVERITY_KEY: &str = "severity";
const TIME_KEY: &str = "time";

/// Sink that appends events to a JSON-lines file.
///
/// Each harness run gets its own file, named `{prefix}-{uuid}.json` under
/// the target directory, so repeated runs never clobber each other. Every
/// event becomes exactly one line holding the event time, severity label,
/// message, and any structured fields.
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    file: Mutex<File>,
}

impl FileSink {
    /// Creates the target directory if needed and opens a fresh event file
    /// in it.
    pub fn create(directory: impl AsRef<Path>, prefix: &str) -> Result<Self, HarnessError> {
        let directory = directory.as_ref();
        fs::create_dir_all(directory).map_err(|err| {
            HarnessError::ConfigurationError(format!(
                "could not create {}: {err}",
                directory.display()
            ))
        })?;

        let path = directory.join(format!("{prefix}-{}.json", Uuid::new_v4()));
        let file = File::create(&path).map_err(|err| {
            HarnessError::ConfigurationError(format!("could not create {}: {err}", path.display()))
        })?;
        tracing::info!(path = %path.display(), "writing structured events to file");

        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    /// Where this sink writes its events.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn record(&self, severity: Severity, message: &str, fields: &[(&str, Value)]) {
        if let Err(err) = self.try_record(severity, message, fields) {
            eprintln!(
                "could not record log event to {}: {err}",
                self.path.display()
            );
        }
    }

    fn try_record(
        &self,
        severity: Severity,
        message: &str,
        fields: &[(&str, Value)],
    ) -> Result<(), HarnessError> {
        let mut event = Map::new();
        event.insert(
            TIME_KEY.to_string(),
            Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)),
        );
        event.insert(
            SEVERITY_KEY.to_string(),
            Value::String(severity.label().to_string()),
        );
        event.insert(MESSAGE_KEY.to_string(), Value::String(message.to_string()));
        for (key, value) in fields {
            event.insert((*key).to_string(), value.clone());
        }
        let line = serde_json::to_string(&Value::Object(event))
            .map_err(|err| HarnessError::SerializationError(err.to_string()))?;

        let mut file = self
            .file
            .lock()
            .map_err(|_| HarnessError::SerializationError("event file lock poisoned".to_string()))?;
        writeln!(file, "{line}")?;
        file.flush()?;
        Ok(())
    }
}

impl EventSink for FileSink {
    fn info(&self, message: &str) {
        self.record(Severity::Info, message, &[]);
    }

    fn info_with(&self, message: &str, fields: &[(&str, Value)]) {
        self.record(Severity::Info, message, fields);
    }

    fn warn(&self, message: &str) {
        self.record(Severity::Warning, message, &[]);
    }

    fn warn_with(&self, message: &str, fields: &[(&str, Value)]) {
        self.record(Severity::Warning, message, fields);
    }

    fn error(&self, message: &str) {
        self.record(Severity::Error, message, &[]);
    }

    fn error_with(&self, message: &str, fields: &[(&str, Value)]) {
        self.record(Severity::Error, message, fields);
    }

    fn plain(&self, message: &str) {
        self.record(Severity::Default, message, &[]);
    }
}
