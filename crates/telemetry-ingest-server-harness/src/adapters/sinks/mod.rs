mod console;
mod file;

pub use console::ConsoleSink;
pub use file::FileSink;

use std::sync::Arc;

use crate::entities::{HarnessConfig, ServiceKind, SinkKind};
use crate::error::HarnessError;
use crate::use_cases::ports::EventSink;

/// Builds the sink one service instance reports through, per the harness
/// configuration. Each instance of a file-sink harness gets its own file,
/// prefixed with the service kind.
pub fn for_config(
    config: &HarnessConfig,
    kind: ServiceKind,
) -> Result<Arc<dyn EventSink>, HarnessError> {
    match config.sink {
        SinkKind::Console => Ok(Arc::new(ConsoleSink::new())),
        SinkKind::File => {
            let directory = config.target_directory.as_ref().ok_or_else(|| {
                HarnessError::ConfigurationError("file sink requires a target directory".to_string())
            })?;
            Ok(Arc::new(FileSink::create(directory, kind.file_prefix())?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_sink_needs_no_directory() {
        let config = HarnessConfig::new();

        assert!(for_config(&config, ServiceKind::Logging).is_ok());
    }

    #[test]
    fn test_file_sink_without_directory_is_rejected() {
        let config = HarnessConfig::new().with_sink(SinkKind::File);

        let result = for_config(&config, ServiceKind::Logging);
        assert!(matches!(result, Err(HarnessError::ConfigurationError(_))));
    }

    #[test]
    fn test_file_sink_uses_the_target_directory() {
        let directory = tempfile::tempdir().unwrap();
        let config = HarnessConfig::new()
            .with_sink(SinkKind::File)
            .with_target_directory(directory.path());

        let sink = for_config(&config, ServiceKind::Metrics).unwrap();
        sink.info("ready");

        let written: Vec<_> = std::fs::read_dir(directory.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(written.len(), 1);
        assert!(written[0].starts_with("metrics-"));
    }
}
