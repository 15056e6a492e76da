use std::collections::BTreeMap;
use std::path::PathBuf;

use super::ServiceKind;

/// Which structured-event sink the harness hands to its mock services.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkKind {
    /// Human-readable lines on standard output.
    Console,
    /// One JSON-lines file per run, under the configured target directory.
    File,
}

impl Default for SinkKind {
    fn default() -> Self {
        Self::Console
    }
}

/// How `Harness::run` decides when to stop serving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Serve until the process receives an interrupt signal, then drain.
    ServeUntilSignal,
    /// Serve indefinitely; the embedding test shuts the harness down itself.
    ServeOnce,
}

impl Default for RunMode {
    fn default() -> Self {
        Self::ServeUntilSignal
    }
}

/// Configuration for a harness run.
///
/// The default serves every known service kind on its well-known port,
/// logging to the console, until interrupted.
#[derive(Debug, Clone, PartialEq)]
pub struct HarnessConfig {
    pub sink: SinkKind,
    pub target_directory: Option<PathBuf>,
    pub services: Vec<ServiceKind>,
    pub host: String,
    pub ports: BTreeMap<ServiceKind, u16>,
    pub run_mode: RunMode,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            sink: SinkKind::default(),
            target_directory: None,
            services: ServiceKind::ALL.to_vec(),
            host: "localhost".to_string(),
            ports: BTreeMap::new(),
            run_mode: RunMode::default(),
        }
    }
}

impl HarnessConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sink(mut self, sink: SinkKind) -> Self {
        self.sink = sink;
        self
    }

    pub fn with_target_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.target_directory = Some(directory.into());
        self
    }

    pub fn with_services(mut self, services: impl Into<Vec<ServiceKind>>) -> Self {
        self.services = services.into();
        self
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Overrides the listen port for one service kind. Port 0 asks the
    /// operating system for a free port; the bound address is reported by
    /// the running instance.
    pub fn with_port(mut self, kind: ServiceKind, port: u16) -> Self {
        self.ports.insert(kind, port);
        self
    }

    pub fn with_run_mode(mut self, run_mode: RunMode) -> Self {
        self.run_mode = run_mode;
        self
    }

    /// The port the given service kind should listen on, falling back to
    /// its well-known default when no override is set.
    pub fn port_for(&self, kind: ServiceKind) -> u16 {
        self.ports
            .get(&kind)
            .copied()
            .unwrap_or_else(|| kind.default_port())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_enables_every_service() {
        let config = HarnessConfig::new();

        assert_eq!(config.sink, SinkKind::Console);
        assert_eq!(config.services, vec![ServiceKind::Logging, ServiceKind::Metrics]);
        assert_eq!(config.host, "localhost");
        assert_eq!(config.run_mode, RunMode::ServeUntilSignal);
    }

    #[test]
    fn test_port_for_falls_back_to_the_well_known_port() {
        let config = HarnessConfig::new();

        assert_eq!(config.port_for(ServiceKind::Logging), 18888);
        assert_eq!(config.port_for(ServiceKind::Metrics), 18889);
    }

    #[test]
    fn test_port_override_applies_to_one_kind_only() {
        let config = HarnessConfig::new().with_port(ServiceKind::Logging, 0);

        assert_eq!(config.port_for(ServiceKind::Logging), 0);
        assert_eq!(config.port_for(ServiceKind::Metrics), 18889);
    }

    #[test]
    fn test_builder_methods_chain() {
        let config = HarnessConfig::new()
            .with_sink(SinkKind::File)
            .with_target_directory("/tmp/telemetry-runs")
            .with_services([ServiceKind::Metrics])
            .with_host("127.0.0.1")
            .with_run_mode(RunMode::ServeOnce);

        assert_eq!(config.sink, SinkKind::File);
        assert_eq!(
            config.target_directory,
            Some(PathBuf::from("/tmp/telemetry-runs"))
        );
        assert_eq!(config.services, vec![ServiceKind::Metrics]);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.run_mode, RunMode::ServeOnce);
    }
}
