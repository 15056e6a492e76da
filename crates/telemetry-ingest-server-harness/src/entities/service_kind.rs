use std::fmt;
use std::str::FromStr;

use crate::error::HarnessError;

/// The telemetry write APIs the harness can impersonate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ServiceKind {
    /// Cloud Logging ingestion (`WriteLogEntries`).
    Logging,
    /// Cloud Monitoring ingestion (`CreateTimeSeries`).
    Metrics,
}

impl ServiceKind {
    /// Every kind the harness knows, in default startup order.
    pub const ALL: [ServiceKind; 2] = [ServiceKind::Logging, ServiceKind::Metrics];

    /// Full gRPC request path of the mocked write operation.
    pub fn rpc_path(&self) -> &'static str {
        match self {
            ServiceKind::Logging => "/google.logging.v2.LoggingServiceV2/WriteLogEntries",
            ServiceKind::Metrics => "/google.monitoring.v3.MetricService/CreateTimeSeries",
        }
    }

    /// Port the kind listens on when the configuration does not override it.
    pub fn default_port(&self) -> u16 {
        match self {
            ServiceKind::Logging => 18888,
            ServiceKind::Metrics => 18889,
        }
    }

    /// Filename prefix of the per-run event file a file sink writes.
    pub fn file_prefix(&self) -> &'static str {
        match self {
            ServiceKind::Logging => "logs",
            ServiceKind::Metrics => "metrics",
        }
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceKind::Logging => write!(f, "logging"),
            ServiceKind::Metrics => write!(f, "metrics"),
        }
    }
}

impl FromStr for ServiceKind {
    type Err = HarnessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "logging" => Ok(ServiceKind::Logging),
            "metrics" => Ok(ServiceKind::Metrics),
            other => Err(HarnessError::ConfigurationError(format!(
                "unknown service kind: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rpc_paths_follow_the_upstream_contracts() {
        assert_eq!(
            ServiceKind::Logging.rpc_path(),
            "/google.logging.v2.LoggingServiceV2/WriteLogEntries"
        );
        assert_eq!(
            ServiceKind::Metrics.rpc_path(),
            "/google.monitoring.v3.MetricService/CreateTimeSeries"
        );
    }

    #[test]
    fn test_default_ports() {
        assert_eq!(ServiceKind::Logging.default_port(), 18888);
        assert_eq!(ServiceKind::Metrics.default_port(), 18889);
    }

    #[test]
    fn test_display_round_trips_through_from_str() {
        for kind in ServiceKind::ALL {
            assert_eq!(kind.to_string().parse::<ServiceKind>().unwrap(), kind);
        }
        assert!("traces".parse::<ServiceKind>().is_err());
    }
}
