use futures::future;

use crate::entities::{HarnessConfig, RunMode, ServiceKind};
use crate::error::HarnessError;
use crate::use_cases::ports::{Gateway, Instance};

/// A set of mock telemetry services running together.
///
/// [`start_with`] brings every enabled service up through a [`Gateway`];
/// the harness then either hands control back to the embedding test, which
/// inspects instances and calls [`shutdown`] itself, or serves via [`run`]
/// until the process is interrupted.
///
/// [`start_with`]: Harness::start_with
/// [`shutdown`]: Harness::shutdown
/// [`run`]: Harness::run
pub struct Harness<I> {
    instances: Vec<I>,
    run_mode: RunMode,
}

impl<I: Instance> Harness<I> {
    /// Binds one mock service per enabled kind, then starts serving on all
    /// of them. Nothing serves until every bind has succeeded, so a port
    /// conflict surfaces before any traffic is answered.
    pub async fn start_with<G>(gateway: G, config: HarnessConfig) -> Result<Self, HarnessError>
    where
        G: Gateway<Instance = I>,
    {
        let mut instances = Vec::new();
        for kind in enabled_kinds(&config) {
            instances.push(gateway.bind(kind, &config).await?);
        }
        for instance in &mut instances {
            instance.serve();
            tracing::info!(
                service = %instance.kind(),
                endpoint = instance.endpoint(),
                "mock service serving"
            );
        }
        Ok(Self {
            instances,
            run_mode: config.run_mode,
        })
    }

    /// The running instance for one service kind, when enabled.
    pub fn instance(&self, kind: ServiceKind) -> Option<&I> {
        self.instances
            .iter()
            .find(|instance| instance.kind() == kind)
    }

    /// Blocks per the configured run mode: until an interrupt signal when
    /// serving until signal, forever otherwise.
    pub async fn run(self) -> Result<(), HarnessError> {
        match self.run_mode {
            RunMode::ServeUntilSignal => {
                tokio::signal::ctrl_c().await?;
                tracing::info!("interrupt received, draining mock services");
                self.shutdown().await;
            }
            RunMode::ServeOnce => {
                future::pending::<()>().await;
            }
        }
        Ok(())
    }

    /// Signals every instance to stop, then waits until all of them have
    /// drained their in-flight calls.
    pub async fn shutdown(mut self) {
        for instance in &self.instances {
            instance.shutdown();
        }
        future::join_all(
            self.instances
                .iter_mut()
                .map(|instance| instance.stopped()),
        )
        .await;
        tracing::info!("all mock services stopped");
    }
}

fn enabled_kinds(config: &HarnessConfig) -> Vec<ServiceKind> {
    let mut kinds = Vec::new();
    for kind in &config.services {
        if !kinds.contains(kind) {
            kinds.push(*kind);
        }
    }
    kinds
}
