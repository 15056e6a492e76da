use std::sync::Arc;

use async_trait::async_trait;

use crate::entities::{CaptureStore, HarnessConfig, ServiceKind};
use crate::error::HarnessError;

/// Trait for wire-layer implementations that stand up mock services
///
/// The orchestrator asks the gateway for one bound instance per enabled
/// service kind and drives it through [`Instance`], so the wire technology
/// stays behind this seam.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// The running-listener type this gateway hands out.
    type Instance: Instance;

    /// Claims the listen address configured for `kind`. The returned
    /// instance must not answer calls until [`Instance::serve`].
    async fn bind(
        &self,
        kind: ServiceKind,
        config: &HarnessConfig,
    ) -> Result<Self::Instance, HarnessError>;
}

/// Trait for one bound mock service with an explicit lifecycle
///
/// Lifecycle order is `serve`, then `shutdown`, then `stopped`. `shutdown`
/// must be idempotent and safe to call before `serve`.
#[async_trait]
pub trait Instance: Send {
    fn kind(&self) -> ServiceKind;

    /// The bound address as `host:port`.
    fn endpoint(&self) -> &str;

    /// Handle to the store of requests this instance captured.
    fn captures(&self) -> Arc<CaptureStore>;

    /// Starts answering calls on the bound address.
    fn serve(&mut self);

    /// Stops accepting new connections and lets in-flight calls finish.
    fn shutdown(&self);

    /// Waits until the drain triggered by [`shutdown`] has completed.
    ///
    /// [`shutdown`]: Instance::shutdown
    async fn stopped(&mut self);
}
