// Network Interface Queries
// Builds backend candidates for the network domain and runs them

use std::sync::Arc;

use tracing::{debug, info};

use super::fallback::{try_actions, CandidateAction};
use crate::domain::error::DeviceNotFoundError;
use crate::domain::network::{DeviceId, NetBackend, NetInterface, NetInterfaces};
use crate::domain::selector::BackendSelector;
use crate::error::Result;
use crate::parse::{ip, nmcli};
use crate::port::{CapabilityProbe, CommandRunner};

/// Backends in the order they are tried when no single backend is selected.
/// nmcli reports connection names and wifi types; ip is everywhere but terser.
const PRIORITY: [NetBackend; 2] = [NetBackend::Nmcli, NetBackend::Ip];

/// Network interface service
///
/// Queries go through the fallback engine unless the selector pins one backend.
pub struct NetworkService {
    runner: Arc<dyn CommandRunner>,
    probe: Arc<dyn CapabilityProbe>,
}

impl NetworkService {
    /// Create a new network service
    ///
    /// # Example
    /// ```text
    /// let service = NetworkService::new(
    ///     Arc::new(SubprocessRunner::default()),
    ///     Arc::new(PathProbe),
    /// );
    /// let interfaces = service.query_all(BackendSelector::All)?;
    /// ```
    pub fn new(runner: Arc<dyn CommandRunner>, probe: Arc<dyn CapabilityProbe>) -> Self {
        Self { runner, probe }
    }

    /// List every interface the selected backend(s) can see
    ///
    /// # Errors
    /// - `Only`: the single backend's own error (NotSupportedError,
    ///   CommandError or ParseError), not aggregated
    /// - `All`: AggregatedError with one cause per backend tried
    pub fn query_all(&self, selector: BackendSelector<NetBackend>) -> Result<NetInterfaces> {
        let interfaces = match selector {
            BackendSelector::Only(backend) => {
                debug!(backend = %backend, "Querying interfaces with a single backend");
                self.candidate(backend).run()?
            }
            BackendSelector::All => try_actions(self.candidates())?,
        };

        info!(count = interfaces.len(), "Network interfaces collected");
        Ok(interfaces)
    }

    /// Look up one interface by exact device id
    ///
    /// # Errors
    /// - Anything `query_all` returns
    /// - DeviceNotFoundError if the query succeeded but no interface matched
    pub fn query_one(
        &self,
        device: &DeviceId,
        selector: BackendSelector<NetBackend>,
    ) -> Result<NetInterface> {
        self.query_all(selector)?
            .into_iter()
            .find(|iface| &iface.device == device)
            .ok_or_else(|| DeviceNotFoundError::new(device.as_str()).into())
    }

    /// Ordered candidate list for `BackendSelector::All`
    fn candidates(&self) -> Vec<CandidateAction<'_, NetInterfaces>> {
        PRIORITY
            .iter()
            .map(|backend| self.candidate(*backend))
            .collect()
    }

    fn candidate(&self, backend: NetBackend) -> CandidateAction<'_, NetInterfaces> {
        CandidateAction::new(
            backend.to_string(),
            move || self.probe.is_executable_on_path(backend.executable()),
            move || self.fetch(backend),
        )
    }

    /// Run one backend and parse its output
    fn fetch(&self, backend: NetBackend) -> Result<NetInterfaces> {
        let output = self.runner.run(backend.executable(), backend.args())?;

        let interfaces = match backend {
            NetBackend::Nmcli => nmcli::parse_device_show(&output)?,
            NetBackend::Ip => ip::parse_address_show(&output)?,
        };

        Ok(interfaces)
    }
}
