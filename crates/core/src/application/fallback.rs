// Fallback Query Engine
// Tries candidate backends in priority order until one succeeds

use tracing::{debug, info, warn};

use crate::domain::error::{AggregatedError, NoActionsRunError, NotSupportedError};
use crate::error::{AppError, Result};

type Probe<'a> = Box<dyn FnOnce() -> bool + 'a>;
type Action<'a, T> = Box<dyn FnOnce() -> Result<T> + 'a>;

/// One backend attempt bundled with its capability check and display label
pub struct CandidateAction<'a, T> {
    label: String,
    is_supported: Probe<'a>,
    action: Action<'a, T>,
}

impl<'a, T> CandidateAction<'a, T> {
    /// Create a new candidate
    ///
    /// # Arguments
    /// * `label` - Backend name used in logs and `NotSupportedError`
    /// * `is_supported` - Probe evaluated before `action` is attempted
    /// * `action` - The backend query itself
    ///
    /// # Example
    /// ```text
    /// let candidate = CandidateAction::new(
    ///     "ip",
    ///     || probe.is_executable_on_path("ip"),
    ///     || fetch_with_ip(),
    /// );
    /// ```
    pub fn new<P, A>(label: impl Into<String>, is_supported: P, action: A) -> Self
    where
        P: FnOnce() -> bool + 'a,
        A: FnOnce() -> Result<T> + 'a,
    {
        Self {
            label: label.into(),
            is_supported: Box::new(is_supported),
            action: Box::new(action),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Probe, then run the action if the probe passes
    ///
    /// Used when there is exactly one candidate: errors come back as-is,
    /// never aggregated.
    ///
    /// # Errors
    /// - NotSupportedError if the probe fails
    /// - Whatever the action returns
    pub fn run(self) -> Result<T> {
        match self.attempt() {
            Attempt::Succeeded(value) => Ok(value),
            Attempt::Failed(cause) => Err(cause),
        }
    }

    fn attempt(self) -> Attempt<T> {
        let label = self.label;

        if !(self.is_supported)() {
            debug!(backend = %label, "Backend not supported on this host, skipping");
            return Attempt::Failed(NotSupportedError::new(label).into());
        }

        debug!(backend = %label, "Attempting backend");
        match (self.action)() {
            Ok(value) => {
                info!(backend = %label, "Backend query succeeded");
                Attempt::Succeeded(value)
            }
            Err(e) => {
                warn!(backend = %label, error = %e, "Backend query failed");
                Attempt::Failed(e)
            }
        }
    }
}

enum Attempt<T> {
    Succeeded(T),
    Failed(AppError),
}

/// Run candidates in order and return the first success
///
/// Unsupported candidates are skipped without running their action and
/// recorded as `NotSupportedError`. Failed candidates are recorded as-is.
/// Nothing after the first success is touched.
///
/// # Errors
/// - NoActionsRunError if `candidates` is empty
/// - AggregatedError with one cause per candidate, in attempt order, if
///   none succeeded (also when every candidate was unsupported)
///
/// # Example
/// ```text
/// let interfaces = try_actions(vec![nmcli_candidate, ip_candidate])?;
/// ```
pub fn try_actions<T>(candidates: Vec<CandidateAction<'_, T>>) -> Result<T> {
    if candidates.is_empty() {
        return Err(NoActionsRunError.into());
    }

    let mut causes = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        match candidate.attempt() {
            Attempt::Succeeded(value) => return Ok(value),
            Attempt::Failed(cause) => causes.push(cause),
        }
    }

    warn!(attempted = causes.len(), "All backends failed");

    // Non-empty: the list was non-empty and every candidate left a cause
    match AggregatedError::from_causes(causes) {
        Some(aggregated) => Err(aggregated.into()),
        None => Err(NoActionsRunError.into()),
    }
}
