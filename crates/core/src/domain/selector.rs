// Backend Selector Configuration

use serde::{Deserialize, Serialize};

/// Which backends a query may use
///
/// `All` tries every backend the service knows, in its priority order.
/// `Only` pins the query to exactly one backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendSelector<B> {
    All,
    Only(B),
}

impl<B> BackendSelector<B> {
    /// Combine two selectors
    ///
    /// `All` is the identity. Between two `Only` selectors the right-hand one
    /// wins, so later sources (CLI flags) override earlier ones (env).
    pub fn merge(self, other: Self) -> Self {
        match (self, other) {
            (selected, BackendSelector::All) => selected,
            (_, selected) => selected,
        }
    }
}

impl<B> Default for BackendSelector<B> {
    fn default() -> Self {
        BackendSelector::All
    }
}

impl<B> From<Option<B>> for BackendSelector<B> {
    fn from(backend: Option<B>) -> Self {
        backend.map_or(BackendSelector::All, BackendSelector::Only)
    }
}
