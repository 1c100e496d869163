// Capability Probe Port
// Answers whether a backend's executable can be used on this host

/// Capability probe for external programs
pub trait CapabilityProbe: Send + Sync {
    /// True if `name` resolves to an executable on the search path
    fn is_executable_on_path(&self, name: &str) -> bool;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;

    /// Mock probe reporting a fixed set of installed programs
    #[derive(Debug, Clone, Default)]
    pub struct MockCapabilityProbe {
        installed: Vec<String>,
    }

    impl MockCapabilityProbe {
        pub fn new<I, S>(installed: I) -> Self
        where
            I: IntoIterator<Item = S>,
            S: Into<String>,
        {
            Self {
                installed: installed.into_iter().map(Into::into).collect(),
            }
        }

        /// Probe on a host with nothing installed
        pub fn none() -> Self {
            Self::default()
        }
    }

    impl CapabilityProbe for MockCapabilityProbe {
        fn is_executable_on_path(&self, name: &str) -> bool {
            self.installed.iter().any(|installed| installed == name)
        }
    }
}
