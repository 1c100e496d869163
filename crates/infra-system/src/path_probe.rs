// Capability probe implementation
// reason: `which` resolves executables the same way the shell does
use tracing::debug;

use hostq_core::port::CapabilityProbe;

/// Capability probe that searches `PATH`
#[derive(Debug, Clone, Copy, Default)]
pub struct PathProbe;

impl CapabilityProbe for PathProbe {
    fn is_executable_on_path(&self, name: &str) -> bool {
        match which::which(name) {
            Ok(path) => {
                debug!(program = %name, path = %path.display(), "Executable found");
                true
            }
            Err(e) => {
                debug!(program = %name, error = %e, "Executable not found");
                false
            }
        }
    }
}
