// hostq Infrastructure - System Adapters
// Implements: CommandRunner, CapabilityProbe

pub mod path_probe;
pub mod subprocess_runner;

pub use path_probe::PathProbe;
pub use subprocess_runner::SubprocessRunner;
