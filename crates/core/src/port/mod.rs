// Port Layer - Interfaces for external dependencies

pub mod capability_probe;
pub mod command_runner;

// Re-exports
pub use capability_probe::CapabilityProbe;
pub use command_runner::{command_line, CommandRunner};
