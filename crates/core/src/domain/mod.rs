// Domain Layer - Pure data types and error kinds

pub mod error;
pub mod network;
pub mod selector;

// Re-exports
pub use error::{
    AggregatedError, CommandError, DeviceNotFoundError, NoActionsRunError, NotSupportedError,
    ParseError,
};
pub use network::{
    DeviceId, InterfaceState, InterfaceType, NetBackend, NetInterface, NetInterfaces,
    UnknownBackendError,
};
pub use selector::BackendSelector;
