// Application Layer - Use Cases and Business Logic

pub mod fallback;
pub mod network;

// Re-exports
pub use fallback::{try_actions, CandidateAction};
pub use network::NetworkService;
