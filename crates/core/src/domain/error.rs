// Concrete Error Kinds
//
// Each kind is its own type so new kinds can be added anywhere without
// touching the root. All of them lift into `AppError`.

use std::fmt;

use thiserror::Error;

use crate::error::AppError;

/// A backend process failed or produced an error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Command `{command}` failed: {message}")]
pub struct CommandError {
    pub command: String,
    pub message: String,
}

impl CommandError {
    pub fn new(command: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            message: message.into(),
        }
    }
}

/// A specific backend is unusable on this host
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Backend not supported on this host: {backend_name}")]
pub struct NotSupportedError {
    pub backend_name: String,
}

impl NotSupportedError {
    pub fn new(backend_name: impl Into<String>) -> Self {
        Self {
            backend_name: backend_name.into(),
        }
    }
}

/// The candidate list handed to the fallback engine was empty
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("No actions were run: the candidate list was empty")]
pub struct NoActionsRunError;

/// A post-query filter found no interface with the requested device id
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Device not found: {device_id}")]
pub struct DeviceNotFoundError {
    pub device_id: String,
}

impl DeviceNotFoundError {
    pub fn new(device_id: impl Into<String>) -> Self {
        Self {
            device_id: device_id.into(),
        }
    }
}

/// Backend output did not match the expected grammar
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Failed to parse {source_name} output at line {line}: {message}")]
pub struct ParseError {
    pub source_name: String,
    pub line: usize,
    pub message: String,
}

/// Causes collected while walking a candidate list, in attempt order
///
/// Never empty: the only constructors take at least one cause.
#[derive(Debug)]
pub struct AggregatedError {
    causes: Vec<AppError>,
}

impl AggregatedError {
    pub fn new(first: AppError) -> Self {
        Self {
            causes: vec![first],
        }
    }

    /// Returns `None` for an empty cause list
    pub fn from_causes(causes: Vec<AppError>) -> Option<Self> {
        if causes.is_empty() {
            None
        } else {
            Some(Self { causes })
        }
    }

    pub fn push(&mut self, cause: AppError) {
        self.causes.push(cause);
    }

    /// Concatenate two aggregates, keeping order and duplicates
    pub fn merge(mut self, other: AggregatedError) -> Self {
        self.causes.extend(other.causes);
        self
    }

    pub fn causes(&self) -> &[AppError] {
        &self.causes
    }

    pub fn cause_count(&self) -> usize {
        self.causes.len()
    }

    pub fn into_causes(self) -> Vec<AppError> {
        self.causes
    }
}

impl fmt::Display for AggregatedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Found {} exception(s):", self.causes.len())?;
        for cause in &self.causes {
            let text = cause.to_string();
            write!(f, "\n  {}", text.replace('\n', "\n  "))?;
        }
        Ok(())
    }
}

impl std::error::Error for AggregatedError {}

macro_rules! lift_into_app_error {
    ($($kind:ty),* $(,)?) => {
        $(
            impl From<$kind> for AppError {
                fn from(err: $kind) -> Self {
                    AppError::wrap(err)
                }
            }
        )*
    };
}

lift_into_app_error!(
    CommandError,
    NotSupportedError,
    NoActionsRunError,
    DeviceNotFoundError,
    ParseError,
    AggregatedError,
);
