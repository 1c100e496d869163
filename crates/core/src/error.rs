// Central Error Type for the Application
//
// AppError is the root of an open hierarchy: any concrete error kind can be
// lifted into it with `wrap` and recovered by exact type with `downcast`.

use std::error::Error as StdError;
use std::fmt;

type BoxedError = Box<dyn StdError + Send + Sync + 'static>;

/// Root error type crossing every query boundary
pub struct AppError {
    inner: BoxedError,
}

impl AppError {
    /// Lift a concrete error into the root type
    ///
    /// Wrapping an `AppError` returns it unchanged, so wraps never nest.
    pub fn wrap<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        let boxed: BoxedError = Box::new(err);
        match boxed.downcast::<AppError>() {
            Ok(root) => *root,
            Err(inner) => Self { inner },
        }
    }

    /// True if the wrapped value is exactly `E`
    pub fn is<E>(&self) -> bool
    where
        E: StdError + 'static,
    {
        self.inner.is::<E>()
    }

    /// Borrow the wrapped value as `E`, if that is its concrete kind
    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: StdError + 'static,
    {
        self.inner.downcast_ref::<E>()
    }

    /// Recover the wrapped value as `E`
    ///
    /// # Errors
    /// Gives `self` back untouched when the concrete kind is not `E`.
    pub fn downcast<E>(self) -> std::result::Result<E, Self>
    where
        E: StdError + Send + Sync + 'static,
    {
        self.inner
            .downcast::<E>()
            .map(|e| *e)
            .map_err(|inner| Self { inner })
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

impl fmt::Debug for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.inner, f)
    }
}

impl StdError for AppError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.inner.source()
    }
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;
