//! Error types for Plait.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`PlaitError`] - Top-level error type for all Plait operations
//! - [`ComposeError`] - Errors during a composition cycle
//! - [`HookError`] - Composed-hook lookup and invocation errors

use crate::hook::HookKind;
use thiserror::Error;

/// A boxed error type for dynamic error handling.
///
/// Plugin callbacks raise this; the engine propagates it from the point of
/// invocation without local recovery.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type for all Plait operations.
#[derive(Error, Debug)]
pub enum PlaitError {
    /// An error occurred during a composition cycle.
    #[error("compose error: {0}")]
    Compose(#[from] ComposeError),

    /// An error occurred looking up or invoking a composed hook.
    #[error("hook error: {0}")]
    Hook(#[from] HookError),

    /// A custom error occurred.
    #[error(transparent)]
    Custom(BoxError),
}

/// Errors that abort a composition cycle.
#[derive(Error, Debug)]
pub enum ComposeError {
    /// A plugin's one-time `initialize` failed. The cycle is aborted and
    /// never retried automatically; the previously published composition
    /// stays in effect.
    #[error("plugin `{plugin}` failed to initialize")]
    Initialize {
        /// The name of the plugin that failed.
        plugin: String,
        /// The error raised by the plugin.
        #[source]
        source: BoxError,
    },
}

/// Errors from composed-hook lookup and invocation.
#[derive(Error, Debug)]
pub enum HookError {
    /// No plugin in the active sequence implements this hook name.
    ///
    /// Note this is only raised for a *lookup* of a name absent from the
    /// composed table. A present hook whose every plugin declines is not an
    /// error; it reports `NotHandled` / no value.
    #[error("no hook composed under name: {0}")]
    UnknownHook(String),

    /// The name is composed, but as a different kind than the caller asked
    /// for (e.g. invoking a function hook through the event-hook interface).
    #[error("hook `{name}` is composed as {actual:?}, not {expected:?}")]
    KindMismatch {
        /// The hook name that was looked up.
        name: String,
        /// The kind the caller asked for.
        expected: HookKind,
        /// The kind the name is actually composed as.
        actual: HookKind,
    },

    /// A plugin implementation raised an error mid-chain.
    #[error(transparent)]
    Custom(BoxError),
}

// Convenience conversions
impl From<BoxError> for PlaitError {
    fn from(err: BoxError) -> Self {
        PlaitError::Custom(err)
    }
}

impl From<BoxError> for HookError {
    fn from(err: BoxError) -> Self {
        HookError::Custom(err)
    }
}
