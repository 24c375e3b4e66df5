//! # plait - Plugin Hook Composition Engine
//!
//! `plait` lets an ordered set of independently authored plugins extend a
//! single stateful host without any plugin knowing about the others. For
//! every distinct hook name the plugins expose, the engine builds one
//! composed callable — a short-circuiting chain for event hooks, a
//! policy-driven merge for value-producing hooks — and re-derives the whole
//! table every cycle so plugin or state changes are picked up without stale
//! closures.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use plait::{PluginHost, PluginManifest, names};
//!
//! let host = PluginHost::builder(document)
//!     .plugin(toolbar_plugin)
//!     .plugin(focus_plugin)
//!     .plugin(plait::plugins::KeyBindingsPlugin::new(bindings))
//!     .build()?;
//!
//! let composition = host.composition();
//! let outcome = composition.handle_event(names::ON_TAB, &key, host.context())?;
//! ```
//!
//! Execution is single-threaded, synchronous, and run-to-completion: hooks
//! are invoked strictly sequentially, and short-circuiting is the only
//! cancellation mechanism.

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod compose;
mod host;
pub mod resolve;

pub use compose::{ComposedEventHook, ComposedFnHook, Composition};
pub use host::{PluginHost, PluginHostBuilder};

pub use plait_core::{
    // Accessibility / style / decorator contributions
    ARIA_TRUE,
    AccessibilityProps,
    BlockDescriptor,
    // Error types
    BoxError,
    COMPONENT_FIELD,
    ChangeFn,
    ComposeError,
    Decorator,
    DocumentState,
    EventHookFn,
    FnHookFn,
    // Hook model
    HookArgs,
    HookError,
    HookKind,
    HookOutcome,
    // Policy table
    HookRegistry,
    HookSpec,
    HookTable,
    // Context
    HostContext,
    IntoHookOutcome,
    IntoHookValue,
    MergePolicy,
    PROPS_FIELD,
    PlaitError,
    // Plugins
    Plugin,
    PluginManifest,
    StyleMap,
    names,
};

/// Standard plugin implementations.
pub mod plugins {
    pub use plait_std::KeyBindingsPlugin;
}

/// Test doubles for exercising hosts and plugins.
pub mod testing {
    pub use plait_std::testing::{CallLog, InitCounter, RecordingPlugin};
}
