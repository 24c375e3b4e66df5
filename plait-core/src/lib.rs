//! # plait-core
//!
//! Core traits and types for the Plait plugin composition engine.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! plugin authors who don't need the full engine in `plait`.
//!
//! # Model
//!
//! A *plugin* is an independently authored bag of optional named hooks and
//! static contributions. Plugins are supplied to a host as an ordered
//! sequence; no plugin knows about the others. For every distinct hook name
//! exposed by any plugin, the engine builds one composed callable whose
//! behavior depends on the hook's *kind*:
//!
//! - **Event hooks** compose into a short-circuiting chain: plugins run in
//!   order until one returns [`HookOutcome::Handled`].
//! - **Function hooks** compose under a [`MergePolicy`]: first non-empty
//!   result by default, or a structural / string-concatenation merge for
//!   hooks registered with one of the special policies.
//! - **Passthrough** attributes (decorator lists, style maps, accessibility
//!   descriptors) are resolved by dedicated merge rules, not callables.
//!
//! Rather than sniffing hook kinds out of attribute names at runtime, each
//! plugin declares its capabilities in a [`PluginManifest`], and the host
//! consults an explicit [`HookRegistry`] policy table. The lexical
//! classification rules survive as [`HookKind::classify`], the registry's
//! fallback for names it has never seen.
//!
//! # Error Types
//!
//! - [`PlaitError`] - Top-level error type
//! - [`ComposeError`] - Composition-cycle errors
//! - [`HookError`] - Composed-hook lookup and invocation errors

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod context;
mod error;
mod hook;
mod plugin;
mod policy;
mod props;
mod state;
mod table;

// Re-exports
pub use context::HostContext;
pub use error::{BoxError, ComposeError, HookError, PlaitError};
pub use hook::{HookArgs, HookKind, HookOutcome, IntoHookOutcome, IntoHookValue, names};
pub use plugin::{ChangeFn, EventHookFn, FnHookFn, Plugin, PluginManifest};
pub use policy::{HookRegistry, HookSpec, MergePolicy};
pub use props::{
    ARIA_TRUE, AccessibilityProps, BlockDescriptor, COMPONENT_FIELD, Decorator, PROPS_FIELD,
    StyleMap,
};
pub use state::DocumentState;
pub use table::HookTable;
