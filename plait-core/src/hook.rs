//! Hook kinds, outcomes, and result-conversion traits.
//!
//! Every attribute a plugin exposes is treated as exactly one [`HookKind`]
//! for the lifetime of a composition cycle. The kind decides how the engine
//! composes the implementations supplied by different plugins: event hooks
//! become a short-circuiting chain, function hooks merge values under a
//! policy, and passthrough attributes bypass composition entirely.

use crate::error::BoxError;
use serde_json::Value;

/// Well-known hook names.
///
/// These are the standard vocabulary seeded into
/// [`HookRegistry::standard`](crate::HookRegistry::standard). Nothing stops
/// a plugin from exposing a name not listed here; unknown names are
/// classified lexically by [`HookKind::classify`].
pub mod names {
    /// Reserved: the host's own state-change pipeline, never composed.
    pub const ON_CHANGE: &str = "onChange";

    /// Event hook: the host gained focus.
    pub const ON_FOCUS: &str = "onFocus";
    /// Event hook: the host lost focus.
    pub const ON_BLUR: &str = "onBlur";
    /// Event hook: up-arrow key press.
    pub const ON_UP_ARROW: &str = "onUpArrow";
    /// Event hook: down-arrow key press.
    pub const ON_DOWN_ARROW: &str = "onDownArrow";
    /// Event hook: tab key press.
    pub const ON_TAB: &str = "onTab";
    /// Event hook: escape key press.
    pub const ON_ESCAPE: &str = "onEscape";

    /// Event hook: a named key command was issued.
    pub const HANDLE_KEY_COMMAND: &str = "handleKeyCommand";
    /// Event hook: text is about to be inserted.
    pub const HANDLE_BEFORE_INPUT: &str = "handleBeforeInput";
    /// Event hook: text was pasted.
    pub const HANDLE_PASTED_TEXT: &str = "handlePastedText";
    /// Event hook: the return key was pressed.
    pub const HANDLE_RETURN: &str = "handleReturn";
    /// Event hook: content was dropped onto the host.
    pub const HANDLE_DROP: &str = "handleDrop";

    /// Function hook: produce a block descriptor (merged by field).
    pub const BLOCK_RENDERER_FN: &str = "blockRendererFn";
    /// Function hook: produce a style string (space-concatenated).
    pub const BLOCK_STYLE_FN: &str = "blockStyleFn";
    /// Function hook: map a raw input event to a command.
    pub const KEY_BINDING_FN: &str = "keyBindingFn";
}

/// The kind of a named hook, exclusive per name within a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookKind {
    /// A notification-style hook composing into a short-circuit chain.
    Event,
    /// A value-producing hook composing under a [`MergePolicy`].
    ///
    /// [`MergePolicy`]: crate::MergePolicy
    Function,
    /// Neither; ignored by the composer (static config such as a theme).
    Passthrough,
}

impl HookKind {
    /// Classify a hook name by its lexical shape alone.
    ///
    /// - names starting with `on` or `handle` are [`HookKind::Event`];
    /// - names ending in `Fn` (and not already matched as an event) are
    ///   [`HookKind::Function`];
    /// - everything else is [`HookKind::Passthrough`].
    ///
    /// Deterministic and side-effect free: classifying the same name twice
    /// always yields the same kind. Behavior is never inspected.
    pub fn classify(name: &str) -> HookKind {
        if name.starts_with("on") || name.starts_with("handle") {
            HookKind::Event
        } else if name.ends_with("Fn") {
            HookKind::Function
        } else {
            HookKind::Passthrough
        }
    }
}

/// Result of one event-hook invocation: whether the chain short-circuits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookOutcome {
    /// The event was consumed; later plugins in the chain are skipped for
    /// this call and the composed call reports `Handled`.
    Handled,
    /// The plugin declined; the chain continues to the next plugin.
    NotHandled,
}

/// A marker trait for the argument payload passed to every hook.
///
/// The engine treats the payload as opaque: it is borrowed by each plugin
/// in the chain and never cloned by the composer.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a valid hook argument payload",
    label = "must be `Send + Sync + 'static`",
    note = "Hook payloads must be thread-safe and static."
)]
pub trait HookArgs: Send + Sync + 'static {}

// Common payload implementations
impl HookArgs for () {}
impl HookArgs for String {}
impl HookArgs for &'static str {}
impl<T: HookArgs> HookArgs for Box<T> {}
impl<T: HookArgs> HookArgs for std::sync::Arc<T> {}
impl<T: HookArgs> HookArgs for Vec<T> {}
impl<T: HookArgs> HookArgs for Option<T> {}

/// Trait for converting an event-hook implementation's output into a
/// [`HookOutcome`].
///
/// # Default Implementations
///
/// - `()` → Handled (the hook unconditionally consumes the event)
/// - `bool` → `true` = Handled, `false` = NotHandled
/// - `HookOutcome` → As is
/// - `Option<T>` → `None` = NotHandled, `Some` delegates to inner `T`
/// - `Result<T, E>` → Delegates to inner `T` or propagates the error
pub trait IntoHookOutcome {
    /// Convert the output into chain-propagation behavior.
    fn into_hook_outcome(self) -> Result<HookOutcome, BoxError>;
}

impl IntoHookOutcome for () {
    fn into_hook_outcome(self) -> Result<HookOutcome, BoxError> {
        Ok(HookOutcome::Handled)
    }
}

impl IntoHookOutcome for bool {
    fn into_hook_outcome(self) -> Result<HookOutcome, BoxError> {
        Ok(if self {
            HookOutcome::Handled
        } else {
            HookOutcome::NotHandled
        })
    }
}

impl IntoHookOutcome for HookOutcome {
    fn into_hook_outcome(self) -> Result<HookOutcome, BoxError> {
        Ok(self)
    }
}

impl<T: IntoHookOutcome> IntoHookOutcome for Option<T> {
    fn into_hook_outcome(self) -> Result<HookOutcome, BoxError> {
        match self {
            Some(t) => t.into_hook_outcome(),
            None => Ok(HookOutcome::NotHandled),
        }
    }
}

impl<T, E> IntoHookOutcome for Result<T, E>
where
    T: IntoHookOutcome,
    E: std::error::Error + Send + Sync + 'static,
{
    fn into_hook_outcome(self) -> Result<HookOutcome, BoxError> {
        match self {
            Ok(t) => t.into_hook_outcome(),
            Err(e) => Err(Box::new(e)),
        }
    }
}

/// Trait for converting a function-hook implementation's output into the
/// engine's value representation.
///
/// `None` is the "empty" sentinel: the plugin declined to produce a value
/// for this call. Absence is a first-class outcome, not an error.
pub trait IntoHookValue {
    /// Convert the output into an optional merge value.
    fn into_hook_value(self) -> Result<Option<Value>, BoxError>;
}

impl IntoHookValue for () {
    fn into_hook_value(self) -> Result<Option<Value>, BoxError> {
        Ok(None)
    }
}

impl IntoHookValue for Value {
    fn into_hook_value(self) -> Result<Option<Value>, BoxError> {
        Ok(Some(self))
    }
}

impl IntoHookValue for String {
    fn into_hook_value(self) -> Result<Option<Value>, BoxError> {
        Ok(Some(Value::String(self)))
    }
}

impl IntoHookValue for &str {
    fn into_hook_value(self) -> Result<Option<Value>, BoxError> {
        Ok(Some(Value::String(self.to_string())))
    }
}

impl<T: IntoHookValue> IntoHookValue for Option<T> {
    fn into_hook_value(self) -> Result<Option<Value>, BoxError> {
        match self {
            Some(t) => t.into_hook_value(),
            None => Ok(None),
        }
    }
}

impl<T, E> IntoHookValue for Result<T, E>
where
    T: IntoHookValue,
    E: std::error::Error + Send + Sync + 'static,
{
    fn into_hook_value(self) -> Result<Option<Value>, BoxError> {
        match self {
            Ok(t) => t.into_hook_value(),
            Err(e) => Err(Box::new(e)),
        }
    }
}
