//! Document-state marker trait.

/// A marker trait for the host's opaque document state.
///
/// The engine never inspects the state; it only stores it, hands clones to
/// plugins through the [`HostContext`](crate::HostContext), and threads
/// replacement values through each plugin's change filter.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Clone)]
/// struct EditorState { blocks: Vec<Block>, selection: Selection }
///
/// impl DocumentState for EditorState {}
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a valid document state",
    label = "must be `Clone + Send + Sync + 'static`",
    note = "Document state is cloned out of the shared context on every read."
)]
pub trait DocumentState: Clone + Send + Sync + 'static {}

// Common state implementations
impl DocumentState for () {}
impl DocumentState for String {}
impl<T: DocumentState> DocumentState for Vec<T> {}
impl<T: DocumentState> DocumentState for Option<T> {}
impl<T: DocumentState> DocumentState for std::sync::Arc<T> {}
