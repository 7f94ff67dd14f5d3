//! Base trait for actions dispatched into the store.

/// Marker trait for action objects.
///
/// Actions represent:
/// - Synchronous commands from the UI (toggle theme, set a filter)
/// - Lifecycle events of async requests (pending, fulfilled, rejected)
///
/// Actions are processed by reducers to produce new states.
pub trait Action: Send + 'static {}
