/// Result of handing a key to a component.
///
/// Components consume keys they understand and report events for their
/// parent to act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyResult<T> {
  /// Key was consumed, nothing for the parent to do
  Handled,
  /// Key was consumed and produced an event
  Event(T),
  /// Key was not consumed, parent should try next handler
  NotHandled,
}
