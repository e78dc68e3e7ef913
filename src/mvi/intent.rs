//! Base trait for intents (user/system actions).

/// Marker trait for intent objects.
///
/// Intents represent:
/// - User actions (logging an outfit, buying an item)
/// - Collaborator results re-entering as follow-up actions
/// - Load-time corrections (quest rotation)
///
/// Intents are processed by reducers to produce new models.
pub trait Intent: Send + 'static {}
