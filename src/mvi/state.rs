//! Base trait for models.

/// Marker trait for model objects.
///
/// Models should be:
/// - Immutable from the outside (Clone to create new models)
/// - Self-contained (everything a view needs to render)
/// - Comparable (PartialEq for detecting changed slices)
pub trait Model: Clone + PartialEq + Default + Send + 'static {}
