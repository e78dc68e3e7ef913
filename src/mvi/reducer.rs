//! Reducer trait.

use super::intent::Intent;
use super::state::Model;

/// Result of a single reduction: the next model and its effect outbox.
///
/// Effects are transient. They are handed to the caller once and are never
/// part of the model, so they cannot replay on the next render.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition<S, E> {
    pub state: S,
    pub effects: Vec<E>,
}

impl<S, E> Transition<S, E> {
    /// A transition with no effects.
    pub fn quiet(state: S) -> Self {
        Self {
            state,
            effects: Vec::new(),
        }
    }

    /// A transition carrying a single effect.
    pub fn with_effect(state: S, effect: E) -> Self {
        Self {
            state,
            effects: vec![effect],
        }
    }
}

/// Reducer transforms a model based on intents.
///
/// The reducer is the only place where state transitions happen.
/// It must be a pure function: (Model, Intent) -> (Model, Effects)
pub trait Reducer {
    /// The model type this reducer operates on.
    type State: Model;

    /// The intent type this reducer handles.
    type Intent: Intent;

    /// Presentation-only effect descriptor.
    type Effect;

    /// Process an intent and return the next model with its outbox.
    ///
    /// This should be a pure function with no side effects.
    fn reduce(state: Self::State, intent: Self::Intent) -> Transition<Self::State, Self::Effect>;
}
