//! Model-View-Intent (MVI) primitives.
//!
//! The engine is built as a unidirectional loop:
//!
//! ```text
//! Intent ──→ Reducer ──→ Model ──→ View
//!    ↑          │                   │
//!    │          └──→ Effects ───────┤
//!    └──────────────────────────────┘
//! ```
//!
//! - **Model**: the aggregate being transformed
//! - **Intent**: a user action or collaborator result
//! - **Reducer**: pure function from (Model, Intent) to the next Model,
//!   plus one-shot effects for the view to play and forget

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::{Reducer, Transition};
pub use state::Model;
