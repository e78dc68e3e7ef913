//! The state engine: aggregate, actions, effects and the reducer.

mod command;
mod effect;
mod intent;
mod reducer;
pub mod rewards;
mod state;
pub mod streak;

pub use command::Command;
pub use effect::Effect;
pub use intent::{Action, OutfitEntry, SliceUpdate, Update};
pub use reducer::VibeReducer;
pub use state::{Slice, VibeState};
