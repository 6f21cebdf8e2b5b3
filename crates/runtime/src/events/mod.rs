//! Topic-based event bus for runtime events.
//!
//! Session operations publish what they changed to specific topics, and
//! consumers subscribe only to the topics they need.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{CombatEvent, ProgressionEvent, WorldStateEvent};
