//! Protocol types and events.

mod events;
mod types;

pub use events::{Event, EventSink, MemoryEventSink, TracingEventSink};
pub use types::{Decision, GameId};
