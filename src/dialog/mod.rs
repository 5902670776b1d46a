//! Dialogue state machine and turn-level types.

pub mod commands;
pub mod engine;
pub mod types;

pub use engine::DialogEngine;
pub use types::{EventKind, InboundEvent, ResponseIntent, ScheduledResponse};
