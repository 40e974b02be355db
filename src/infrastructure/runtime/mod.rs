//! Worker runtime behind the TUI

pub mod bridge;
pub mod gate;
pub mod worker;

pub use bridge::{PollConfig, RuntimeBridge, RuntimeCommand, RuntimeEvent};
pub use gate::TickGate;
