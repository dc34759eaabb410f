pub mod controller;
pub mod message_log;

pub use controller::{ChatSession, CycleState, OutboundRequest};
