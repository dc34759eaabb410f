use crate::network::{ChatReply, EndpointError};

/// Events the network worker sends back to the UI.
#[derive(Debug)]
pub enum SessionEvent {
    Resolved {
        cycle: u64,
        outcome: Result<ChatReply, EndpointError>,
    },
}
