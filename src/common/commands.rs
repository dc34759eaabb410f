use crate::session::OutboundRequest;

/// Commands the UI hands to the network worker.
#[derive(Debug, Clone)]
pub enum SessionCommand {
    /// Issue exactly one request to the answering endpoint for this cycle.
    Ask(OutboundRequest),
}
