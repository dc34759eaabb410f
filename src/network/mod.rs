pub mod client;
pub mod endpoint;
#[cfg(test)]
pub mod testing;

pub use client::{EndpointWorker, HttpEndpoint};
pub use endpoint::{AnswerEndpoint, ChatReply, EndpointError};
