use std::error::Error;

use futures::FutureExt;
use futures::future::BoxFuture;
use reqwest::Client;
use tokio::sync::mpsc;

use crate::common::{SessionCommand, SessionEvent};
use crate::config::AppConfig;

use super::endpoint::{AnswerEndpoint, ChatReply, ChatRequestBody, EndpointError};

/// Answering endpoint reached over HTTP with a JSON body.
pub struct HttpEndpoint {
    client: Client,
    url: String,
}

impl HttpEndpoint {
    pub fn new(config: &AppConfig) -> Result<Self, Box<dyn Error>> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            url: config.chat_url(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn post(&self, message: &str) -> Result<ChatReply, EndpointError> {
        log::debug!("POST {} ({} bytes)", self.url, message.len());

        let response = self
            .client
            .post(&self.url)
            .json(&ChatRequestBody { message })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(EndpointError::Status(status));
        }

        let body = response.text().await?;
        ChatReply::from_body(&body)
    }
}

impl AnswerEndpoint for HttpEndpoint {
    fn ask<'a>(&'a self, message: &'a str) -> BoxFuture<'a, Result<ChatReply, EndpointError>> {
        self.post(message).boxed()
    }
}

/// Background task that owns the endpoint and answers one request per command.
pub struct EndpointWorker<E> {
    endpoint: E,
    event_sender: mpsc::Sender<SessionEvent>,
    command_receiver: mpsc::Receiver<SessionCommand>,
}

impl<E: AnswerEndpoint> EndpointWorker<E> {
    pub fn new(
        endpoint: E,
        event_sender: mpsc::Sender<SessionEvent>,
        command_receiver: mpsc::Receiver<SessionCommand>,
    ) -> Self {
        Self {
            endpoint,
            event_sender,
            command_receiver,
        }
    }

    pub async fn run(mut self) {
        log::info!("Endpoint worker started");

        while let Some(command) = self.command_receiver.recv().await {
            self.handle_command(command).await;
        }

        log::info!("Command channel closed; endpoint worker stopping");
    }

    async fn handle_command(&mut self, command: SessionCommand) {
        match command {
            SessionCommand::Ask(request) => {
                let outcome = self.endpoint.ask(&request.text).await;
                let event = SessionEvent::Resolved {
                    cycle: request.cycle,
                    outcome,
                };

                if let Err(err) = self.event_sender.send(event).await {
                    log::warn!("Failed to deliver reply for cycle {}: {err}", request.cycle);
                }
            }
        }
    }
}
