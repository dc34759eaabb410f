use std::time::Duration;

use eframe::egui;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;

use crate::common::{SessionCommand, SessionEvent};
use crate::network::EndpointError;
use crate::session::{ChatSession, CycleState};

use super::components::input_bar::InputIntent;
use super::components::{chat_area, header, input_bar};

pub struct ChatApp {
    session: ChatSession,
    command_sender: mpsc::Sender<SessionCommand>,
    event_receiver: mpsc::Receiver<SessionEvent>,
    focus_input: bool,
}

impl ChatApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        command_sender: mpsc::Sender<SessionCommand>,
        event_receiver: mpsc::Receiver<SessionEvent>,
    ) -> Self {
        Self::with_channels(command_sender, event_receiver)
    }

    fn with_channels(
        command_sender: mpsc::Sender<SessionCommand>,
        event_receiver: mpsc::Receiver<SessionEvent>,
    ) -> Self {
        Self {
            session: ChatSession::new(),
            command_sender,
            event_receiver,
            focus_input: true,
        }
    }

    fn handle_session_events(&mut self) {
        loop {
            match self.event_receiver.try_recv() {
                Ok(SessionEvent::Resolved { cycle, outcome }) => {
                    if self.session.resolve(cycle, outcome) {
                        self.focus_input = true;
                    }
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if let CycleState::Sending { cycle } = self.session.state() {
                        log::error!("Endpoint worker gone while cycle {cycle} was in flight");
                        self.session.resolve(cycle, Err(EndpointError::WorkerUnavailable));
                    }
                    break;
                }
            }
        }
    }

    fn apply(&mut self, intent: InputIntent) {
        match intent {
            InputIntent::DraftChanged(text) => self.session.set_draft(text),
            InputIntent::Submit => self.submit(),
        }
    }

    fn submit(&mut self) {
        let Some(request) = self.session.begin_submit() else {
            return;
        };

        let cycle = request.cycle;
        if let Err(err) = self.command_sender.try_send(SessionCommand::Ask(request)) {
            log::warn!("Failed to hand cycle {cycle} to the endpoint worker: {err}");
            self.session.resolve(cycle, Err(EndpointError::WorkerUnavailable));
        }
    }
}

impl eframe::App for ChatApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_session_events();

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            header::render(ui);
        });

        egui::TopBottomPanel::bottom("input_bar").show(ctx, |ui| {
            ui.add_space(4.0);
            let intents = input_bar::render(
                ui,
                self.session.draft(),
                self.session.is_pending(),
                self.session.can_submit(),
                &mut self.focus_input,
            );
            for intent in intents {
                self.apply(intent);
            }
            ui.add_space(4.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            chat_area::render(ui, self.session.messages(), self.session.is_pending());
        });

        // Poll for the worker's reply while a cycle is open.
        if self.session.is_pending() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}
