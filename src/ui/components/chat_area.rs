use eframe::egui;

use crate::common::{ChatMessage, Sender};

const WELCOME_TITLE: &str = "👋 Hello! I'm Nexus AI.";
const WELCOME_BODY: &str = "I'm connected to the company knowledge base. \
    Ask about manuals, open support tickets or request quotes.";

/// Colours and side of the window for one sender's bubbles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BubbleStyle {
    pub fill: egui::Color32,
    pub text: egui::Color32,
    pub timestamp: egui::Color32,
    pub align_right: bool,
}

pub fn bubble_style(sender: Sender) -> BubbleStyle {
    match sender {
        Sender::User => BubbleStyle {
            fill: egui::Color32::from_rgb(79, 70, 229),
            text: egui::Color32::WHITE,
            timestamp: egui::Color32::from_rgb(199, 210, 254),
            align_right: true,
        },
        Sender::Bot => BubbleStyle {
            fill: egui::Color32::from_rgb(243, 244, 246),
            text: egui::Color32::from_rgb(31, 41, 55),
            timestamp: egui::Color32::from_rgb(156, 163, 175),
            align_right: false,
        },
    }
}

pub fn render(ui: &mut egui::Ui, messages: &[ChatMessage], pending: bool) {
    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .stick_to_bottom(true)
        .show(ui, |ui| {
            if messages.is_empty() {
                render_welcome(ui);
            }

            for message in messages {
                render_message(ui, message);
                ui.add_space(6.0);
            }

            if pending {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label(egui::RichText::new("Bot is typing...").weak().italics());
                });
            }
        });
}

fn render_welcome(ui: &mut egui::Ui) {
    ui.add_space(24.0);
    ui.vertical_centered(|ui| {
        ui.label(egui::RichText::new(WELCOME_TITLE).strong());
        ui.label(egui::RichText::new(WELCOME_BODY).weak());
    });
}

fn render_message(ui: &mut egui::Ui, message: &ChatMessage) {
    let style = bubble_style(message.sender);
    let layout = if style.align_right {
        egui::Layout::right_to_left(egui::Align::TOP)
    } else {
        egui::Layout::left_to_right(egui::Align::TOP)
    };
    let max_width = ui.available_width() * 0.8;

    ui.with_layout(layout, |ui| {
        egui::Frame::new()
            .fill(style.fill)
            .corner_radius(egui::CornerRadius::same(8))
            .inner_margin(egui::Margin::same(8))
            .show(ui, |ui| {
                ui.set_max_width(max_width);
                ui.vertical(|ui| {
                    ui.label(egui::RichText::new(&message.text).color(style.text));
                    ui.label(
                        egui::RichText::new(message.time_of_day())
                            .small()
                            .color(style.timestamp),
                    )
                    .on_hover_text(format!("Sent at {}", message.time_of_day()));
                });
            });
    });
}
