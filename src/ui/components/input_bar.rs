use eframe::egui;

const SEND_BUTTON_WIDTH: f32 = 64.0;

/// What the user asked for while the bar was drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputIntent {
    DraftChanged(String),
    Submit,
}

/// Draws the input row. The text field is disabled while a request is in
/// flight and the Send button only while nothing can be submitted; the
/// session still re-checks every `Submit`.
pub fn render(
    ui: &mut egui::Ui,
    draft: &str,
    pending: bool,
    can_submit: bool,
    focus: &mut bool,
) -> Vec<InputIntent> {
    let mut buffer = draft.to_owned();
    let mut intents = Vec::new();

    ui.horizontal(|ui| {
        let width = (ui.available_width() - SEND_BUTTON_WIDTH).max(0.0);
        let edit = egui::TextEdit::singleline(&mut buffer)
            .hint_text("Type your question here...")
            .desired_width(width);
        let response = ui.add_enabled(!pending, edit);

        if !pending && std::mem::take(focus) {
            response.request_focus();
        }
        if response.changed() {
            intents.push(InputIntent::DraftChanged(buffer.clone()));
        }

        let enter = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        let clicked = ui
            .add_enabled(can_submit, egui::Button::new("Send"))
            .on_hover_text("Send message")
            .clicked();

        if clicked || enter {
            intents.push(InputIntent::Submit);
        }
    });

    intents
}
