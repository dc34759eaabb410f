use eframe::egui;

pub const TITLE: &str = "Nexus AI Support";
const SUBTITLE: &str = "Intelligent virtual assistant";

pub fn render(ui: &mut egui::Ui) {
    ui.horizontal(|ui| {
        ui.vertical(|ui| {
            ui.heading(TITLE);
            ui.label(egui::RichText::new(SUBTITLE).small().weak());
        });

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(
                egui::RichText::new("ONLINE")
                    .small()
                    .strong()
                    .color(egui::Color32::from_rgb(34, 197, 94)),
            );
        });
    });
}
