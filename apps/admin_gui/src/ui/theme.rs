//! Console palette and status presentation tokens.

use egui::Color32;
use shared::domain::RegistrationStatus;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConsolePalette {
    pub app_background: Color32,
    pub surface: Color32,
    pub border: Color32,
    pub text: Color32,
    pub hint_text: Color32,
    pub primary: Color32,
    pub on_primary: Color32,
    pub success: Color32,
    pub warning: Color32,
    pub info: Color32,
    pub danger: Color32,
}

impl ConsolePalette {
    pub fn dark() -> Self {
        Self {
            app_background: Color32::from_rgb(24, 26, 32),
            surface: Color32::from_rgb(33, 36, 44),
            border: Color32::from_rgb(58, 62, 74),
            text: Color32::from_rgb(224, 226, 232),
            hint_text: Color32::from_rgb(148, 152, 164),
            primary: Color32::from_rgb(88, 101, 242),
            on_primary: Color32::WHITE,
            success: Color32::from_rgb(67, 181, 129),
            warning: Color32::from_rgb(226, 168, 61),
            info: Color32::from_rgb(88, 166, 255),
            danger: Color32::from_rgb(218, 92, 92),
        }
    }
}

pub fn lighten_color(c: Color32, t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let mix = |channel: u8| -> u8 {
        let channel = channel as f32;
        (channel + (255.0 - channel) * t).round().clamp(0.0, 255.0) as u8
    };
    Color32::from_rgba_unmultiplied(mix(c.r()), mix(c.g()), mix(c.b()), c.a())
}

/// Exhaustive status -> color mapping; adding a fifth status will not
/// compile until every presentation site is revisited.
pub fn status_color(palette: &ConsolePalette, status: RegistrationStatus) -> Color32 {
    match status {
        RegistrationStatus::Approved => palette.success,
        RegistrationStatus::Pending => palette.warning,
        RegistrationStatus::UnderVerification => palette.info,
        RegistrationStatus::Rejected => palette.danger,
    }
}

pub fn status_glyph(status: RegistrationStatus) -> &'static str {
    match status {
        RegistrationStatus::Approved => "✔",
        RegistrationStatus::Pending => "⏳",
        RegistrationStatus::UnderVerification => "🔍",
        RegistrationStatus::Rejected => "✖",
    }
}

/// Pill-shaped status badge used by both the cards and the table.
pub fn status_badge(ui: &mut egui::Ui, palette: &ConsolePalette, status: RegistrationStatus) {
    let color = status_color(palette, status);
    egui::Frame::NONE
        .fill(color.gamma_multiply(0.18))
        .corner_radius(egui::CornerRadius::same(9))
        .inner_margin(egui::Margin::symmetric(8, 3))
        .show(ui, |ui| {
            ui.label(
                egui::RichText::new(format!("{} {}", status_glyph(status), status.label()))
                    .color(color)
                    .size(11.0)
                    .strong(),
            );
        });
}

/// Bordered stat card: title, prominent value, one-line description.
pub fn stat_card(
    ui: &mut egui::Ui,
    palette: &ConsolePalette,
    width: f32,
    title: &str,
    value: &str,
    description: &str,
    glyph: &str,
) {
    egui::Frame::NONE
        .fill(palette.surface)
        .stroke(egui::Stroke::new(1.0, palette.border))
        .corner_radius(egui::CornerRadius::same(10))
        .inner_margin(egui::Margin::symmetric(14, 12))
        .show(ui, |ui| {
            ui.set_width(width);
            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.label(egui::RichText::new(title).color(palette.hint_text).size(12.0));
                    ui.label(
                        egui::RichText::new(value)
                            .color(palette.primary)
                            .size(22.0)
                            .strong(),
                    );
                    ui.label(
                        egui::RichText::new(description)
                            .color(palette.hint_text)
                            .size(10.5),
                    );
                });
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                    ui.label(egui::RichText::new(glyph).size(18.0));
                });
            });
        });
}
