//! Controls of the LED panel.

use egui::{
    Color32, CornerRadius, CursorIcon, Pos2, Response, Sense, Stroke, StrokeKind, Ui, Vec2,
    Widget, vec2,
};
use ledkit_core::Rgb;

use crate::led::to_color32;
use crate::{sizing, theme};

/// Colors offered by the LED color picker.
pub const LED_PALETTE: [(&str, Rgb); 8] = [
    ("Green", Rgb::GREEN),
    ("Red", Rgb::RED),
    ("Yellow", Rgb::YELLOW),
    ("Orange", Rgb::ORANGE),
    ("Blue", Rgb::BLUE),
    ("Cyan", Rgb::CYAN),
    ("Magenta", Rgb::MAGENTA),
    ("White", Rgb::WHITE),
];

/// A pill-shaped button with a small status lamp, lit while `selected`.
pub struct ToggleButton<'a> {
    label: &'a str,
    selected: bool,
    min_width: f32,
}

impl<'a> ToggleButton<'a> {
    pub fn new(label: &'a str, selected: bool) -> Self {
        Self {
            label,
            selected,
            min_width: 0.0,
        }
    }

    pub fn min_width(mut self, width: f32) -> Self {
        self.min_width = width;
        self
    }
}

impl Widget for ToggleButton<'_> {
    fn ui(self, ui: &mut Ui) -> Response {
        const LAMP_RADIUS: f32 = 3.5;
        const PADDING: f32 = 8.0;

        let galley = ui.painter().layout_no_wrap(
            self.label.to_string(),
            egui::FontId::proportional(11.0),
            theme::TEXT,
        );
        let content_width = PADDING + 2.0 * LAMP_RADIUS + 6.0 + galley.size().x + PADDING;
        let size = vec2(content_width.max(self.min_width), sizing::BUTTON_HEIGHT);
        let (rect, response) = ui.allocate_exact_size(size, Sense::click());

        if ui.is_rect_visible(rect) {
            let painter = ui.painter();
            let radius = CornerRadius::same((sizing::BUTTON_HEIGHT / 2.0) as u8);
            let fill = if response.hovered() {
                theme::HOVER_BG
            } else {
                theme::PANEL_BG
            };
            let outline = if self.selected {
                theme::ACCENT
            } else {
                theme::BORDER
            };
            painter.rect(rect, radius, fill, Stroke::new(1.0, outline), StrokeKind::Inside);

            let lamp = Pos2::new(rect.left() + PADDING + LAMP_RADIUS, rect.center().y);
            let lamp_color = if self.selected {
                theme::ACCENT
            } else {
                theme::BORDER
            };
            painter.circle_filled(lamp, LAMP_RADIUS, lamp_color);

            let text_pos = Pos2::new(
                lamp.x + LAMP_RADIUS + 6.0,
                rect.center().y - galley.size().y / 2.0,
            );
            painter.galley(text_pos, galley, theme::TEXT);
        }

        response.on_hover_cursor(CursorIcon::PointingHand)
    }
}

/// A clickable color swatch.
pub struct ColorSwatch<'a> {
    color: Rgb,
    tooltip: &'a str,
    selected: bool,
    size: Vec2,
}

impl<'a> ColorSwatch<'a> {
    /// Create a new color swatch.
    pub fn new(color: Rgb, tooltip: &'a str) -> Self {
        Self {
            color,
            tooltip,
            selected: false,
            size: vec2(sizing::SMALL, sizing::SMALL),
        }
    }

    /// Set whether this swatch is selected.
    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    /// Show the swatch and return true if clicked.
    pub fn show(self, ui: &mut Ui) -> bool {
        let (rect, response) = ui.allocate_exact_size(self.size, Sense::click());

        if ui.is_rect_visible(rect) {
            let center = rect.center();
            let radius = rect.width().min(rect.height()) / 2.0;
            ui.painter().circle_filled(center, radius, to_color32(self.color));
            ui.painter()
                .circle_stroke(center, radius, Stroke::new(1.0, theme::BORDER));
            if self.selected {
                ui.painter()
                    .circle_stroke(center, radius - 3.0, Stroke::new(2.0, Color32::from_gray(30)));
            } else if response.hovered() {
                ui.painter().rect_stroke(
                    rect.expand(1.0),
                    CornerRadius::same(sizing::CORNER_RADIUS),
                    Stroke::new(1.0, theme::ACCENT),
                    StrokeKind::Outside,
                );
            }
        }

        let clicked = response.clicked();
        response.on_hover_text(self.tooltip).on_hover_cursor(CursorIcon::PointingHand);
        clicked
    }
}

/// Show a row of palette swatches; returns the picked color, if any.
pub fn color_row(ui: &mut Ui, current: Rgb) -> Option<Rgb> {
    let mut picked = None;
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing = vec2(4.0, 0.0);
        for (name, color) in LED_PALETTE {
            if ColorSwatch::new(color, name).selected(color == current).show(ui) {
                picked = Some(color);
            }
        }
    });
    picked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_button_min_width() {
        let ctx = egui::Context::default();
        let mut widths = Vec::new();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                widths.push(ui.add(ToggleButton::new("On", true).min_width(80.0)).rect.width());
                widths.push(ui.add(ToggleButton::new("On", false)).rect.width());
            });
        });
        assert_eq!(widths[0], 80.0);
        assert!(widths[1] < 80.0 && widths[1] > 23.0);
    }
}
