//! LED widgets: plain and clickable indicators painted with egui shapes.

use egui::{
    Color32, CornerRadius, CursorIcon, Event, Mesh, Pos2, Rect, Response, Sense, Shape, Stroke,
    Ui, Vec2, Widget, vec2,
};
use kurbo::Point;
use ledkit_core::{
    ClickEvent, ClickableLed, CursorShape, Led, LedPainter, LedTheme, Modifiers, PointerButton,
    PointerPress, RadialGradient, Rgb,
};

/// Rings used to approximate the radial gradient.
const GRADIENT_RINGS: usize = 12;
/// Segments around the circle.
const GRADIENT_SEGMENTS: usize = 48;

/// Convert an LED color to an egui color.
pub fn to_color32(rgb: Rgb) -> Color32 {
    Color32::from_rgb(rgb.r, rgb.g, rgb.b)
}

/// Convert an egui color to an LED color, dropping alpha.
pub fn from_color32(color: Color32) -> Rgb {
    Rgb::new(color.r(), color.g(), color.b())
}

/// Theme colors derived from egui visuals.
pub fn led_theme_for_visuals(visuals: &egui::Visuals) -> LedTheme {
    LedTheme {
        dark: from_color32(visuals.widgets.noninteractive.bg_stroke.color),
    }
}

/// Theme colors taken from the current egui visuals.
pub fn led_theme(ui: &Ui) -> LedTheme {
    led_theme_for_visuals(ui.visuals())
}

/// Map an egui pointer button; extra buttons are not handled.
pub fn map_button(button: egui::PointerButton) -> Option<PointerButton> {
    match button {
        egui::PointerButton::Primary => Some(PointerButton::Primary),
        egui::PointerButton::Secondary => Some(PointerButton::Secondary),
        egui::PointerButton::Middle => Some(PointerButton::Middle),
        egui::PointerButton::Extra1 | egui::PointerButton::Extra2 => None,
    }
}

/// Map egui modifiers. `command` is Ctrl, or Cmd on macOS.
pub fn map_modifiers(modifiers: egui::Modifiers) -> Modifiers {
    Modifiers {
        ctrl: modifiers.command,
        shift: modifiers.shift,
        alt: modifiers.alt,
    }
}

fn to_cursor(cursor: CursorShape) -> CursorIcon {
    match cursor {
        CursorShape::Default => CursorIcon::Default,
        CursorShape::PointingHand => CursorIcon::PointingHand,
    }
}

/// [`LedPainter`] producing egui shapes positioned at `origin`.
pub struct EguiLedPainter {
    origin: Pos2,
    shapes: Vec<Shape>,
}

impl EguiLedPainter {
    pub fn new(origin: Pos2) -> Self {
        Self {
            origin,
            shapes: Vec::new(),
        }
    }

    fn pos(&self, point: Point) -> Pos2 {
        self.origin + vec2(point.x as f32, point.y as f32)
    }

    /// Consume the painter, returning the shapes in paint order.
    pub fn finish(self) -> Vec<Shape> {
        self.shapes
    }
}

impl LedPainter for EguiLedPainter {
    fn line(&mut self, from: Point, to: Point, color: Rgb) {
        let half = vec2(0.5, 0.5);
        self.shapes.push(Shape::line_segment(
            [self.pos(from) + half, self.pos(to) + half],
            Stroke::new(1.0, to_color32(color)),
        ));
    }

    fn fill_rect(&mut self, rect: kurbo::Rect, color: Rgb) {
        let rect = Rect::from_min_max(
            self.pos(Point::new(rect.x0, rect.y0)),
            self.pos(Point::new(rect.x1, rect.y1)),
        );
        self.shapes
            .push(Shape::rect_filled(rect, CornerRadius::ZERO, to_color32(color)));
    }

    fn fill_circle_gradient(&mut self, bounds: kurbo::Rect, gradient: &RadialGradient) {
        let center = bounds.center();
        let radius = bounds.width().min(bounds.height()) / 2.0;
        let mut mesh = Mesh::default();

        // Center vertex, then concentric rings; colors sampled per vertex.
        let color_at = |p: Point| to_color32(gradient.color_at(gradient.offset_of(p)));
        mesh.colored_vertex(self.pos(center), color_at(center));
        for ring in 1..=GRADIENT_RINGS {
            let r = radius * ring as f64 / GRADIENT_RINGS as f64;
            for seg in 0..GRADIENT_SEGMENTS {
                let angle = std::f64::consts::TAU * seg as f64 / GRADIENT_SEGMENTS as f64;
                let p = Point::new(center.x + r * angle.cos(), center.y + r * angle.sin());
                mesh.colored_vertex(self.pos(p), color_at(p));
            }
        }

        let ring_start = |ring: usize| (1 + (ring - 1) * GRADIENT_SEGMENTS) as u32;
        for seg in 0..GRADIENT_SEGMENTS {
            let next = (seg + 1) % GRADIENT_SEGMENTS;
            mesh.add_triangle(0, ring_start(1) + seg as u32, ring_start(1) + next as u32);
        }
        for ring in 2..=GRADIENT_RINGS {
            let inner = ring_start(ring - 1);
            let outer = ring_start(ring);
            for seg in 0..GRADIENT_SEGMENTS {
                let next = (seg + 1) % GRADIENT_SEGMENTS;
                let (seg, next) = (seg as u32, next as u32);
                mesh.add_triangle(inner + seg, outer + seg, outer + next);
                mesh.add_triangle(inner + seg, outer + next, inner + next);
            }
        }

        self.shapes.push(Shape::mesh(mesh));
    }
}

fn hint_size(led: &Led) -> Vec2 {
    let hint = led.size_hint();
    vec2(hint.width as f32, hint.height as f32)
}

/// Size to allocate: the override clamped to the LED's minimum, else the hint.
fn widget_size(led: &Led, size: Option<Vec2>) -> Vec2 {
    match size {
        Some(size) => {
            let min = led.minimum_size();
            size.max(vec2(min.width as f32, min.height as f32))
        }
        None => hint_size(led),
    }
}

/// Paint `led` into `rect` using the theme of `ui`.
pub fn paint_led(ui: &Ui, led: &Led, rect: Rect) {
    let mut painter = EguiLedPainter::new(rect.min);
    let size = rect.size();
    led.paint(
        kurbo::Size::new(size.x as f64, size.y as f64),
        &led_theme(ui),
        &mut painter,
    );
    ui.painter().extend(painter.finish());
}

/// Make state changes on `led` request a repaint of `ctx`.
pub fn install_repaint_hook(led: &mut Led, ctx: &egui::Context) {
    let ctx = ctx.clone();
    led.set_update_hook(move || ctx.request_repaint());
}

/// A non-interactive LED indicator.
pub struct LedWidget<'a> {
    led: &'a Led,
    size: Option<Vec2>,
}

impl<'a> LedWidget<'a> {
    pub fn new(led: &'a Led) -> Self {
        Self { led, size: None }
    }

    /// Override the size hint of the LED. Clamped to the LED's minimum size.
    pub fn size(mut self, size: Vec2) -> Self {
        self.size = Some(size);
        self
    }
}

impl Widget for LedWidget<'_> {
    fn ui(self, ui: &mut Ui) -> Response {
        let size = widget_size(self.led, self.size);
        let (rect, response) = ui.allocate_exact_size(size, Sense::hover());
        if ui.is_rect_visible(rect) {
            paint_led(ui, self.led, rect);
        }
        response
    }
}

/// An LED that forwards pointer presses to a [`ClickableLed`].
pub struct ClickableLedWidget<'a> {
    led: &'a mut ClickableLed,
    size: Option<Vec2>,
    tooltip: Option<&'a str>,
}

impl<'a> ClickableLedWidget<'a> {
    pub fn new(led: &'a mut ClickableLed) -> Self {
        Self {
            led,
            size: None,
            tooltip: None,
        }
    }

    /// Override the size hint of the LED. Clamped to the LED's minimum size.
    pub fn size(mut self, size: Vec2) -> Self {
        self.size = Some(size);
        self
    }

    pub fn tooltip(mut self, tooltip: &'a str) -> Self {
        self.tooltip = Some(tooltip);
        self
    }

    /// Show the LED and return the response plus the clicks it emitted this frame.
    pub fn show(self, ui: &mut Ui) -> (Response, Vec<ClickEvent>) {
        let size = widget_size(self.led.led(), self.size);
        let (rect, mut response) = ui.allocate_exact_size(size, Sense::click());

        let mut clicks = Vec::new();
        if ui.is_enabled() {
            // Presses must land inside the visible part, on this widget's layer.
            let target = ui.clip_rect().intersect(rect);
            let presses: Vec<(Pos2, egui::PointerButton, egui::Modifiers)> = ui.input(|input| {
                input
                    .events
                    .iter()
                    .filter_map(|event| match event {
                        Event::PointerButton {
                            pos,
                            button,
                            pressed: true,
                            modifiers,
                        } if target.contains(*pos) => Some((*pos, *button, *modifiers)),
                        _ => None,
                    })
                    .collect()
            });
            let layer_id = ui.layer_id();
            let on_top = |pos: Pos2| {
                ui.ctx()
                    .layer_id_at(pos)
                    .is_none_or(|layer| layer == layer_id)
            };

            for (pos, button, modifiers) in presses {
                if !on_top(pos) {
                    log::trace!("Ignoring LED press covered by another layer");
                    continue;
                }
                let Some(button) = map_button(button) else {
                    continue;
                };
                let local = pos - rect.min;
                let press = PointerPress::new(Point::new(local.x as f64, local.y as f64), button)
                    .with_modifiers(map_modifiers(modifiers));
                if let Some(click) = self.led.handle_press(&press) {
                    clicks.push(click);
                }
            }
        }
        if !clicks.is_empty() {
            response.mark_changed();
        }

        if ui.is_rect_visible(rect) {
            paint_led(ui, self.led.led(), rect);
        }

        let mut response = response.on_hover_cursor(to_cursor(self.led.cursor()));
        if let Some(tooltip) = self.tooltip {
            response = response.on_hover_text(tooltip);
        }
        (response, clicks)
    }
}

impl Widget for ClickableLedWidget<'_> {
    fn ui(self, ui: &mut Ui) -> Response {
        self.show(ui).0
    }
}
