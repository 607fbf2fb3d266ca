//! Vello-based renderer implementation.

use crate::renderer::{RenderContext, Renderer, to_color};
use kurbo::{Affine, Cap, Circle, Line, Point, Rect, Size, Stroke};
use ledkit_core::{Led, LedPainter, LedTheme, RadialGradient, Rgb};
use peniko::{ColorStop, Fill, Gradient};
use vello::Scene;

/// [`LedPainter`] that appends to a Vello scene.
///
/// LED coordinates are mapped through `transform`, so one LED can be placed and
/// scaled anywhere in the scene.
pub struct VelloLedPainter<'s> {
    scene: &'s mut Scene,
    transform: Affine,
}

impl<'s> VelloLedPainter<'s> {
    pub fn new(scene: &'s mut Scene, transform: Affine) -> Self {
        Self { scene, transform }
    }
}

impl LedPainter for VelloLedPainter<'_> {
    fn line(&mut self, from: Point, to: Point, color: Rgb) {
        // Pixel centers, with square caps so both end pixels are covered.
        let line = Line::new(from + (0.5, 0.5), to + (0.5, 0.5));
        let stroke = Stroke::new(1.0).with_caps(Cap::Square);
        self.scene.stroke(&stroke, self.transform, to_color(color), None, &line);
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        self.scene.fill(Fill::NonZero, self.transform, to_color(color), None, &rect);
    }

    fn fill_circle_gradient(&mut self, bounds: Rect, gradient: &RadialGradient) {
        let stops: Vec<ColorStop> = gradient
            .stops
            .iter()
            .map(|&(offset, rgb)| ColorStop::from((offset, to_color(rgb))))
            .collect();
        let brush = Gradient::new_two_point_radial(
            gradient.focal,
            0.0,
            gradient.center,
            gradient.radius as f32,
        )
        .with_stops(stops.as_slice());

        let circle = Circle::new(bounds.center(), bounds.width().min(bounds.height()) / 2.0);
        self.scene.fill(Fill::NonZero, self.transform, &brush, None, &circle);
    }
}

/// Vello-based renderer for the LED status strip.
pub struct VelloRenderer {
    /// The Vello scene being built.
    scene: Scene,
}

impl Default for VelloRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl VelloRenderer {
    /// Create a new Vello renderer.
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
        }
    }

    /// Get the built scene.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Take ownership of the built scene, leaving an empty one behind.
    pub fn take_scene(&mut self) -> Scene {
        std::mem::take(&mut self.scene)
    }

    /// Paint a single LED into `cell` (in scene coordinates).
    pub fn render_led(&mut self, led: &Led, cell: Rect, theme: &LedTheme, scale: f64) {
        let transform = Affine::scale(scale) * Affine::translate(cell.origin().to_vec2());
        let mut painter = VelloLedPainter::new(&mut self.scene, transform);
        led.paint(Size::new(cell.width(), cell.height()), theme, &mut painter);
    }
}

impl Renderer for VelloRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) {
        self.scene.reset();

        let cells = ctx.cells();
        log::trace!("Building status strip with {} LEDs", cells.len());
        for (led, cell) in ctx.leds.iter().zip(cells) {
            self.render_led(led, cell, &ctx.theme, ctx.scale_factor);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledkit_core::LedShape;

    #[test]
    fn test_renderer_creation() {
        let renderer = VelloRenderer::new();
        assert!(renderer.scene().encoding().is_empty());
    }

    #[test]
    fn test_build_empty_scene() {
        let mut renderer = VelloRenderer::new();
        let ctx = RenderContext::new(Vec::new(), Size::new(800.0, 600.0));

        renderer.build_scene(&ctx);
        assert!(renderer.scene().encoding().is_empty());
    }

    #[test]
    fn test_build_scene_with_leds() {
        let mut renderer = VelloRenderer::new();
        let round = Led::default();
        let rect = Led::new(Rgb::YELLOW, LedShape::Rectangular, 1.5);

        let ctx = RenderContext::new(vec![&round, &rect], Size::new(800.0, 600.0))
            .with_scale_factor(2.0);
        renderer.build_scene(&ctx);
        assert!(!renderer.scene().encoding().is_empty());

        let scene = renderer.take_scene();
        assert!(!scene.encoding().is_empty());
        assert!(renderer.scene().encoding().is_empty());
    }
}
