//! Renderer trait abstraction.

use kurbo::{Point, Rect, Size};
use ledkit_core::{Led, LedTheme, Rgb};
use peniko::Color;

/// Convert an LED color to a peniko color.
pub fn to_color(rgb: Rgb) -> Color {
    Color::from_rgba8(rgb.r, rgb.g, rgb.b, 255)
}

/// Layout of the status strip: LEDs laid out left to right in equal cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StripLayout {
    /// Top-left corner of the first cell.
    pub origin: Point,
    /// Height of every cell; the width follows each LED's size hint.
    pub cell_height: f64,
    /// Gap between neighbouring cells.
    pub spacing: f64,
}

impl Default for StripLayout {
    fn default() -> Self {
        Self {
            origin: Point::new(16.0, 16.0),
            cell_height: 24.0,
            spacing: 8.0,
        }
    }
}

impl StripLayout {
    /// Cell rectangles for each LED, in order.
    ///
    /// Cells run left to right and wrap onto a new row when the next one would
    /// cross `max_width`. A row always holds at least one cell.
    pub fn cells<'a>(&self, leds: impl IntoIterator<Item = &'a Led>, max_width: f64) -> Vec<Rect> {
        let mut x = self.origin.x;
        let mut y = self.origin.y;
        leds.into_iter()
            .map(|led| {
                let hint = led.size_hint();
                let width = self.cell_height * hint.width / hint.height;
                if x > self.origin.x && x + width > max_width {
                    x = self.origin.x;
                    y += self.cell_height + self.spacing;
                }
                let cell = Rect::new(x, y, x + width, y + self.cell_height);
                x += width + self.spacing;
                cell
            })
            .collect()
    }
}

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// LEDs shown in the status strip.
    pub leds: Vec<&'a Led>,
    /// Viewport size in physical pixels. The strip wraps at its width.
    pub viewport_size: Size,
    /// Device pixel ratio (for HiDPI).
    pub scale_factor: f64,
    /// Background color.
    pub background_color: Color,
    /// Theme colors for framed LEDs.
    pub theme: LedTheme,
    /// Strip layout in logical pixels.
    pub layout: StripLayout,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context.
    pub fn new(leds: Vec<&'a Led>, viewport_size: Size) -> Self {
        Self {
            leds,
            viewport_size,
            scale_factor: 1.0,
            background_color: Color::from_rgba8(250, 250, 250, 255),
            theme: LedTheme::default(),
            layout: StripLayout::default(),
        }
    }

    /// Set the scale factor for HiDPI.
    pub fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    /// Set the background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    /// Set the theme used for framed LEDs.
    pub fn with_theme(mut self, theme: LedTheme) -> Self {
        self.theme = theme;
        self
    }

    /// Strip cells in logical pixels, wrapped to the viewport width.
    pub fn cells(&self) -> Vec<Rect> {
        let scale = if self.scale_factor > 0.0 { self.scale_factor } else { 1.0 };
        self.layout
            .cells(self.leds.iter().copied(), self.viewport_size.width / scale)
    }

    /// Set the strip layout.
    pub fn with_layout(mut self, layout: StripLayout) -> Self {
        self.layout = layout;
        self
    }
}

/// Trait for rendering backends.
pub trait Renderer: Send + Sync {
    /// Build the scene/command buffer for a frame.
    ///
    /// This method is called once per frame and should prepare all drawing commands.
    fn build_scene(&mut self, ctx: &RenderContext);

    /// Get the background color (for clearing).
    fn background_color(&self, ctx: &RenderContext) -> Color {
        ctx.background_color
    }
}
