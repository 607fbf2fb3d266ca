//! Backend-independent LED painting.
//!
//! [`Led::paint`] turns the LED state into a handful of primitives and hands them
//! to a [`LedPainter`]. Coordinates are local to the widget's bounding box with
//! the origin at the top-left corner.

use kurbo::{Point, Rect, Size};

use crate::color::Rgb;
use crate::led::{Led, LedShape};

/// Preferred LED height in pixels.
pub const PREFERRED_SIZE: f64 = 18.0;

/// Brightness factor for the highlight side of the LED.
const HIGHLIGHT_FACTOR: i32 = 200;
/// Brightness factor for the shadow side of the LED.
const SHADOW_FACTOR: i32 = 200;

/// Theme colors an LED borrows from its surroundings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LedTheme {
    /// Border color of framed LEDs.
    pub dark: Rgb,
}

impl Default for LedTheme {
    fn default() -> Self {
        Self { dark: Rgb::GRAY }
    }
}

/// A radial gradient with a focal point, as used for the circular LED.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialGradient {
    pub center: Point,
    pub radius: f64,
    /// Point where the gradient starts (offset 0.0).
    pub focal: Point,
    /// Color stops sorted by offset in `[0, 1]`.
    pub stops: Vec<(f32, Rgb)>,
}

impl RadialGradient {
    /// Sample the gradient at offset `t`.
    pub fn color_at(&self, t: f32) -> Rgb {
        let Some(&(first_offset, first)) = self.stops.first() else {
            return Rgb::BLACK;
        };
        if t <= first_offset {
            return first;
        }
        for pair in self.stops.windows(2) {
            let (a_offset, a) = pair[0];
            let (b_offset, b) = pair[1];
            if t <= b_offset {
                let span = b_offset - a_offset;
                if span <= f32::EPSILON {
                    return b;
                }
                return a.lerp(b, (t - a_offset) / span);
            }
        }
        self.stops.last().map_or(first, |&(_, last)| last)
    }

    /// Gradient offset of `point`: 0.0 at the focal point, 1.0 on the circle.
    pub fn offset_of(&self, point: Point) -> f32 {
        if self.radius <= 0.0 {
            return 1.0;
        }
        let dir = point - self.focal;
        let len = dir.hypot();
        if len <= f64::EPSILON {
            return 0.0;
        }
        // Distance from the focal point to the circle along `dir`.
        let unit = dir / len;
        let fc = self.focal - self.center;
        let b = fc.dot(unit);
        let c = fc.hypot2() - self.radius * self.radius;
        let reach = -b + (b * b - c).max(0.0).sqrt();
        if reach <= f64::EPSILON {
            return 1.0;
        }
        (len / reach).clamp(0.0, 1.0) as f32
    }
}

/// Drawing primitives needed to paint an LED.
pub trait LedPainter {
    /// Draw a 1px line between two pixel positions (inclusive).
    fn line(&mut self, from: Point, to: Point, color: Rgb);

    /// Fill an axis-aligned rectangle.
    fn fill_rect(&mut self, rect: Rect, color: Rgb);

    /// Fill the circle inscribed in `bounds` with a radial gradient.
    fn fill_circle_gradient(&mut self, bounds: Rect, gradient: &RadialGradient);
}

/// Horizontal layout of a rectangular LED.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectGeometry {
    pub width: f64,
    pub left: f64,
    pub right: f64,
    pub height: f64,
}

impl RectGeometry {
    /// Center a square LED horizontally in a bounding box of `size`.
    pub fn compute(size: Size) -> Self {
        let width = size.height;
        let left = (((size.width - width) / 2.0).trunc() - 1.0).max(0.0);
        let right = ((size.width + width) / 2.0).trunc().min(size.width);
        Self {
            width,
            left,
            right,
            height: size.height,
        }
    }
}

/// Diameter of a circular LED in a bounding box of `size`.
pub fn round_diameter(size: Size) -> f64 {
    (size.width.min(size.height) - 2.0).max(0.0)
}

impl Led {
    /// Preferred widget size.
    pub fn size_hint(&self) -> Size {
        match self.shape() {
            LedShape::Circular => Size::new(PREFERRED_SIZE, PREFERRED_SIZE),
            LedShape::Rectangular => Size::new(PREFERRED_SIZE * self.ratio(), PREFERRED_SIZE),
        }
    }

    /// Smallest size the LED should be laid out at.
    pub fn minimum_size(&self) -> Size {
        Size::new(PREFERRED_SIZE, PREFERRED_SIZE)
    }

    /// Paint the LED into a bounding box of `size`.
    pub fn paint<P: LedPainter + ?Sized>(&self, size: Size, theme: &LedTheme, painter: &mut P) {
        match self.shape() {
            LedShape::Circular => self.paint_round(size, theme, painter),
            LedShape::Rectangular => self.paint_rectangular(size, theme, painter),
        }
    }

    /// Gradient used by the circular LED for a given diameter.
    pub fn round_gradient(&self, diameter: f64, theme: &LedTheme) -> RadialGradient {
        let color = self.active_color();
        let half = diameter / 2.0;
        let mut stops = vec![(0.0, color.lighter(HIGHLIGHT_FACTOR)), (0.6, color)];
        if self.is_framed() {
            stops.push((0.9, color.darker(SHADOW_FACTOR)));
            stops.push((1.0, theme.dark));
        } else {
            stops.push((1.0, color.darker(SHADOW_FACTOR)));
        }
        RadialGradient {
            center: Point::new(half, half),
            radius: half,
            focal: Point::new(0.8 * half, 0.8 * half),
            stops,
        }
    }

    fn paint_round<P: LedPainter + ?Sized>(&self, size: Size, theme: &LedTheme, painter: &mut P) {
        let diameter = round_diameter(size);
        if diameter <= 0.0 {
            return;
        }
        let gradient = self.round_gradient(diameter, theme);
        let bounds = Rect::new(1.0, 1.0, 1.0 + diameter, 1.0 + diameter);
        painter.fill_circle_gradient(bounds, &gradient);
    }

    fn paint_rectangular<P: LedPainter + ?Sized>(
        &self,
        size: Size,
        theme: &LedTheme,
        painter: &mut P,
    ) {
        let RectGeometry {
            left,
            right,
            height,
            ..
        } = RectGeometry::compute(size);
        if height < 2.0 || right - left < 2.0 {
            return;
        }
        let color = self.active_color();

        let highlight = color.lighter(HIGHLIGHT_FACTOR);
        painter.line(Point::new(left, 0.0), Point::new(left, height - 1.0), highlight);
        painter.line(Point::new(left + 1.0, 0.0), Point::new(right - 1.0, 0.0), highlight);

        let shadow = if self.is_framed() {
            theme.dark
        } else {
            color.darker(SHADOW_FACTOR)
        };
        painter.line(
            Point::new(left + 1.0, height - 1.0),
            Point::new(right - 1.0, height - 1.0),
            shadow,
        );
        painter.line(Point::new(right - 1.0, 1.0), Point::new(right - 1.0, height - 1.0), shadow);

        painter.fill_rect(Rect::new(left + 1.0, 1.0, right - 1.0, height - 1.0), color);
    }
}

/// A single recorded paint call.
#[derive(Debug, Clone, PartialEq)]
pub enum PaintOp {
    Line { from: Point, to: Point, color: Rgb },
    FillRect { rect: Rect, color: Rgb },
    CircleGradient { bounds: Rect, gradient: RadialGradient },
}

/// Painter that records the calls it receives.
#[derive(Debug, Default, Clone)]
pub struct RecordingPainter {
    pub ops: Vec<PaintOp>,
}

impl RecordingPainter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LedPainter for RecordingPainter {
    fn line(&mut self, from: Point, to: Point, color: Rgb) {
        self.ops.push(PaintOp::Line { from, to, color });
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        self.ops.push(PaintOp::FillRect { rect, color });
    }

    fn fill_circle_gradient(&mut self, bounds: Rect, gradient: &RadialGradient) {
        self.ops.push(PaintOp::CircleGradient {
            bounds,
            gradient: gradient.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_geometry() {
        let geom = RectGeometry::compute(Size::new(50.0, 20.0));
        assert!((geom.width - 20.0).abs() < f64::EPSILON);
        assert!((geom.left - 14.0).abs() < f64::EPSILON);
        assert!((geom.right - 35.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rect_geometry_narrow_box() {
        // Box narrower than tall: left clamps to 0, right to the box width
        let geom = RectGeometry::compute(Size::new(10.0, 20.0));
        assert!(geom.left.abs() < f64::EPSILON);
        assert!((geom.right - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_round_diameter() {
        assert!((round_diameter(Size::new(30.0, 20.0)) - 18.0).abs() < f64::EPSILON);
        assert!(round_diameter(Size::new(1.0, 20.0)).abs() < f64::EPSILON);
    }

    #[test]
    fn test_paint_all_shapes() {
        for shape in [LedShape::Circular, LedShape::Rectangular] {
            let led = Led::new(Rgb::RED, shape, 1.0);
            let mut painter = RecordingPainter::new();
            led.paint(Size::new(50.0, 20.0), &LedTheme::default(), &mut painter);
            assert!(!painter.ops.is_empty(), "{shape} painted nothing");
        }
    }

    #[test]
    fn test_paint_rectangular_ops() {
        let mut led = Led::new(Rgb::RED, LedShape::Rectangular, 1.0);
        led.set_framed(false);
        let mut painter = RecordingPainter::new();
        led.paint(Size::new(50.0, 20.0), &LedTheme::default(), &mut painter);

        assert_eq!(painter.ops.len(), 5);
        assert_eq!(
            painter.ops[0],
            PaintOp::Line {
                from: Point::new(14.0, 0.0),
                to: Point::new(14.0, 19.0),
                color: Rgb::RED.lighter(200),
            }
        );
        assert_eq!(
            painter.ops[2],
            PaintOp::Line {
                from: Point::new(15.0, 19.0),
                to: Point::new(34.0, 19.0),
                color: Rgb::RED.darker(200),
            }
        );
        assert_eq!(
            painter.ops[4],
            PaintOp::FillRect {
                rect: Rect::new(15.0, 1.0, 34.0, 19.0),
                color: Rgb::RED,
            }
        );
    }

    #[test]
    fn test_framed_border_uses_theme() {
        let mut led = Led::new(Rgb::RED, LedShape::Rectangular, 1.0);
        led.off();
        let theme = LedTheme {
            dark: Rgb::new(1, 2, 3),
        };
        let mut painter = RecordingPainter::new();
        led.paint(Size::new(20.0, 20.0), &theme, &mut painter);
        assert!(matches!(painter.ops[3], PaintOp::Line { color, .. } if color == theme.dark));
        assert!(matches!(painter.ops[4], PaintOp::FillRect { color, .. } if color == led.off_color()));
    }

    #[test]
    fn test_round_gradient_stops() {
        let led = Led::default();
        let theme = LedTheme::default();
        let gradient = led.round_gradient(18.0, &theme);
        assert_eq!(gradient.stops.len(), 4);
        assert_eq!(gradient.stops[3].1, theme.dark);
        assert!((gradient.focal.x - 7.2).abs() < 1e-9);

        let mut unframed = Led::default();
        unframed.set_framed(false);
        assert_eq!(unframed.round_gradient(18.0, &theme).stops.len(), 3);
    }

    #[test]
    fn test_gradient_sampling() {
        let led = Led::default();
        let gradient = led.round_gradient(20.0, &LedTheme::default());
        assert_eq!(gradient.color_at(0.0), Rgb::GREEN.lighter(200));
        assert_eq!(gradient.color_at(0.6), Rgb::GREEN);
        assert_eq!(gradient.offset_of(gradient.focal), 0.0);
        let edge = Point::new(gradient.center.x + gradient.radius, gradient.center.y);
        assert!((gradient.offset_of(edge) - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_size_hint() {
        let mut led = Led::default();
        assert_eq!(led.size_hint(), Size::new(18.0, 18.0));
        led.set_shape(LedShape::Rectangular);
        led.set_ratio(2.0);
        assert_eq!(led.size_hint(), Size::new(36.0, 18.0));
        assert_eq!(led.minimum_size(), Size::new(18.0, 18.0));
    }
}
