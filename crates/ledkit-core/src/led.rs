//! LED indicator state.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::config::LedConfig;
use crate::error::{LedError, LedResult};

/// Default divisor applied to the base color to obtain the "off" color.
pub const DEFAULT_DARK_FACTOR: i32 = 300;

/// Shape of an LED.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LedShape {
    /// A bevelled rectangle.
    Rectangular,
    /// A glossy sphere.
    #[default]
    Circular,
}

impl LedShape {
    /// Numeric shape code (0 = rectangular, 1 = circular).
    pub fn code(self) -> u8 {
        match self {
            LedShape::Rectangular => 0,
            LedShape::Circular => 1,
        }
    }

    /// Get display name for this shape.
    pub fn name(self) -> &'static str {
        match self {
            LedShape::Rectangular => "rectangular",
            LedShape::Circular => "circular",
        }
    }

    /// Cycle to the other shape.
    pub fn next(self) -> Self {
        match self {
            LedShape::Rectangular => LedShape::Circular,
            LedShape::Circular => LedShape::Rectangular,
        }
    }
}

impl fmt::Display for LedShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for LedShape {
    type Error = LedError;

    fn try_from(code: u8) -> LedResult<Self> {
        match code {
            0 => Ok(LedShape::Rectangular),
            1 => Ok(LedShape::Circular),
            other => Err(LedError::UnsupportedShape(other.to_string())),
        }
    }
}

impl FromStr for LedShape {
    type Err = LedError;

    fn from_str(s: &str) -> LedResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rectangular" | "rect" => Ok(LedShape::Rectangular),
            "circular" | "round" => Ok(LedShape::Circular),
            _ => Err(LedError::UnsupportedShape(s.to_string())),
        }
    }
}

impl TryFrom<String> for LedShape {
    type Error = LedError;

    fn try_from(value: String) -> LedResult<Self> {
        value.parse()
    }
}

impl From<LedShape> for String {
    fn from(shape: LedShape) -> Self {
        shape.name().to_string()
    }
}

/// Callback invoked whenever the LED needs to be repainted.
pub type UpdateHook = Box<dyn FnMut()>;

/// A lit/unlit status light.
///
/// All setters that change the appearance call the update hook, so the owning
/// UI can schedule a repaint. Setters called with the current value are no-ops.
pub struct Led {
    on: bool,
    color: Rgb,
    off_color: Rgb,
    shape: LedShape,
    ratio: f64,
    dark_factor: i32,
    framed: bool,
    update_hook: Option<UpdateHook>,
}

impl Led {
    /// Create a new LED with the given color, shape and width/height ratio.
    pub fn new(color: Rgb, shape: LedShape, ratio: f64) -> Self {
        let ratio = if ratio.is_finite() && ratio > 0.0 { ratio } else { 1.0 };
        Self {
            on: true,
            color,
            off_color: color.darker(DEFAULT_DARK_FACTOR),
            shape,
            ratio,
            dark_factor: DEFAULT_DARK_FACTOR,
            framed: true,
            update_hook: None,
        }
    }

    /// Create an LED from a validated configuration entry.
    pub fn from_config(config: &LedConfig) -> LedResult<Self> {
        config.validate()?;
        let mut led = Self::new(config.color, config.shape, config.ratio);
        led.on = config.on;
        led.framed = config.framed;
        led.dark_factor = config.dark_factor;
        led.off_color = led.color.darker(led.dark_factor);
        Ok(led)
    }

    /// Install the repaint callback, replacing any previous one.
    pub fn set_update_hook(&mut self, hook: impl FnMut() + 'static) {
        self.update_hook = Some(Box::new(hook));
    }

    /// Remove the repaint callback.
    pub fn clear_update_hook(&mut self) {
        self.update_hook = None;
    }

    fn update(&mut self) {
        if let Some(hook) = self.update_hook.as_mut() {
            hook();
        }
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    pub fn set_on(&mut self, on: bool) {
        if self.on == on {
            return;
        }
        self.on = on;
        log::debug!("LED switched {}", if on { "on" } else { "off" });
        self.update();
    }

    /// Switch the LED on.
    pub fn on(&mut self) {
        self.set_on(true);
    }

    /// Switch the LED off.
    pub fn off(&mut self) {
        self.set_on(false);
    }

    pub fn toggle(&mut self) {
        self.set_on(!self.on);
    }

    /// Base ("on") color.
    pub fn color(&self) -> Rgb {
        self.color
    }

    /// Derived color used while the LED is off.
    pub fn off_color(&self) -> Rgb {
        self.off_color
    }

    /// The color currently shown, depending on the on/off state.
    pub fn active_color(&self) -> Rgb {
        if self.on { self.color } else { self.off_color }
    }

    pub fn set_color(&mut self, color: Rgb) {
        if self.color == color {
            return;
        }
        self.color = color;
        self.off_color = color.darker(self.dark_factor);
        log::debug!("LED color set to {}", color);
        self.update();
    }

    pub fn shape(&self) -> LedShape {
        self.shape
    }

    pub fn set_shape(&mut self, shape: LedShape) {
        if self.shape == shape {
            return;
        }
        self.shape = shape;
        self.update();
    }

    /// Width to height ratio used by rectangular LEDs.
    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    /// Set the width to height ratio. Non-finite or non-positive values are ignored.
    pub fn set_ratio(&mut self, ratio: f64) {
        if !(ratio.is_finite() && ratio > 0.0) {
            log::warn!("Ignoring invalid LED ratio {}", ratio);
            return;
        }
        if self.ratio == ratio {
            return;
        }
        self.ratio = ratio;
        self.update();
    }

    pub fn is_framed(&self) -> bool {
        self.framed
    }

    /// Whether the border uses the theme's dark color instead of a darkened LED color.
    pub fn set_framed(&mut self, framed: bool) {
        if self.framed == framed {
            return;
        }
        self.framed = framed;
        self.update();
    }

    pub fn dark_factor(&self) -> i32 {
        self.dark_factor
    }

    /// Set the divisor (in percent) used to derive the off color.
    pub fn set_dark_factor(&mut self, dark_factor: i32) {
        if self.dark_factor == dark_factor {
            return;
        }
        if dark_factor <= 0 {
            log::warn!("Dark factor {} leaves the off color unchanged", dark_factor);
        }
        self.dark_factor = dark_factor;
        self.off_color = self.color.darker(dark_factor);
        self.update();
    }
}

impl Default for Led {
    fn default() -> Self {
        Self::new(Rgb::GREEN, LedShape::Circular, 1.0)
    }
}

impl fmt::Debug for Led {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Led")
            .field("on", &self.on)
            .field("color", &self.color)
            .field("off_color", &self.off_color)
            .field("shape", &self.shape)
            .field("ratio", &self.ratio)
            .field("dark_factor", &self.dark_factor)
            .field("framed", &self.framed)
            .field("has_update_hook", &self.update_hook.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn repaint_counter(led: &mut Led) -> Rc<Cell<usize>> {
        let count = Rc::new(Cell::new(0));
        let hook_count = count.clone();
        led.set_update_hook(move || hook_count.set(hook_count.get() + 1));
        count
    }

    #[test]
    fn test_defaults() {
        let led = Led::default();
        assert!(led.is_on());
        assert_eq!(led.color(), Rgb::GREEN);
        assert_eq!(led.shape(), LedShape::Circular);
        assert_eq!(led.dark_factor(), 300);
        assert_eq!(led.off_color(), Rgb::GREEN.darker(300));
        assert!(led.is_framed());
    }

    #[test]
    fn test_toggle() {
        let mut led = Led::default();
        let repaints = repaint_counter(&mut led);
        led.toggle();
        assert!(!led.is_on());
        assert_eq!(led.active_color(), led.off_color());
        led.toggle();
        assert!(led.is_on());
        assert_eq!(led.active_color(), led.color());
        assert_eq!(repaints.get(), 2);
    }

    #[test]
    fn test_set_on_unchanged_is_noop() {
        let mut led = Led::default();
        let repaints = repaint_counter(&mut led);
        led.on();
        assert_eq!(repaints.get(), 0);
        led.off();
        led.off();
        assert_eq!(repaints.get(), 1);
    }

    #[test]
    fn test_set_color_recomputes_off_color() {
        let mut led = Led::default();
        led.set_color(Rgb::RED);
        assert_eq!(led.color(), Rgb::RED);
        assert_eq!(led.off_color(), Rgb::new(85, 0, 0));
    }

    #[test]
    fn test_dark_factor_roundtrip() {
        let mut led = Led::default();
        let repaints = repaint_counter(&mut led);
        led.set_dark_factor(150);
        assert_eq!(led.dark_factor(), 150);
        assert_eq!(led.off_color(), Rgb::GREEN.darker(150));
        assert_eq!(repaints.get(), 1);
    }

    #[test]
    fn test_unchanged_dark_factor_does_not_repaint() {
        let mut led = Led::default();
        let repaints = repaint_counter(&mut led);
        led.set_dark_factor(300);
        assert_eq!(repaints.get(), 0);
    }

    #[test]
    fn test_shape_framed_ratio_setters() {
        let mut led = Led::default();
        let repaints = repaint_counter(&mut led);
        led.set_shape(LedShape::Rectangular);
        led.set_framed(false);
        led.set_ratio(2.5);
        led.set_ratio(f64::NAN);
        led.set_ratio(-1.0);
        assert_eq!(led.shape(), LedShape::Rectangular);
        assert!(!led.is_framed());
        assert!((led.ratio() - 2.5).abs() < f64::EPSILON);
        assert_eq!(repaints.get(), 3);
    }

    #[test]
    fn test_shape_codes() {
        assert_eq!(LedShape::try_from(0).unwrap(), LedShape::Rectangular);
        assert_eq!(LedShape::try_from(1).unwrap(), LedShape::Circular);
        assert!(matches!(LedShape::try_from(7), Err(LedError::UnsupportedShape(code)) if code == "7"));
        assert!(matches!("hexagon".parse::<LedShape>(), Err(LedError::UnsupportedShape(_))));
        assert_eq!(LedShape::Circular.next(), LedShape::Rectangular);
    }
}
