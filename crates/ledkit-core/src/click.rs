//! Clickable LED: an [`Led`] that reports pointer presses.

use std::ops::{Deref, DerefMut};

use kurbo::Point;

use crate::color::Rgb;
use crate::config::LedConfig;
use crate::error::LedResult;
use crate::led::{Led, LedShape};
use crate::signal::{Signal, SlotId};

/// Pointer buttons a clickable LED distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Usually the left button.
    Primary,
    /// Usually the right button.
    Secondary,
    Middle,
}

/// Keyboard modifiers held during a press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        shift: false,
        alt: false,
    };
    pub const CTRL: Modifiers = Modifiers {
        ctrl: true,
        shift: false,
        alt: false,
    };
}

/// A pointer press in widget-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerPress {
    pub position: Point,
    pub button: PointerButton,
    pub modifiers: Modifiers,
}

impl PointerPress {
    pub fn new(position: Point, button: PointerButton) -> Self {
        Self {
            position,
            button,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// Which notification a press produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClickKind {
    Primary,
    Secondary,
}

impl ClickKind {
    /// Classify a press. Ctrl+primary counts as a secondary click; the
    /// secondary (right) button is not handled.
    pub fn classify(press: &PointerPress) -> Option<Self> {
        match press.button {
            PointerButton::Primary if press.modifiers.ctrl => Some(ClickKind::Secondary),
            PointerButton::Primary => Some(ClickKind::Primary),
            PointerButton::Middle => Some(ClickKind::Secondary),
            PointerButton::Secondary => None,
        }
    }
}

/// A click notification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClickEvent {
    pub position: Point,
    pub kind: ClickKind,
}

/// Cursor a widget asks for while hovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorShape {
    #[default]
    Default,
    PointingHand,
}

/// An LED that emits `clicked` and `middle_clicked` notifications.
///
/// Dereferences to the wrapped [`Led`], so all LED setters are available.
#[derive(Debug, Default)]
pub struct ClickableLed {
    led: Led,
    clicked: Signal<Point>,
    middle_clicked: Signal<Point>,
}

impl ClickableLed {
    pub fn new(color: Rgb, shape: LedShape, ratio: f64) -> Self {
        Self::from_led(Led::new(color, shape, ratio))
    }

    pub fn from_led(led: Led) -> Self {
        Self {
            led,
            clicked: Signal::new(),
            middle_clicked: Signal::new(),
        }
    }

    pub fn from_config(config: &LedConfig) -> LedResult<Self> {
        Led::from_config(config).map(Self::from_led)
    }

    pub fn led(&self) -> &Led {
        &self.led
    }

    pub fn led_mut(&mut self) -> &mut Led {
        &mut self.led
    }

    pub fn into_led(self) -> Led {
        self.led
    }

    /// Cursor shown while the pointer is over the LED.
    pub fn cursor(&self) -> CursorShape {
        CursorShape::PointingHand
    }

    /// Subscribe to primary clicks. The callback receives the local position.
    pub fn on_clicked(&mut self, slot: impl FnMut(&Point) + 'static) -> SlotId {
        self.clicked.connect(slot)
    }

    /// Subscribe to secondary (middle or Ctrl+primary) clicks.
    pub fn on_middle_clicked(&mut self, slot: impl FnMut(&Point) + 'static) -> SlotId {
        self.middle_clicked.connect(slot)
    }

    /// Remove a subscription made with either `on_*` method.
    pub fn disconnect(&mut self, id: SlotId) -> bool {
        self.clicked.disconnect(id) || self.middle_clicked.disconnect(id)
    }

    /// Dispatch a pointer press, notifying subscribers.
    ///
    /// Returns the emitted event, or `None` when the press is not handled.
    pub fn handle_press(&mut self, press: &PointerPress) -> Option<ClickEvent> {
        let kind = ClickKind::classify(press)?;
        log::debug!("LED {:?} click at ({}, {})", kind, press.position.x, press.position.y);
        match kind {
            ClickKind::Primary => self.clicked.emit(&press.position),
            ClickKind::Secondary => self.middle_clicked.emit(&press.position),
        }
        Some(ClickEvent {
            position: press.position,
            kind,
        })
    }
}

impl Deref for ClickableLed {
    type Target = Led;

    fn deref(&self) -> &Led {
        &self.led
    }
}

impl DerefMut for ClickableLed {
    fn deref_mut(&mut self) -> &mut Led {
        &mut self.led
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<(&'static str, Point)>>>;

    fn subscribed() -> (ClickableLed, Log) {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let mut led = ClickableLed::default();
        let primary = log.clone();
        led.on_clicked(move |p| primary.borrow_mut().push(("clicked", *p)));
        let secondary = log.clone();
        led.on_middle_clicked(move |p| secondary.borrow_mut().push(("middle", *p)));
        (led, log)
    }

    #[test]
    fn test_primary_click() {
        let (mut led, log) = subscribed();
        let event = led.handle_press(&PointerPress::new(Point::new(5.0, 5.0), PointerButton::Primary));
        assert_eq!(
            event,
            Some(ClickEvent {
                position: Point::new(5.0, 5.0),
                kind: ClickKind::Primary
            })
        );
        assert_eq!(*log.borrow(), vec![("clicked", Point::new(5.0, 5.0))]);
    }

    #[test]
    fn test_middle_click() {
        let (mut led, log) = subscribed();
        led.handle_press(&PointerPress::new(Point::new(3.0, 4.0), PointerButton::Middle));
        assert_eq!(*log.borrow(), vec![("middle", Point::new(3.0, 4.0))]);
    }

    #[test]
    fn test_ctrl_primary_is_secondary() {
        let (mut led, log) = subscribed();
        let press = PointerPress::new(Point::new(1.0, 2.0), PointerButton::Primary)
            .with_modifiers(Modifiers::CTRL);
        let event = led.handle_press(&press);
        assert_eq!(event.map(|e| e.kind), Some(ClickKind::Secondary));
        assert_eq!(*log.borrow(), vec![("middle", Point::new(1.0, 2.0))]);
    }

    #[test]
    fn test_right_button_ignored() {
        let (mut led, log) = subscribed();
        let event = led.handle_press(&PointerPress::new(Point::ZERO, PointerButton::Secondary));
        assert!(event.is_none());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_disconnect_and_led_forwarding() {
        let mut led = ClickableLed::new(Rgb::RED, LedShape::Rectangular, 2.0);
        let id = led.on_clicked(|_| panic!("disconnected slot called"));
        assert!(led.disconnect(id));
        led.handle_press(&PointerPress::new(Point::ZERO, PointerButton::Primary));

        led.toggle();
        assert!(!led.is_on());
        assert_eq!(led.shape(), LedShape::Rectangular);
        assert_eq!(led.cursor(), CursorShape::PointingHand);
    }

    #[test]
    fn test_disconnect_middle_keeps_primary() {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let mut led = ClickableLed::default();
        let primary = log.clone();
        let primary_id = led.on_clicked(move |p| primary.borrow_mut().push(("clicked", *p)));
        let secondary = log.clone();
        let middle_id = led.on_middle_clicked(move |p| secondary.borrow_mut().push(("middle", *p)));
        assert_ne!(primary_id, middle_id);

        assert!(led.disconnect(middle_id));
        led.handle_press(&PointerPress::new(Point::ZERO, PointerButton::Primary));
        led.handle_press(&PointerPress::new(Point::ZERO, PointerButton::Middle));
        assert_eq!(*log.borrow(), vec![("clicked", Point::ZERO)]);
    }
}
