//! LedKit Core Library
//!
//! Toolkit-agnostic state, color model and paint logic for LED status indicators.

pub mod click;
pub mod color;
pub mod config;
pub mod error;
pub mod led;
pub mod paint;
pub mod signal;

pub use click::{ClickEvent, ClickKind, ClickableLed, CursorShape, Modifiers, PointerButton, PointerPress};
pub use color::Rgb;
pub use config::{LedConfig, from_json, load_json, save_json};
pub use error::{LedError, LedResult};
pub use led::{DEFAULT_DARK_FACTOR, Led, LedShape, UpdateHook};
pub use paint::{
    LedPainter, LedTheme, PaintOp, RadialGradient, RecordingPainter, RectGeometry, round_diameter,
    PREFERRED_SIZE,
};
pub use signal::{Signal, SlotId};
