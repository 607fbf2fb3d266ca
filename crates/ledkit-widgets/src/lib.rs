//! egui widgets for LedKit status LEDs.
//!
//! - **LEDs**: plain and clickable indicators backed by `ledkit-core` state
//! - **Controls**: toggle buttons and color swatches for editing LEDs
//! - **Layout**: section labels and the panel frame

pub mod controls;
pub mod layout;
pub mod led;

pub use controls::{ColorSwatch, LED_PALETTE, ToggleButton, color_row};
pub use layout::{panel_frame, section_label};
pub use led::{
    ClickableLedWidget, EguiLedPainter, LedWidget, from_color32, install_repaint_hook, led_theme,
    led_theme_for_visuals, map_button, map_modifiers, paint_led, to_color32,
};

/// Standard sizing constants used across widgets.
pub mod sizing {
    /// Small button size (color swatches)
    pub const SMALL: f32 = 20.0;
    /// Size of LEDs in the demo panel
    pub const LED: f32 = 24.0;
    /// Height of toggle buttons
    pub const BUTTON_HEIGHT: f32 = 22.0;
    /// Standard corner radius
    pub const CORNER_RADIUS: u8 = 4;
    /// Panel corner radius
    pub const PANEL_RADIUS: u8 = 8;
}

/// Standard colors used across widgets.
pub mod theme {
    use egui::Color32;

    /// Text color (dark gray)
    pub const TEXT: Color32 = Color32::from_rgb(60, 60, 60);
    /// Muted text color
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(120, 120, 120);
    /// Border color
    pub const BORDER: Color32 = Color32::from_rgb(220, 220, 220);
    /// Selection/active color (blue)
    pub const ACCENT: Color32 = Color32::from_rgb(59, 130, 246);
    /// Hover background
    pub const HOVER_BG: Color32 = Color32::from_rgb(235, 235, 235);
    /// Panel background
    pub const PANEL_BG: Color32 = Color32::from_rgba_premultiplied(250, 250, 252, 250);
}
