//! LedKit Render Library
//!
//! Renderer abstraction for drawing LEDs outside of egui.
//! The default implementation uses Vello for GPU-accelerated rendering.

mod renderer;

#[cfg(feature = "vello-renderer")]
mod vello_impl;

pub use renderer::{RenderContext, Renderer, StripLayout, to_color};

#[cfg(feature = "vello-renderer")]
pub use vello_impl::{VelloLedPainter, VelloRenderer};
