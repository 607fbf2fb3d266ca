//! LedKit Application
//!
//! Native demo shell: windowing, a Vello-rendered status strip and an egui
//! panel for toggling and restyling LEDs.

mod app;
mod config;
mod shortcuts;
mod ui;

pub use app::{App, AppError};
pub use config::AppConfig;
pub use shortcuts::{Shortcut, ShortcutRegistry};
pub use ui::{LedEntry, LedKind, UiAction, UiState, apply_action, render_ui};
