//! UI components using egui.

use egui::{Align2, Context, Slider, Vec2, vec2};
use ledkit_core::{ClickKind, ClickableLed, Led, LedConfig, LedResult, LedShape, Rgb};
use ledkit_widgets::{
    ClickableLedWidget, LedWidget, ToggleButton, color_row, panel_frame, section_label, sizing,
};

use crate::shortcuts::ShortcutRegistry;

/// Range offered by the dark factor slider.
const DARK_FACTOR_RANGE: std::ops::RangeInclusive<i32> = 100..=800;

/// An LED shown by the application.
pub enum LedKind {
    Plain(Led),
    Clickable(ClickableLed),
}

/// A labelled LED.
pub struct LedEntry {
    pub label: String,
    pub kind: LedKind,
}

impl LedEntry {
    /// Build an entry from its configuration.
    pub fn from_config(index: usize, config: &LedConfig) -> LedResult<Self> {
        let label = config
            .label
            .clone()
            .unwrap_or_else(|| format!("LED {}", index + 1));
        let kind = if config.clickable {
            LedKind::Clickable(ClickableLed::from_config(config)?)
        } else {
            LedKind::Plain(Led::from_config(config)?)
        };
        Ok(Self { label, kind })
    }

    pub fn led(&self) -> &Led {
        match &self.kind {
            LedKind::Plain(led) => led,
            LedKind::Clickable(led) => led.led(),
        }
    }

    pub fn led_mut(&mut self) -> &mut Led {
        match &mut self.kind {
            LedKind::Plain(led) => led,
            LedKind::Clickable(led) => led.led_mut(),
        }
    }

    pub fn is_clickable(&self) -> bool {
        matches!(self.kind, LedKind::Clickable(_))
    }
}

/// UI state that persists between frames.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Index of the LED edited in the properties section.
    pub selected: usize,
    /// Whether the shortcut help is expanded.
    pub show_help: bool,
}

/// Actions triggered by the UI.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UiAction {
    /// Edit the LED at this index.
    Select(usize),
    /// A clickable LED emitted a click.
    LedClicked { index: usize, kind: ClickKind },
    SetOn(usize, bool),
    SetShape(usize, LedShape),
    SetFramed(usize, bool),
    SetDarkFactor(usize, i32),
    SetColor(usize, Rgb),
    /// Toggle every LED.
    ToggleAll,
}

/// Apply a UI action to the LEDs.
pub fn apply_action(entries: &mut [LedEntry], ui_state: &mut UiState, action: UiAction) {
    log::debug!("UI action: {:?}", action);
    if let UiAction::ToggleAll = action {
        for entry in entries.iter_mut() {
            entry.led_mut().toggle();
        }
        return;
    }
    if let UiAction::Select(index) = action {
        if index < entries.len() {
            ui_state.selected = index;
        }
        return;
    }

    let index = match action {
        UiAction::LedClicked { index, .. }
        | UiAction::SetOn(index, _)
        | UiAction::SetShape(index, _)
        | UiAction::SetFramed(index, _)
        | UiAction::SetDarkFactor(index, _)
        | UiAction::SetColor(index, _) => index,
        UiAction::Select(_) | UiAction::ToggleAll => return,
    };
    let Some(entry) = entries.get_mut(index) else {
        log::warn!("UI action for unknown LED {}", index);
        return;
    };
    let led = entry.led_mut();

    match action {
        UiAction::LedClicked {
            kind: ClickKind::Primary,
            ..
        } => {
            led.toggle();
            ui_state.selected = index;
        }
        UiAction::LedClicked {
            kind: ClickKind::Secondary,
            ..
        } => {
            let next = led.shape().next();
            led.set_shape(next);
            ui_state.selected = index;
        }
        UiAction::SetOn(_, on) => led.set_on(on),
        UiAction::SetShape(_, shape) => led.set_shape(shape),
        UiAction::SetFramed(_, framed) => led.set_framed(framed),
        UiAction::SetDarkFactor(_, factor) => led.set_dark_factor(factor),
        UiAction::SetColor(_, color) => led.set_color(color),
        UiAction::Select(_) | UiAction::ToggleAll => {}
    }
}

/// Render all UI panels and return any triggered action.
pub fn render_ui(ctx: &Context, ui_state: &mut UiState, entries: &mut [LedEntry]) -> Option<UiAction> {
    let mut action = None;

    egui::Area::new(egui::Id::new("led_panel"))
        .anchor(Align2::RIGHT_TOP, Vec2::new(-12.0, 12.0))
        .show(ctx, |ui| {
            panel_frame().show(ui, |ui| {
                ui.set_width(240.0);
                section_label(ui, "LEDs");
                let list_action = render_led_list(ui, ui_state, entries);
                ui.separator();
                let props_action = render_properties(ui, ui_state, entries);
                ui.separator();
                render_help(ui, ui_state);
                action = list_action.or(props_action);
            });
        });

    action
}

fn render_led_list(ui: &mut egui::Ui, ui_state: &UiState, entries: &mut [LedEntry]) -> Option<UiAction> {
    let mut action = None;
    let led_height = sizing::LED;

    for (index, entry) in entries.iter_mut().enumerate() {
        ui.horizontal(|ui| {
            let hint = entry.led().size_hint();
            let size = vec2(led_height * (hint.width / hint.height) as f32, led_height);
            match &mut entry.kind {
                LedKind::Plain(led) => {
                    ui.add(LedWidget::new(led).size(size));
                }
                LedKind::Clickable(led) => {
                    let (_, clicks) = ClickableLedWidget::new(led)
                        .size(size)
                        .tooltip("Click to toggle, middle-click to change shape")
                        .show(ui);
                    if let Some(click) = clicks.first() {
                        action = Some(UiAction::LedClicked {
                            index,
                            kind: click.kind,
                        });
                    }
                }
            }
            if ui
                .add(ToggleButton::new(&entry.label, ui_state.selected == index).min_width(80.0))
                .clicked()
                && action.is_none()
            {
                action = Some(UiAction::Select(index));
            }
        });
    }

    action
}

fn render_properties(ui: &mut egui::Ui, ui_state: &UiState, entries: &[LedEntry]) -> Option<UiAction> {
    let index = ui_state.selected;
    let entry = entries.get(index)?;
    let led = entry.led();
    let mut action = None;

    section_label(ui, &format!("Properties - {}", entry.label));

    ui.horizontal(|ui| {
        if ui.add(ToggleButton::new("On", led.is_on())).clicked() {
            action = Some(UiAction::SetOn(index, true));
        }
        if ui.add(ToggleButton::new("Off", !led.is_on())).clicked() {
            action = Some(UiAction::SetOn(index, false));
        }
        ui.add_space(8.0);
        if ui.add(ToggleButton::new("Framed", led.is_framed())).clicked() {
            action = Some(UiAction::SetFramed(index, !led.is_framed()));
        }
    });

    ui.horizontal(|ui| {
        for shape in [LedShape::Circular, LedShape::Rectangular] {
            if ui
                .add(ToggleButton::new(shape.name(), led.shape() == shape).min_width(80.0))
                .clicked()
            {
                action = Some(UiAction::SetShape(index, shape));
            }
        }
    });

    let mut factor = led.dark_factor();
    if ui
        .add(Slider::new(&mut factor, DARK_FACTOR_RANGE).text("Dark factor"))
        .changed()
    {
        action = Some(UiAction::SetDarkFactor(index, factor));
    }

    if let Some(color) = color_row(ui, led.color()) {
        action = Some(UiAction::SetColor(index, color));
    }

    action
}

fn render_help(ui: &mut egui::Ui, ui_state: &mut UiState) {
    if ui.add(ToggleButton::new("Shortcuts", ui_state.show_help)).clicked() {
        ui_state.show_help = !ui_state.show_help;
    }
    if ui_state.show_help {
        for shortcut in ShortcutRegistry::all() {
            ui.label(format!("{}: {}", shortcut.format(), shortcut.description));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries() -> Vec<LedEntry> {
        let plain = LedConfig::default();
        let clickable = LedConfig {
            clickable: true,
            label: Some("Link".to_string()),
            ..Default::default()
        };
        vec![
            LedEntry::from_config(0, &plain).unwrap(),
            LedEntry::from_config(1, &clickable).unwrap(),
        ]
    }

    #[test]
    fn test_entry_labels() {
        let entries = entries();
        assert_eq!(entries[0].label, "LED 1");
        assert_eq!(entries[1].label, "Link");
        assert!(!entries[0].is_clickable());
        assert!(entries[1].is_clickable());
    }

    #[test]
    fn test_primary_click_toggles_and_selects() {
        let mut entries = entries();
        let mut state = UiState::default();
        apply_action(
            &mut entries,
            &mut state,
            UiAction::LedClicked {
                index: 1,
                kind: ClickKind::Primary,
            },
        );
        assert!(!entries[1].led().is_on());
        assert_eq!(state.selected, 1);
    }

    #[test]
    fn test_secondary_click_cycles_shape() {
        let mut entries = entries();
        let mut state = UiState::default();
        apply_action(
            &mut entries,
            &mut state,
            UiAction::LedClicked {
                index: 1,
                kind: ClickKind::Secondary,
            },
        );
        assert_eq!(entries[1].led().shape(), LedShape::Rectangular);
    }

    #[test]
    fn test_property_actions() {
        let mut entries = entries();
        let mut state = UiState::default();
        apply_action(&mut entries, &mut state, UiAction::SetDarkFactor(0, 500));
        apply_action(&mut entries, &mut state, UiAction::SetColor(0, Rgb::RED));
        apply_action(&mut entries, &mut state, UiAction::SetFramed(0, false));
        let led = entries[0].led();
        assert_eq!(led.dark_factor(), 500);
        assert_eq!(led.off_color(), Rgb::RED.darker(500));
        assert!(!led.is_framed());
    }

    #[test]
    fn test_toggle_all_and_out_of_range() {
        let mut entries = entries();
        let mut state = UiState::default();
        apply_action(&mut entries, &mut state, UiAction::ToggleAll);
        assert!(entries.iter().all(|entry| !entry.led().is_on()));

        apply_action(&mut entries, &mut state, UiAction::SetOn(9, true));
        apply_action(&mut entries, &mut state, UiAction::Select(9));
        assert_eq!(state.selected, 0);
    }
}
