#![forbid(unsafe_code)]

use iform_core::event::{KeyCode, KeyEvent};

use super::{BodyLine, ErrorSlot, FieldValue, FieldWidget, Tone};
use crate::config::{FieldConfig, OptionItem};
use crate::countries::country_options;
use crate::validation::{ValidationResult, validate_dropdown};

/// Caption of the non-selectable first entry.
pub const DROPDOWN_PLACEHOLDER: &str = "Please select an option";

/// Single choice from a list, cycled with Left/Right.
///
/// Nothing is selected initially, which reads as the value `""`. Disabled
/// options are skipped by every way of moving the selection.
#[derive(Debug, Clone)]
pub struct DropdownField {
    config: FieldConfig,
    options: Vec<OptionItem>,
    disabled: Vec<bool>,
    selected: Option<usize>,
    error: ErrorSlot,
}

impl DropdownField {
    /// Dropdown over the config's own options.
    pub fn new(config: FieldConfig) -> Self {
        let options = config.options().to_vec();
        Self::with_options(config, options)
    }

    /// Dropdown over the built-in country list; config options are ignored.
    pub fn countries(config: FieldConfig) -> Self {
        Self::with_options(config, country_options())
    }

    fn with_options(config: FieldConfig, options: Vec<OptionItem>) -> Self {
        let mut disabled = vec![false; options.len()];
        for &i in config.disabled_indexes() {
            if let Some(d) = disabled.get_mut(i) {
                *d = true;
            }
        }
        Self {
            config,
            options,
            disabled,
            selected: None,
            error: ErrorSlot::default(),
        }
    }

    /// The listed options.
    pub fn options(&self) -> &[OptionItem] {
        &self.options
    }

    /// Index of the selected option.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Whether the option at `index` can be chosen.
    pub fn is_enabled(&self, index: usize) -> bool {
        self.disabled.get(index).is_some_and(|d| !d)
    }

    /// Select an option by index. Disabled or missing options are refused.
    pub fn select(&mut self, index: usize) -> bool {
        if self.is_enabled(index) {
            self.selected = Some(index);
            true
        } else {
            false
        }
    }

    fn step(&mut self, forward: bool) -> bool {
        let n = self.options.len();
        if n == 0 {
            return false;
        }
        // From "nothing selected" the first step lands on either end.
        let start = match (self.selected, forward) {
            (Some(i), _) => i,
            (None, true) => n - 1,
            (None, false) => 0,
        };
        let mut i = start;
        for _ in 0..n {
            i = if forward { (i + 1) % n } else { (i + n - 1) % n };
            if self.is_enabled(i) {
                self.selected = Some(i);
                return true;
            }
        }
        false
    }

    fn jump_to_initial(&mut self, c: char) -> bool {
        let c = c.to_lowercase().to_string();
        let n = self.options.len();
        let start = self.selected.map_or(0, |i| i + 1);
        let found = (0..n).map(|k| (start + k) % n).find(|&i| {
            self.is_enabled(i) && self.options[i].caption.to_lowercase().starts_with(&c)
        });
        match found {
            Some(i) => {
                self.selected = Some(i);
                true
            }
            None => false,
        }
    }

    fn caption(&self) -> Option<&str> {
        self.selected.map(|i| self.options[i].caption.as_str())
    }
}

impl FieldWidget for DropdownField {
    fn config(&self) -> &FieldConfig {
        &self.config
    }

    fn value(&self) -> FieldValue {
        FieldValue::Text(
            self.selected
                .map(|i| self.options[i].effective_value())
                .unwrap_or_default(),
        )
    }

    fn check(&self) -> ValidationResult {
        let value = self.value();
        validate_dropdown(self.config.required, value.as_text().unwrap_or_default())
    }

    fn error_slot(&self) -> &ErrorSlot {
        &self.error
    }

    fn error_slot_mut(&mut self) -> &mut ErrorSlot {
        &mut self.error
    }

    fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if !key.is_press() || key.ctrl() {
            return false;
        }
        match key.code {
            KeyCode::Right => self.step(true),
            KeyCode::Left => self.step(false),
            KeyCode::Home => {
                self.selected = None;
                self.step(true)
            }
            KeyCode::End => {
                self.selected = Some(0);
                self.step(false)
            }
            KeyCode::Char(c) if !c.is_whitespace() => self.jump_to_initial(c),
            _ => false,
        }
    }

    fn on_blur(&mut self) {
        self.validate();
    }

    fn body_lines(&self, focused: bool) -> Vec<BodyLine> {
        let (text, tone) = match self.caption() {
            Some(caption) => (caption, Tone::Normal),
            None => (DROPDOWN_PLACEHOLDER, Tone::Muted),
        };
        let text = if focused {
            format!("< {text} >")
        } else {
            format!("  {text}")
        };
        vec![BodyLine::new(text, tone)]
    }
}
