#![forbid(unsafe_code)]

use iform_core::event::{KeyCode, KeyEvent};

use super::{BodyLine, ErrorSlot, FieldValue, FieldWidget, Tone};
use crate::config::{FieldConfig, OptionItem};
use crate::validation::{ValidationResult, validate_options};

/// Whether at most one or any number of options may be checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionsKind {
    Radio,
    Checkbox,
}

/// A radio or checkbox group.
///
/// Up/Down belong to form navigation, so the cursor moves with Left/Right
/// and Space toggles the option under it. Digits `1`..=`9` toggle an option
/// directly. Disabled options are skipped by the cursor and never toggle.
#[derive(Debug, Clone)]
pub struct OptionsField {
    config: FieldConfig,
    kind: OptionsKind,
    options: Vec<OptionItem>,
    checked: Vec<bool>,
    disabled: Vec<bool>,
    cursor: usize,
    error: ErrorSlot,
}

impl OptionsField {
    pub fn new(config: FieldConfig, kind: OptionsKind) -> Self {
        let options = config.options().to_vec();
        let checked = vec![false; options.len()];
        let mut disabled = vec![false; options.len()];
        for &i in config.disabled_indexes() {
            if let Some(d) = disabled.get_mut(i) {
                *d = true;
            }
        }
        let cursor = disabled.iter().position(|d| !d).unwrap_or(0);
        Self {
            config,
            kind,
            options,
            checked,
            disabled,
            cursor,
            error: ErrorSlot::default(),
        }
    }

    /// Whether the option at `index` exists and can be toggled.
    pub fn is_enabled(&self, index: usize) -> bool {
        self.disabled.get(index).is_some_and(|d| !d)
    }

    fn enabled_in(&self, mut range: impl Iterator<Item = usize>) -> Option<usize> {
        range.find(|&i| self.is_enabled(i))
    }

    pub fn kind(&self) -> OptionsKind {
        self.kind
    }

    /// Checked state per option.
    pub fn checked(&self) -> &[bool] {
        &self.checked
    }

    /// Option under the cursor.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Toggle the option at `index`.
    ///
    /// A radio option becomes the only checked one; checking it again
    /// leaves it checked. Missing and disabled options are refused.
    pub fn toggle(&mut self, index: usize) -> bool {
        if !self.is_enabled(index) {
            return false;
        }
        match self.kind {
            OptionsKind::Radio => {
                for (i, c) in self.checked.iter_mut().enumerate() {
                    *c = i == index;
                }
            }
            OptionsKind::Checkbox => self.checked[index] = !self.checked[index],
        }
        self.cursor = index;
        true
    }
}

impl FieldWidget for OptionsField {
    fn config(&self) -> &FieldConfig {
        &self.config
    }

    fn value(&self) -> FieldValue {
        FieldValue::Options(
            self.options
                .iter()
                .zip(&self.checked)
                .filter(|(_, c)| **c)
                .map(|(o, _)| o.clone())
                .collect(),
        )
    }

    fn check(&self) -> ValidationResult {
        validate_options(self.config.required, &self.checked)
    }

    fn error_slot(&self) -> &ErrorSlot {
        &self.error
    }

    fn error_slot_mut(&mut self) -> &mut ErrorSlot {
        &mut self.error
    }

    fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if !key.is_press() || key.ctrl() || self.options.is_empty() {
            return false;
        }
        let len = self.options.len();
        let target = match key.code {
            KeyCode::Left => Some(self.enabled_in((0..self.cursor).rev())),
            KeyCode::Right => Some(self.enabled_in(self.cursor + 1..len)),
            KeyCode::Home => Some(self.enabled_in(0..len)),
            KeyCode::End => Some(self.enabled_in((0..len).rev())),
            _ => None,
        };
        if let Some(target) = target {
            if let Some(index) = target {
                self.cursor = index;
            }
            return true;
        }
        match key.code {
            KeyCode::Char(' ') => self.toggle(self.cursor),
            KeyCode::Char(c) => match c.to_digit(10) {
                Some(d) if d >= 1 => self.toggle(d as usize - 1),
                _ => false,
            },
            _ => false,
        }
    }

    fn body_lines(&self, focused: bool) -> Vec<BodyLine> {
        self.options
            .iter()
            .zip(&self.checked)
            .enumerate()
            .map(|(i, (option, &checked))| {
                let mark = match (self.kind, checked) {
                    (OptionsKind::Radio, true) => "(•)",
                    (OptionsKind::Radio, false) => "( )",
                    (OptionsKind::Checkbox, true) => "[x]",
                    (OptionsKind::Checkbox, false) => "[ ]",
                };
                let tone = if !self.is_enabled(i) {
                    Tone::Disabled
                } else if focused && i == self.cursor {
                    Tone::Cursor
                } else {
                    Tone::Normal
                };
                BodyLine::new(format!("{mark} {}", option.caption), tone)
            })
            .collect()
    }
}
