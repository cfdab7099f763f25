#![forbid(unsafe_code)]

//! Canonical input/event types.
//!
//! Forms receive keyboard input, wheel ticks, touch-style drags, manual
//! scroll requests, and viewport resizes. All events derive `Clone` and
//! `PartialEq` for use in tests and pattern matching.
//!
//! # Design Notes
//!
//! - Wheel deltas follow the browser `wheelDelta` sign: negative means the
//!   content should move towards the end of the form.
//! - Touch positions are in pixels. Terminal rows are converted with
//!   [`CELL_HEIGHT_PX`] so drag thresholds stay device independent.
//! - `KeyEventKind` defaults to `Press` when not available from the terminal.

use bitflags::bitflags;
#[cfg(feature = "crossterm")]
use crossterm::event as cte;

/// Nominal pixel height of one terminal row, used for touch emulation.
pub const CELL_HEIGHT_PX: f32 = 16.0;

/// Wheel delta reported for a single terminal scroll notch.
pub const WHEEL_NOTCH: i32 = 120;

/// Canonical input event.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A keyboard event.
    Key(KeyEvent),

    /// A wheel tick over the form viewport.
    Wheel(WheelEvent),

    /// A touch (or pointer drag) over the form viewport.
    Touch(TouchEvent),

    /// The user scrolled the viewport directly by `delta` rows, without
    /// animation (scrollbar drag, page keys).
    Scroll {
        /// Rows to move; positive moves towards the end.
        delta: f32,
    },

    /// The viewport was resized.
    Resize {
        /// New width in columns.
        width: u16,
        /// New height in rows.
        height: u16,
    },

    /// Pasted text, delivered to the focused field as a unit.
    Paste(String),

    /// Focus gained or lost by the whole widget.
    Focus(bool),
}

impl Event {
    /// Convert a Crossterm event into an iform [`Event`].
    #[must_use]
    #[cfg(feature = "crossterm")]
    pub fn from_crossterm(event: cte::Event) -> Option<Self> {
        map_crossterm_event_internal(event)
    }
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key code that was pressed.
    pub code: KeyCode,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,

    /// The type of key event (press, repeat, or release).
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// Create a new key event with default modifiers and Press kind.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
            kind: KeyEventKind::Press,
        }
    }

    /// Create a key event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Create a key event with a specific kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }

    /// Press or auto-repeat; releases are ignored by every widget.
    #[must_use]
    pub const fn is_press(&self) -> bool {
        matches!(self.kind, KeyEventKind::Press | KeyEventKind::Repeat)
    }

    /// Check if Ctrl modifier is held.
    #[must_use]
    pub const fn ctrl(&self) -> bool {
        self.modifiers.contains(Modifiers::CTRL)
    }

    /// Check if Shift modifier is held.
    #[must_use]
    pub const fn shift(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }
}

/// Key codes for keyboard events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A regular character key.
    Char(char),
    /// Enter/Return key.
    Enter,
    /// Escape key.
    Escape,
    /// Backspace key.
    Backspace,
    /// Tab key.
    Tab,
    /// Shift+Tab (back-tab).
    BackTab,
    /// Delete key.
    Delete,
    /// Home key.
    Home,
    /// End key.
    End,
    /// Page Up key.
    PageUp,
    /// Page Down key.
    PageDown,
    /// Up arrow key.
    Up,
    /// Down arrow key.
    Down,
    /// Left arrow key.
    Left,
    /// Right arrow key.
    Right,
}

/// The type of key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    /// Key was pressed (default when not distinguishable).
    #[default]
    Press,
    /// Key is being held (repeat event).
    Repeat,
    /// Key was released.
    Release,
}

bitflags! {
    /// Modifier keys that can be held during a key event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
        /// Super/Meta/Command key.
        const SUPER = 0b1000;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

/// A wheel tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WheelEvent {
    /// Signed delta, browser `wheelDelta` convention.
    pub delta: i32,
}

impl WheelEvent {
    /// Create a wheel event.
    #[must_use]
    pub const fn new(delta: i32) -> Self {
        Self { delta }
    }
}

/// Phase of a touch gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TouchPhase {
    /// Finger down / pointer pressed.
    Start,
    /// Finger moved while down.
    Move,
    /// Finger lifted.
    End,
}

/// A touch sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchEvent {
    /// Gesture phase.
    pub phase: TouchPhase,
    /// Page Y coordinate in pixels.
    pub y: f32,
}

impl TouchEvent {
    /// Create a touch sample.
    #[must_use]
    pub const fn new(phase: TouchPhase, y: f32) -> Self {
        Self { phase, y }
    }
}

#[cfg(feature = "crossterm")]
fn map_crossterm_event_internal(event: cte::Event) -> Option<Event> {
    match event {
        cte::Event::Key(key) => map_key_event(key).map(Event::Key),
        cte::Event::Mouse(mouse) => map_mouse_event(mouse),
        cte::Event::Resize(width, height) => Some(Event::Resize { width, height }),
        cte::Event::Paste(text) => Some(Event::Paste(text)),
        cte::Event::FocusGained => Some(Event::Focus(true)),
        cte::Event::FocusLost => Some(Event::Focus(false)),
    }
}

#[cfg(feature = "crossterm")]
fn map_key_event(event: cte::KeyEvent) -> Option<KeyEvent> {
    let code = map_key_code(event.code)?;
    let modifiers = map_modifiers(event.modifiers);
    let kind = match event.kind {
        cte::KeyEventKind::Press => KeyEventKind::Press,
        cte::KeyEventKind::Repeat => KeyEventKind::Repeat,
        cte::KeyEventKind::Release => KeyEventKind::Release,
    };
    Some(KeyEvent {
        code,
        modifiers,
        kind,
    })
}

#[cfg(feature = "crossterm")]
fn map_key_code(code: cte::KeyCode) -> Option<KeyCode> {
    match code {
        cte::KeyCode::Backspace => Some(KeyCode::Backspace),
        cte::KeyCode::Enter => Some(KeyCode::Enter),
        cte::KeyCode::Left => Some(KeyCode::Left),
        cte::KeyCode::Right => Some(KeyCode::Right),
        cte::KeyCode::Up => Some(KeyCode::Up),
        cte::KeyCode::Down => Some(KeyCode::Down),
        cte::KeyCode::Home => Some(KeyCode::Home),
        cte::KeyCode::End => Some(KeyCode::End),
        cte::KeyCode::PageUp => Some(KeyCode::PageUp),
        cte::KeyCode::PageDown => Some(KeyCode::PageDown),
        cte::KeyCode::Tab => Some(KeyCode::Tab),
        cte::KeyCode::BackTab => Some(KeyCode::BackTab),
        cte::KeyCode::Delete => Some(KeyCode::Delete),
        cte::KeyCode::Char(c) => Some(KeyCode::Char(c)),
        cte::KeyCode::Esc => Some(KeyCode::Escape),
        _ => None,
    }
}

#[cfg(feature = "crossterm")]
fn map_modifiers(modifiers: cte::KeyModifiers) -> Modifiers {
    let mut mapped = Modifiers::NONE;
    if modifiers.contains(cte::KeyModifiers::SHIFT) {
        mapped |= Modifiers::SHIFT;
    }
    if modifiers.contains(cte::KeyModifiers::ALT) {
        mapped |= Modifiers::ALT;
    }
    if modifiers.contains(cte::KeyModifiers::CONTROL) {
        mapped |= Modifiers::CTRL;
    }
    if modifiers.contains(cte::KeyModifiers::SUPER)
        || modifiers.contains(cte::KeyModifiers::HYPER)
        || modifiers.contains(cte::KeyModifiers::META)
    {
        mapped |= Modifiers::SUPER;
    }
    mapped
}

/// Terminal mice stand in for touch screens: a left-button press/drag/release
/// becomes a touch gesture and wheel notches become wheel ticks.
#[cfg(feature = "crossterm")]
fn map_mouse_event(event: cte::MouseEvent) -> Option<Event> {
    let y = f32::from(event.row) * CELL_HEIGHT_PX;
    match event.kind {
        cte::MouseEventKind::Down(cte::MouseButton::Left) => {
            Some(Event::Touch(TouchEvent::new(TouchPhase::Start, y)))
        }
        cte::MouseEventKind::Drag(cte::MouseButton::Left) => {
            Some(Event::Touch(TouchEvent::new(TouchPhase::Move, y)))
        }
        cte::MouseEventKind::Up(cte::MouseButton::Left) => {
            Some(Event::Touch(TouchEvent::new(TouchPhase::End, y)))
        }
        cte::MouseEventKind::ScrollUp => Some(Event::Wheel(WheelEvent::new(WHEEL_NOTCH))),
        cte::MouseEventKind::ScrollDown => Some(Event::Wheel(WheelEvent::new(-WHEEL_NOTCH))),
        _ => None,
    }
}

#[cfg(all(test, feature = "crossterm"))]
mod tests {
    use super::*;
    use crossterm::event as ct_event;

    fn mouse(kind: ct_event::MouseEventKind, row: u16) -> ct_event::Event {
        ct_event::Event::Mouse(ct_event::MouseEvent {
            kind,
            column: 3,
            row,
            modifiers: ct_event::KeyModifiers::NONE,
        })
    }

    #[test]
    fn key_event_modifier_helpers() {
        let event = KeyEvent::new(KeyCode::Tab).with_modifiers(Modifiers::SHIFT);
        assert!(event.shift());
        assert!(!event.ctrl());
        assert!(event.is_press());
        assert!(!event.with_kind(KeyEventKind::Release).is_press());
    }

    #[test]
    fn map_crossterm_key_with_modifiers() {
        let ct = ct_event::Event::Key(ct_event::KeyEvent {
            code: ct_event::KeyCode::Char('c'),
            modifiers: ct_event::KeyModifiers::CONTROL | ct_event::KeyModifiers::SHIFT,
            kind: ct_event::KeyEventKind::Press,
            state: ct_event::KeyEventState::NONE,
        });
        let mapped = Event::from_crossterm(ct).expect("should map");
        match mapped {
            Event::Key(key) => {
                assert_eq!(key.code, KeyCode::Char('c'));
                assert!(key.ctrl());
                assert!(key.shift());
            }
            other => panic!("expected key event, got {other:?}"),
        }
    }

    #[test]
    fn unmapped_keys_are_dropped() {
        let ct = ct_event::Event::Key(ct_event::KeyEvent {
            code: ct_event::KeyCode::F(5),
            modifiers: ct_event::KeyModifiers::NONE,
            kind: ct_event::KeyEventKind::Press,
            state: ct_event::KeyEventState::NONE,
        });
        assert_eq!(Event::from_crossterm(ct), None);
    }

    #[test]
    fn wheel_notches_follow_browser_sign() {
        assert_eq!(
            Event::from_crossterm(mouse(ct_event::MouseEventKind::ScrollDown, 0)),
            Some(Event::Wheel(WheelEvent::new(-WHEEL_NOTCH)))
        );
        assert_eq!(
            Event::from_crossterm(mouse(ct_event::MouseEventKind::ScrollUp, 0)),
            Some(Event::Wheel(WheelEvent::new(WHEEL_NOTCH)))
        );
    }

    #[test]
    fn left_drag_maps_to_touch_in_pixels() {
        let start = Event::from_crossterm(mouse(
            ct_event::MouseEventKind::Down(ct_event::MouseButton::Left),
            10,
        ));
        assert_eq!(
            start,
            Some(Event::Touch(TouchEvent::new(TouchPhase::Start, 160.0)))
        );
        let drag = Event::from_crossterm(mouse(
            ct_event::MouseEventKind::Drag(ct_event::MouseButton::Left),
            4,
        ));
        assert_eq!(
            drag,
            Some(Event::Touch(TouchEvent::new(TouchPhase::Move, 64.0)))
        );
        let right = Event::from_crossterm(mouse(
            ct_event::MouseEventKind::Down(ct_event::MouseButton::Right),
            4,
        ));
        assert_eq!(right, None);
    }

    #[test]
    fn map_crossterm_resize_and_paste() {
        assert_eq!(
            Event::from_crossterm(ct_event::Event::Resize(80, 24)),
            Some(Event::Resize {
                width: 80,
                height: 24
            })
        );
        assert_eq!(
            Event::from_crossterm(ct_event::Event::Paste("hi".into())),
            Some(Event::Paste("hi".into()))
        );
    }
}
