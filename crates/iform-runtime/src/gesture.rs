#![forbid(unsafe_code)]

//! Turning raw input into navigation directions.

use iform_core::event::{KeyCode, KeyEvent, Modifiers, TouchEvent, TouchPhase};

use crate::navigation::Direction;

/// Default vertical drag, in pixels, that counts as a swipe.
pub const DEFAULT_TOUCH_THRESHOLD: f32 = 80.0;

/// Direction for a wheel delta: negative moves on, positive moves back.
pub fn wheel_direction(delta: i32) -> Option<Direction> {
    match delta {
        d if d < 0 => Some(Direction::Next),
        d if d > 0 => Some(Direction::Prev),
        _ => None,
    }
}

/// Direction for a navigation key.
///
/// Enter, Tab, and Down move on; Shift+Tab and Up move back. Ctrl, Alt,
/// and Super chords are ignored, as is Shift with anything but Tab.
pub fn key_direction(key: &KeyEvent) -> Option<Direction> {
    if !key.is_press() {
        return None;
    }
    if key
        .modifiers
        .intersects(Modifiers::CTRL | Modifiers::ALT | Modifiers::SUPER)
    {
        return None;
    }
    if key.shift() {
        return match key.code {
            KeyCode::Tab | KeyCode::BackTab => Some(Direction::Prev),
            _ => None,
        };
    }
    match key.code {
        KeyCode::Enter | KeyCode::Tab | KeyCode::Down => Some(Direction::Next),
        KeyCode::BackTab | KeyCode::Up => Some(Direction::Prev),
        _ => None,
    }
}

/// Fires one direction per touch gesture once the drag passes a threshold.
#[derive(Debug, Clone)]
pub struct TouchTracker {
    threshold: f32,
    start_y: Option<f32>,
}

impl Default for TouchTracker {
    fn default() -> Self {
        Self::new(DEFAULT_TOUCH_THRESHOLD)
    }
}

impl TouchTracker {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            start_y: None,
        }
    }

    /// Feed one touch sample.
    ///
    /// An upward drag moves on, a downward drag moves back. After firing,
    /// the tracker stays disarmed until the next `Start`.
    pub fn handle(&mut self, touch: &TouchEvent) -> Option<Direction> {
        if touch.phase == TouchPhase::Start {
            self.start_y = Some(touch.y);
            return None;
        }
        let start = self.start_y?;
        let displacement = touch.y - start;
        if displacement.abs() < self.threshold {
            return None;
        }
        self.start_y = None;
        Some(if displacement < 0.0 {
            Direction::Next
        } else {
            Direction::Prev
        })
    }
}
