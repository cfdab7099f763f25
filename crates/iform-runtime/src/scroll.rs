#![forbid(unsafe_code)]

//! Scroll viewport and the animated slide that centers a node in it.
//!
//! A [`ScrollSlide`] runs at most one tween at a time. Each start hands out a
//! [`SlideTicket`]; the ticket later resolves either as
//! [`SlideEvent::Completed`] or, when a newer slide supersedes it, as
//! [`SlideEvent::Interrupted`]. A ticket never resolves both ways.

use std::fmt;
use std::time::Duration;

use iform_core::animation::{Animation, Tween, ease_in_out};
use iform_core::geometry::Extent;

/// Default slide length.
pub const DEFAULT_SLIDE_DURATION: Duration = Duration::from_millis(300);

/// Scroll failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrollError {
    /// The requested node is not laid out.
    NodeNotFound(String),
}

impl fmt::Display for ScrollError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NodeNotFound(key) => write!(f, "no field found with key: {key}"),
        }
    }
}

impl std::error::Error for ScrollError {}

// ---------------------------------------------------------------------------
// Viewport
// ---------------------------------------------------------------------------

/// The visible window onto the form's content, in rows.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    offset: f32,
    height: f32,
    content_height: f32,
}

impl Viewport {
    pub fn new(height: f32, content_height: f32) -> Self {
        Self {
            offset: 0.0,
            height: height.max(0.0),
            content_height: content_height.max(0.0),
        }
    }

    /// Current scroll offset.
    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn content_height(&self) -> f32 {
        self.content_height
    }

    /// Largest reachable offset.
    pub fn max_offset(&self) -> f32 {
        (self.content_height - self.height).max(0.0)
    }

    /// Content position at the middle of the viewport.
    pub fn center(&self) -> f32 {
        self.offset + self.height / 2.0
    }

    /// Set the offset, clamped to the scrollable range.
    pub fn set_offset(&mut self, offset: f32) {
        self.offset = offset.clamp(0.0, self.max_offset());
    }

    /// Scroll by `delta` rows. Returns whether the offset moved.
    pub fn scroll_by(&mut self, delta: f32) -> bool {
        let before = self.offset;
        self.set_offset(self.offset + delta);
        self.offset != before
    }

    /// Change the viewport and content sizes, keeping the offset in range.
    pub fn resize(&mut self, height: f32, content_height: f32) {
        self.height = height.max(0.0);
        self.content_height = content_height.max(0.0);
        self.set_offset(self.offset);
    }
}

/// Offset that vertically centers `node` in a viewport of
/// `viewport.height()` rows, clamped to the reachable range.
pub fn center_offset(node: Extent, viewport: &Viewport) -> f32 {
    let margin = ((viewport.height() - node.height) / 2.0).max(0.0);
    (node.top - margin).clamp(0.0, viewport.max_offset())
}

// ---------------------------------------------------------------------------
// ScrollSlide
// ---------------------------------------------------------------------------

/// Identifies one slide request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlideTicket(u64);

/// How a slide request ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideEvent {
    /// The slide reached its target.
    Completed(SlideTicket),
    /// A newer slide (or an explicit cancel) replaced this one.
    Interrupted(SlideTicket),
}

/// Result of advancing a slide.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SlideStep {
    /// Offset to apply, if a slide is (or was until now) in flight.
    pub offset: Option<f32>,
    /// Tickets resolved since the last step.
    pub events: Vec<SlideEvent>,
}

/// Single-track animated scroll.
#[derive(Debug, Clone)]
pub struct ScrollSlide {
    duration: Duration,
    current: Option<(SlideTicket, Tween)>,
    next_ticket: u64,
    events: Vec<SlideEvent>,
}

impl Default for ScrollSlide {
    fn default() -> Self {
        Self::new(DEFAULT_SLIDE_DURATION)
    }
}

impl ScrollSlide {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            current: None,
            next_ticket: 0,
            events: Vec::new(),
        }
    }

    /// Begin sliding from `from` to `to`, superseding any slide in flight.
    pub fn start(&mut self, from: f32, to: f32) -> SlideTicket {
        self.cancel();
        let ticket = SlideTicket(self.next_ticket);
        self.next_ticket += 1;
        let tween = Tween::new(from, to, self.duration).easing(ease_in_out);
        self.current = Some((ticket, tween));
        iform_core::debug!(ticket = ticket.0, from, to, "slide started");
        ticket
    }

    /// Stop the slide in flight, resolving it as interrupted.
    pub fn cancel(&mut self) -> Option<SlideTicket> {
        let (ticket, _) = self.current.take()?;
        iform_core::debug!(ticket = ticket.0, "slide interrupted");
        self.events.push(SlideEvent::Interrupted(ticket));
        Some(ticket)
    }

    /// Whether a slide is in flight.
    pub fn is_animating(&self) -> bool {
        self.current.is_some()
    }

    /// Ticket of the slide in flight.
    pub fn ticket(&self) -> Option<SlideTicket> {
        self.current.as_ref().map(|(t, _)| *t)
    }

    /// Time until the slide in flight lands.
    pub fn remaining(&self) -> Option<Duration> {
        self.current.as_ref().map(|(_, tween)| tween.remaining())
    }

    /// Advance the slide by `dt`.
    pub fn tick(&mut self, dt: Duration) -> SlideStep {
        let mut offset = None;
        if let Some((ticket, tween)) = self.current.as_mut() {
            tween.tick(dt);
            offset = Some(tween.position());
            if tween.is_complete() {
                let ticket = *ticket;
                self.current = None;
                iform_core::debug!(ticket = ticket.0, "slide completed");
                self.events.push(SlideEvent::Completed(ticket));
            }
        }
        SlideStep {
            offset,
            events: std::mem::take(&mut self.events),
        }
    }
}
