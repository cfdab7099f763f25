#![forbid(unsafe_code)]

//! The animated, one-question-at-a-time form.
//!
//! # Flow
//!
//! Input events become navigation requests. Requests either run at once
//! (keys, touch) or go through the [`AnimationManager`] (wheel ticks,
//! resize, completion pauses). An accepted request activates the target
//! node, starts a [`ScrollSlide`] that centers it, and once that slide
//! lands moves keyboard focus to it.
//!
//! Manual scrolling re-activates whichever node ends up closest to the
//! viewport center, unless a slide is in flight.
//!
//! # Time
//!
//! Nothing reads a clock. The host calls [`SlideForm::tick`] with the
//! elapsed time; [`SlideForm::next_deadline`] tells it how long it may
//! sleep.

use std::iter;
use std::time::Duration;

use iform_core::event::{Event, KeyCode, KeyEvent};
use iform_fields::{Field, FieldConfig, FieldRegistry, FieldWidget};

use crate::error::FormError;
use crate::gesture::{TouchTracker, key_direction, wheel_direction};
use crate::layout::{FormLayout, node_rows};
use crate::navigation::{Direction, LeadingThrottle, NavCommand, NavError, UiState};
use crate::resize::{ResizeHub, ResizeRegistration};
use crate::scheduler::{AnimationManager, UNSHARED};
use crate::scroll::{ScrollError, ScrollSlide, SlideEvent, SlideTicket, Viewport, center_offset};
use crate::settings::FormSettings;
use crate::submit::{AnswerRecord, CompletionEvent, FormCore, Listeners, SubmitEvent, SubmitOutcome};

/// Channel collapsing wheel ticks.
pub const WHEEL_CHANNEL: &str = "scroll";
/// Channel collapsing resize re-centering.
pub const RESIZE_CHANNEL: &str = "formResize";
const RECENTER_CHANNEL: &str = "recenter";
const FOCUS_CHANNEL: &str = "focus";

/// Consecutive zero-length steps a single tick may take before the rest of
/// its time is advanced in one step.
const MAX_IDLE_STEPS: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Task {
    Go(Direction),
    Recenter,
    CenterActive,
    Focus(usize),
}

/// Animated form over a scrollable viewport.
#[derive(Debug)]
pub struct SlideForm {
    core: FormCore,
    ui: UiState,
    settings: FormSettings,
    scheduler: AnimationManager<Task>,
    slide: ScrollSlide,
    /// Node to focus when the given slide lands.
    settle_target: Option<(SlideTicket, usize)>,
    viewport: Viewport,
    width: u16,
    layout: FormLayout,
    touch: TouchTracker,
    go_gate: LeadingThrottle,
    focused: Option<usize>,
    mounted: bool,
    resize: Option<ResizeRegistration>,
    completion_listeners: Listeners<CompletionEvent>,
}

impl SlideForm {
    /// Build a form from configs with the built-in field types and default
    /// settings.
    pub fn new(configs: &[FieldConfig], width: u16, height: u16) -> Result<Self, FormError> {
        Self::with_registry(
            &FieldRegistry::default(),
            configs,
            FormSettings::default(),
            width,
            height,
        )
    }

    /// Build a form with a custom registry and settings.
    pub fn with_registry(
        registry: &FieldRegistry,
        configs: &[FieldConfig],
        settings: FormSettings,
        width: u16,
        height: u16,
    ) -> Result<Self, FormError> {
        let core = FormCore::from_configs(registry, configs)?;
        Ok(Self::from_core(core, settings, width, height))
    }

    /// Wrap already-built fields.
    pub fn from_core(core: FormCore, settings: FormSettings, width: u16, height: u16) -> Self {
        let ui = UiState::new(core.fields().iter().map(|f| f.key().to_string()));
        let layout = measure(&core, f32::from(height));
        let viewport = Viewport::new(f32::from(height), layout.content_height());
        Self {
            slide: ScrollSlide::new(settings.slide()),
            touch: TouchTracker::new(settings.touch_threshold_px),
            go_gate: LeadingThrottle::new(settings.nav_throttle()),
            core,
            ui,
            settings,
            scheduler: AnimationManager::new(),
            settle_target: None,
            viewport,
            width,
            layout,
            focused: None,
            mounted: false,
            resize: None,
            completion_listeners: Listeners::default(),
        }
    }

    // --- Lifecycle ---

    /// Start the form: schedule activation of the first question and, when
    /// a hub is given, register for resize notifications.
    pub fn mount(&mut self, hub: Option<&ResizeHub>) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        self.resize = hub.map(ResizeHub::register);
        self.scheduler.schedule(
            Task::Go(Direction::Next),
            UNSHARED,
            self.settings.mount_delay(),
        );
        iform_core::debug!(fields = self.core.len(), "form mounted");
    }

    /// Stop the form: drop pending work and the resize registration.
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.resize = None;
        self.scheduler.clear();
        self.slide.cancel();
        self.settle_target = None;
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    // --- Input ---

    /// Feed one input event.
    pub fn handle_event(&mut self, event: &Event) -> Result<(), FormError> {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Wheel(wheel) => {
                if let Some(direction) = wheel_direction(wheel.delta) {
                    self.scheduler.schedule(
                        Task::Go(direction),
                        WHEEL_CHANNEL,
                        self.settings.wheel_debounce(),
                    );
                }
                Ok(())
            }
            Event::Touch(touch) => {
                if let Some(direction) = self.touch.handle(touch) {
                    self.go_to_field(direction)?;
                }
                Ok(())
            }
            Event::Scroll { delta } => {
                self.manual_scroll(*delta);
                Ok(())
            }
            Event::Resize { width, height } => {
                self.apply_resize(*width, *height);
                Ok(())
            }
            Event::Paste(text) => {
                if let Some(field) = self.focused_field_mut()
                    && field.handle_paste(text)
                {
                    self.relayout();
                }
                Ok(())
            }
            Event::Focus(false) => {
                if let Some(field) = self.focused_field_mut() {
                    field.on_blur();
                }
                Ok(())
            }
            Event::Focus(true) => Ok(()),
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) -> Result<(), FormError> {
        if !key.is_press() {
            return Ok(());
        }
        let on_submit = self.current_node() == Some(self.ui.submit_index());
        if on_submit && !key.ctrl() && matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
            self.submit();
            return Ok(());
        }
        if let Some(direction) = key_direction(key) {
            return self.save_response_and_jump(direction);
        }
        match key.code {
            KeyCode::PageDown => self.manual_scroll(self.viewport.height() / 2.0),
            KeyCode::PageUp => self.manual_scroll(-self.viewport.height() / 2.0),
            _ => {
                if let Some(field) = self.focused_field_mut()
                    && field.handle_key(key)
                {
                    self.relayout();
                }
            }
        }
        Ok(())
    }

    // --- Time ---

    /// Advance time by `dt`, running slides and due tasks in time order.
    pub fn tick(&mut self, dt: Duration) -> Result<(), FormError> {
        self.poll_resize();
        self.run_for(dt, MAX_IDLE_STEPS)
    }

    /// Step through `dt` deadline by deadline. After `max_idle_steps`
    /// consecutive zero-length steps the rest of `dt` is taken in one step.
    fn run_for(&mut self, dt: Duration, max_idle_steps: usize) -> Result<(), FormError> {
        let mut remaining = dt;
        let mut idle_steps = 0;
        loop {
            let step = self.next_deadline().map_or(remaining, |d| d.min(remaining));
            self.step(step)?;
            remaining -= step;
            idle_steps = if step.is_zero() { idle_steps + 1 } else { 0 };
            let due_now = self.next_deadline() == Some(Duration::ZERO);
            if remaining.is_zero() && !due_now {
                return Ok(());
            }
            if idle_steps > max_idle_steps {
                iform_core::warn!(
                    idle_steps,
                    remaining_ms = remaining.as_millis() as u64,
                    "tasks keep coming due, advancing the rest of the tick at once"
                );
                return self.step(remaining);
            }
        }
    }

    /// Time until something is due: a scheduled task or a slide landing.
    pub fn next_deadline(&self) -> Option<Duration> {
        match (self.scheduler.next_deadline(), self.slide.remaining()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Virtual time since the form was created.
    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    fn step(&mut self, dt: Duration) -> Result<(), FormError> {
        let slide = self.slide.tick(dt);
        if let Some(offset) = slide.offset {
            self.viewport.set_offset(offset);
        }
        for event in slide.events {
            self.on_slide_event(event);
        }
        for task in self.scheduler.advance(dt) {
            self.run(task)?;
        }
        Ok(())
    }

    fn run(&mut self, task: Task) -> Result<(), FormError> {
        match task {
            Task::Go(direction) => {
                self.go_to_field(direction)?;
            }
            Task::Recenter => self.recenter()?,
            Task::CenterActive => {
                if let Some(index) = self.ui.active_index() {
                    self.slide_to(index, false)?;
                }
            }
            Task::Focus(index) => self.focus_node(index),
        }
        Ok(())
    }

    fn on_slide_event(&mut self, event: SlideEvent) {
        match event {
            SlideEvent::Completed(ticket) => {
                let Some((expected, index)) = self.settle_target else {
                    return;
                };
                if expected == ticket {
                    self.settle_target = None;
                    self.scheduler.schedule(
                        Task::Focus(index),
                        FOCUS_CHANNEL,
                        self.settings.focus_delay(),
                    );
                }
            }
            SlideEvent::Interrupted(_) => {}
        }
    }

    // --- Navigation ---

    /// Move to the neighbouring node, clamped to the first question and the
    /// submit control.
    ///
    /// Calls inside the throttle window are dropped; returns whether this
    /// one was accepted.
    pub fn go_to_field(&mut self, direction: Direction) -> Result<bool, FormError> {
        if !self.go_gate.try_acquire(self.scheduler.now()) {
            iform_core::trace!(direction = direction.name(), "navigation throttled");
            return Ok(false);
        }
        let from = self.ui.active_index();
        let target = self.ui.target_index(direction);
        self.update(&NavCommand::Go(direction))?;
        iform_core::debug!(
            direction = direction.name(),
            from = ?from,
            to = target,
            "go to field"
        );
        self.slide_to(target, true)?;
        Ok(true)
    }

    /// Activate the node with `key`.
    pub fn set_field_active(&mut self, key: &str) -> Result<(), FormError> {
        self.update(&NavCommand::SetActive(key.to_string()))?;
        Ok(())
    }

    /// Set a question's completed flag, notifying completion listeners when
    /// it changes.
    pub fn set_question_completed(&mut self, key: &str, completed: bool) -> Result<(), FormError> {
        let before = self.ui.is_completed(key);
        self.update(&NavCommand::SetCompleted {
            key: key.to_string(),
            completed,
        })?;
        if before != Some(completed) {
            let event = CompletionEvent {
                key: key.to_string(),
                completed,
                completed_count: self.ui.completed_count(),
                total: self.core.len(),
            };
            self.completion_listeners.emit(&event);
        }
        Ok(())
    }

    /// Slide the node with `key` to the viewport center. Focus does not move.
    pub fn slide_field_to_center(&mut self, key: &str) -> Result<SlideTicket, FormError> {
        let index = self
            .ui
            .index_of(key)
            .ok_or_else(|| ScrollError::NodeNotFound(key.to_string()))?;
        self.slide_to(index, false)
    }

    /// Validate the current question, mark it completed if valid, then move.
    ///
    /// A question that just became completed waits for the completion pause
    /// before moving; otherwise the move happens at once. Invalid input
    /// still moves, leaving its error visible and the question incomplete.
    pub fn save_response_and_jump(&mut self, direction: Direction) -> Result<(), FormError> {
        let Some(index) = self.current_node().filter(|&i| i < self.core.len()) else {
            self.go_to_field(direction)?;
            return Ok(());
        };
        let Some(field) = self.core.field_mut(index) else {
            return Ok(());
        };
        let valid = field.validate();
        let key = field.key().to_string();
        if !valid {
            iform_core::debug!(key = %key, "invalid response");
            self.go_to_field(direction)?;
            return Ok(());
        }
        if self.ui.is_completed(&key) == Some(true) {
            self.go_to_field(direction)?;
        } else {
            self.set_question_completed(&key, true)?;
            self.scheduler.schedule(
                Task::Go(direction),
                UNSHARED,
                self.settings.completion_pause(),
            );
        }
        Ok(())
    }

    fn update(&mut self, command: &NavCommand) -> Result<(), NavError> {
        self.ui = self.ui.apply(command)?;
        Ok(())
    }

    fn slide_to(&mut self, index: usize, focus_after: bool) -> Result<SlideTicket, FormError> {
        let extent = self.layout.extent(index).ok_or_else(|| {
            let key = self.ui.node(index).map(|n| n.key.clone()).unwrap_or_default();
            ScrollError::NodeNotFound(key)
        })?;
        let to = center_offset(extent, &self.viewport);
        let ticket = self.slide.start(self.viewport.offset(), to);
        self.settle_target = focus_after.then_some((ticket, index));
        Ok(ticket)
    }

    fn focus_node(&mut self, index: usize) {
        if self.focused == Some(index) {
            return;
        }
        if let Some(field) = self.focused_field_mut() {
            field.on_blur();
        }
        self.focused = Some(index);
    }

    fn manual_scroll(&mut self, delta: f32) {
        self.viewport.scroll_by(delta);
        if self.slide.is_animating() || self.scheduler.is_channel_pending(RECENTER_CHANNEL) {
            return;
        }
        self.scheduler.schedule(
            Task::Recenter,
            RECENTER_CHANNEL,
            self.settings.recenter_throttle(),
        );
    }

    fn recenter(&mut self) -> Result<(), FormError> {
        if self.slide.is_animating() {
            return Ok(());
        }
        let Some(index) = self.layout.closest_to(self.viewport.center()) else {
            return Ok(());
        };
        if self.ui.active_index() != Some(index) {
            let key = self.ui.node(index).map(|n| n.key.clone()).unwrap_or_default();
            self.set_field_active(&key)?;
            iform_core::debug!(index, "recentered on scroll");
        }
        self.scheduler
            .schedule(Task::Focus(index), FOCUS_CHANNEL, self.settings.focus_delay());
        Ok(())
    }

    // --- Resize ---

    fn poll_resize(&mut self) {
        if let Some((width, height)) = self.resize.as_ref().and_then(ResizeRegistration::take) {
            self.apply_resize(width, height);
        }
    }

    /// Re-measure after an edit that may change a node's row count.
    fn relayout(&mut self) {
        let height = self.viewport.height();
        self.layout = measure(&self.core, height);
        self.viewport.resize(height, self.layout.content_height());
    }

    fn apply_resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.layout = measure(&self.core, f32::from(height));
        self.viewport
            .resize(f32::from(height), self.layout.content_height());
        if self.mounted {
            self.scheduler.schedule(
                Task::CenterActive,
                RESIZE_CHANNEL,
                self.settings.resize_delay(),
            );
        }
    }

    // --- Submit and listeners ---

    /// Validate everything and deliver answers if all fields pass.
    pub fn submit(&mut self) -> SubmitOutcome {
        self.core.submit()
    }

    /// Register a handler by event name. Only `"submit"` is supported.
    pub fn add_event_listener(
        &mut self,
        event: &str,
        handler: impl FnMut(&SubmitEvent) + 'static,
    ) -> Result<(), FormError> {
        self.core.add_event_listener(event, handler)
    }

    pub fn on_submit(&mut self, handler: impl FnMut(&SubmitEvent) + 'static) {
        self.core.on_submit(handler);
    }

    /// Register a handler for completed-flag changes.
    pub fn on_question_completed(&mut self, handler: impl FnMut(&CompletionEvent) + 'static) {
        self.completion_listeners.push(handler);
    }

    // --- Accessors ---

    pub fn ui_state(&self) -> &UiState {
        &self.ui
    }

    pub fn fields(&self) -> &[Field] {
        self.core.fields()
    }

    pub fn field_mut(&mut self, index: usize) -> Option<&mut Field> {
        self.core.field_mut(index)
    }

    pub fn answers(&self) -> Vec<AnswerRecord> {
        self.core.answers()
    }

    pub fn submit_error(&self) -> Option<&str> {
        self.core.submit_error()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn layout(&self) -> &FormLayout {
        &self.layout
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn settings(&self) -> &FormSettings {
        &self.settings
    }

    /// Node with keyboard focus.
    pub fn focused(&self) -> Option<usize> {
        self.focused
    }

    /// Whether a slide is in flight.
    pub fn is_animating(&self) -> bool {
        self.slide.is_animating()
    }

    /// Completed questions over all questions.
    pub fn progress(&self) -> f32 {
        self.ui.progress()
    }

    fn current_node(&self) -> Option<usize> {
        self.focused.or_else(|| self.ui.active_index())
    }

    fn focused_field_mut(&mut self) -> Option<&mut Field> {
        let index = self.focused?;
        self.core.field_mut(index)
    }
}

fn measure(core: &FormCore, viewport_height: f32) -> FormLayout {
    let heights = core
        .fields()
        .iter()
        .map(|f| node_rows(f.body_lines(false).len().max(f.body_lines(true).len())))
        .chain(iter::once(node_rows(0)));
    FormLayout::stack(heights, (viewport_height / 2.0).floor())
}
