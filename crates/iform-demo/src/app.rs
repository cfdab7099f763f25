#![forbid(unsafe_code)]

//! The terminal event loop.
//!
//! Each iteration draws a frame, waits for input no longer than the form's
//! next deadline, and advances the form by the wall-clock time that passed.

use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, Show};
use crossterm::event::{
    self as cte, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste,
    EnableMouseCapture,
};
use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use iform::{
    Buffer, Event, FieldConfig, FormError, FormSettings, ResizeHub, SlideForm, StackForm,
    SubmitEvent, Theme, render_slide_form, render_stack_form,
};

use crate::cli::{Opts, Variant};
use crate::present::present;

/// Poll interval while a slide is in flight.
const FRAME: Duration = Duration::from_millis(16);
/// Longest wait for input when nothing is scheduled.
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Raw mode and the alternate screen for as long as the guard lives.
struct TerminalGuard {
    mouse: bool,
}

impl TerminalGuard {
    fn enter(mouse: bool) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = io::stdout();
        execute!(out, EnterAlternateScreen, Hide, EnableBracketedPaste)?;
        if mouse {
            execute!(out, EnableMouseCapture)?;
        }
        Ok(Self { mouse })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut out = io::stdout();
        if self.mouse {
            let _ = execute!(out, DisableMouseCapture);
        }
        let _ = execute!(out, DisableBracketedPaste, Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Either presentation behind one interface.
enum Host {
    Slide { form: SlideForm, hub: ResizeHub },
    Stack(StackForm),
}

impl Host {
    fn new(
        variant: Variant,
        configs: &[FieldConfig],
        settings: FormSettings,
        width: u16,
        height: u16,
    ) -> Result<Self, FormError> {
        match variant {
            Variant::Slide => {
                let hub = ResizeHub::new();
                // bottom row holds the progress bar
                let mut form = SlideForm::with_registry(
                    &Default::default(),
                    configs,
                    settings,
                    width,
                    height.saturating_sub(1),
                )?;
                form.mount(Some(&hub));
                Ok(Self::Slide { form, hub })
            }
            Variant::Stack => Ok(Self::Stack(StackForm::new(configs, width, height)?)),
        }
    }

    fn on_submit(&mut self, handler: impl FnMut(&SubmitEvent) + 'static) {
        match self {
            Self::Slide { form, .. } => form.on_submit(handler),
            Self::Stack(form) => form.on_submit(handler),
        }
    }

    fn handle(&mut self, event: &Event) -> Result<(), FormError> {
        match (self, event) {
            (Self::Slide { hub, .. }, Event::Resize { width, height }) => {
                hub.notify(*width, height.saturating_sub(1));
                Ok(())
            }
            (Self::Slide { form, .. }, event) => form.handle_event(event),
            (Self::Stack(form), event) => form.handle_event(event),
        }
    }

    fn tick(&mut self, dt: Duration) -> Result<(), FormError> {
        match self {
            Self::Slide { form, .. } => form.tick(dt),
            Self::Stack(_) => Ok(()),
        }
    }

    /// How long the loop may block waiting for input.
    fn poll_timeout(&self) -> Duration {
        match self {
            Self::Slide { form, .. } if form.is_animating() => FRAME,
            Self::Slide { form, .. } => form.next_deadline().map_or(IDLE_POLL, |d| d.min(IDLE_POLL)),
            Self::Stack(_) => IDLE_POLL,
        }
    }

    fn draw(&self, buf: &mut Buffer, theme: &Theme) {
        let area = buf.bounds();
        match self {
            Self::Slide { form, .. } => render_slide_form(form, area, buf, theme),
            Self::Stack(form) => render_stack_form(form, area, buf, theme),
        }
    }
}

fn is_quit(event: &cte::Event) -> bool {
    let cte::Event::Key(key) = event else {
        return false;
    };
    key.kind == cte::KeyEventKind::Press
        && (key.code == cte::KeyCode::Esc
            || (key.code == cte::KeyCode::Char('c')
                && key.modifiers.contains(cte::KeyModifiers::CONTROL)))
}

/// Run the form until it is submitted (returning the event) or the user
/// quits (returning `None`).
pub fn run(
    opts: &Opts,
    configs: &[FieldConfig],
    settings: FormSettings,
) -> iform::Result<Option<SubmitEvent>> {
    let (width, height) = terminal::size()?;
    let mut host = Host::new(opts.variant, configs, settings, width, height)?;
    let submitted = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&submitted);
    host.on_submit(move |event| *sink.borrow_mut() = Some(event.clone()));

    let _guard = TerminalGuard::enter(opts.mouse)?;
    let theme = Theme::default();
    let mut stdout = io::stdout();
    let mut buf = Buffer::new(width, height);
    let started = Instant::now();
    let mut last = started;

    loop {
        buf.clear();
        host.draw(&mut buf, &theme);
        present(&mut stdout, &buf)?;

        if let Some(event) = submitted.borrow_mut().take() {
            tracing::info!(answers = event.answers.len(), "submitted");
            return Ok(Some(event));
        }
        if opts.exit_after_ms > 0
            && started.elapsed() >= Duration::from_millis(opts.exit_after_ms)
        {
            return Ok(None);
        }

        if cte::poll(host.poll_timeout())? {
            let raw = cte::read()?;
            if is_quit(&raw) {
                tracing::info!("quit without submitting");
                return Ok(None);
            }
            if let cte::Event::Resize(w, h) = raw {
                buf = Buffer::new(w, h);
            }
            if let Some(event) = Event::from_crossterm(raw) {
                host.handle(&event)?;
            }
        }

        let now = Instant::now();
        host.tick(now - last)?;
        last = now;
    }
}
