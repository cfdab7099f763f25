#![forbid(unsafe_code)]

//! Navigation state: which node is active and which questions are complete.
//!
//! [`UiState`] is an immutable snapshot. Every change goes through a pure
//! transition ([`UiState::apply`]) that returns a new snapshot, so the
//! single-active-node invariant holds by construction: activation clears
//! every other node in the same step.
//!
//! Nodes are the questions in config order followed by the submit control,
//! indexed `0..=N`.

use std::fmt;
use std::time::Duration;

use iform_fields::SUBMIT_KEY;

/// Direction of a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Next,
    Prev,
}

impl Direction {
    pub const fn delta(self) -> isize {
        match self {
            Self::Next => 1,
            Self::Prev => -1,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Next => "next",
            Self::Prev => "prev",
        }
    }
}

/// Navigation failures. Always a host programming mistake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavError {
    /// No question or submit control has this key.
    UnknownField(String),
    /// No question has this key.
    UnknownQuestion(String),
}

impl fmt::Display for NavError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownField(key) => write!(f, "invalid key: {key}"),
            Self::UnknownQuestion(key) => write!(f, "did not find question with key: {key}"),
        }
    }
}

impl std::error::Error for NavError {}

/// Per-node UI flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldUiState {
    pub key: String,
    pub active: bool,
    pub completed: bool,
}

impl FieldUiState {
    fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            active: false,
            completed: false,
        }
    }
}

/// A state transition request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavCommand {
    /// Activate the node with this key.
    SetActive(String),
    /// Set a question's completed flag.
    SetCompleted { key: String, completed: bool },
    /// Activate the neighbouring node.
    Go(Direction),
}

/// Snapshot of every node's flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiState {
    questions: Vec<FieldUiState>,
    submit: FieldUiState,
}

impl UiState {
    /// Fresh state for questions with the given keys; nothing active.
    pub fn new<K: Into<String>>(keys: impl IntoIterator<Item = K>) -> Self {
        Self {
            questions: keys.into_iter().map(FieldUiState::new).collect(),
            submit: FieldUiState::new(SUBMIT_KEY),
        }
    }

    /// Question flags in config order.
    pub fn questions(&self) -> &[FieldUiState] {
        &self.questions
    }

    /// Submit control flags.
    pub fn submit(&self) -> &FieldUiState {
        &self.submit
    }

    /// Number of nodes, submit included.
    pub fn len(&self) -> usize {
        self.questions.len() + 1
    }

    /// Always false: the submit control is a node.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Index of the submit control.
    pub fn submit_index(&self) -> usize {
        self.questions.len()
    }

    /// Node by index.
    pub fn node(&self, index: usize) -> Option<&FieldUiState> {
        if index == self.questions.len() {
            Some(&self.submit)
        } else {
            self.questions.get(index)
        }
    }

    /// Every node in traversal order.
    pub fn nodes(&self) -> impl Iterator<Item = &FieldUiState> {
        self.questions.iter().chain(std::iter::once(&self.submit))
    }

    /// Index of the node with `key`.
    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.nodes().position(|n| n.key == key)
    }

    /// Index of the active node.
    pub fn active_index(&self) -> Option<usize> {
        self.nodes().position(|n| n.active)
    }

    /// Key of the active node.
    pub fn active_key(&self) -> Option<&str> {
        self.nodes().find(|n| n.active).map(|n| n.key.as_str())
    }

    /// Number of active nodes (0 or 1).
    pub fn active_count(&self) -> usize {
        self.nodes().filter(|n| n.active).count()
    }

    /// Index `direction` leads to from the active node, clamped to the node
    /// range. With nothing active the current index counts as -1.
    pub fn target_index(&self, direction: Direction) -> usize {
        let current = self.active_index().map_or(-1, |i| i as isize);
        let last = self.submit_index() as isize;
        (current + direction.delta()).clamp(0, last) as usize
    }

    /// Number of completed questions.
    pub fn completed_count(&self) -> usize {
        self.questions.iter().filter(|q| q.completed).count()
    }

    /// Completed questions over all questions; 1.0 for an empty form.
    pub fn progress(&self) -> f32 {
        if self.questions.is_empty() {
            1.0
        } else {
            self.completed_count() as f32 / self.questions.len() as f32
        }
    }

    /// Whether the question with `key` is completed.
    pub fn is_completed(&self, key: &str) -> Option<bool> {
        self.questions.iter().find(|q| q.key == key).map(|q| q.completed)
    }

    /// Apply a command, producing the next snapshot.
    pub fn apply(&self, command: &NavCommand) -> Result<Self, NavError> {
        match command {
            NavCommand::SetActive(key) => self.set_field_active(key),
            NavCommand::SetCompleted { key, completed } => {
                self.set_question_completed(key, *completed)
            }
            NavCommand::Go(direction) => Ok(self.activate_index(self.target_index(*direction))),
        }
    }

    /// Activate exactly the node with `key`.
    pub fn set_field_active(&self, key: &str) -> Result<Self, NavError> {
        let index = self
            .index_of(key)
            .ok_or_else(|| NavError::UnknownField(key.to_string()))?;
        Ok(self.activate_index(index))
    }

    /// Set the completed flag of question `key`.
    pub fn set_question_completed(&self, key: &str, completed: bool) -> Result<Self, NavError> {
        let index = self
            .questions
            .iter()
            .position(|q| q.key == key)
            .ok_or_else(|| NavError::UnknownQuestion(key.to_string()))?;
        let mut next = self.clone();
        next.questions[index].completed = completed;
        Ok(next)
    }

    fn activate_index(&self, index: usize) -> Self {
        let mut next = self.clone();
        let submit_index = next.submit_index();
        for (i, q) in next.questions.iter_mut().enumerate() {
            q.active = i == index;
        }
        next.submit.active = index == submit_index;
        next
    }
}

/// Drops calls that arrive within `window` of the last accepted one.
#[derive(Debug, Clone)]
pub struct LeadingThrottle {
    window: Duration,
    last: Option<Duration>,
}

impl LeadingThrottle {
    pub fn new(window: Duration) -> Self {
        Self { window, last: None }
    }

    /// Whether a call at `now` goes through. Accepted calls open a new window.
    pub fn try_acquire(&mut self, now: Duration) -> bool {
        let open = match self.last {
            None => true,
            Some(last) => now.saturating_sub(last) >= self.window,
        };
        if open {
            self.last = Some(now);
        }
        open
    }

    pub fn window(&self) -> Duration {
        self.window
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> UiState {
        UiState::new(["name", "email", "age"])
    }

    #[test]
    fn starts_with_nothing_active() {
        let s = state();
        assert_eq!(s.len(), 4);
        assert_eq!(s.active_index(), None);
        assert_eq!(s.target_index(Direction::Next), 0);
        assert_eq!(s.target_index(Direction::Prev), 0);
    }

    #[test]
    fn set_active_clears_others() {
        let s = state().set_field_active("email").expect("known");
        let s = s.set_field_active(SUBMIT_KEY).expect("submit is a node");
        assert_eq!(s.active_count(), 1);
        assert_eq!(s.active_key(), Some(SUBMIT_KEY));
        assert!(s.submit().active);
    }

    #[test]
    fn unknown_keys_are_errors() {
        let s = state();
        assert_eq!(
            s.set_field_active("nope"),
            Err(NavError::UnknownField("nope".into()))
        );
        assert_eq!(
            s.set_question_completed(SUBMIT_KEY, true),
            Err(NavError::UnknownQuestion(SUBMIT_KEY.into()))
        );
    }

    #[test]
    fn transitions_leave_the_previous_state_intact() {
        let s = state();
        let next = s.apply(&NavCommand::Go(Direction::Next)).expect("go");
        assert_eq!(s.active_index(), None);
        assert_eq!(next.active_index(), Some(0));
    }

    #[test]
    fn go_clamps_at_both_ends() {
        let mut s = state();
        for _ in 0..10 {
            s = s.apply(&NavCommand::Go(Direction::Next)).expect("go");
        }
        assert_eq!(s.active_index(), Some(s.submit_index()));
        for _ in 0..10 {
            s = s.apply(&NavCommand::Go(Direction::Prev)).expect("go");
        }
        assert_eq!(s.active_index(), Some(0));
    }

    #[test]
    fn completion_and_progress() {
        let s = state()
            .apply(&NavCommand::SetCompleted {
                key: "age".into(),
                completed: true,
            })
            .expect("known");
        assert_eq!(s.is_completed("age"), Some(true));
        assert_eq!(s.completed_count(), 1);
        assert!((s.progress() - 1.0 / 3.0).abs() < f32::EPSILON);
        assert_eq!(UiState::new(Vec::<String>::new()).progress(), 1.0);
    }

    #[test]
    fn leading_throttle_drops_calls_inside_window() {
        let ms = Duration::from_millis;
        let mut t = LeadingThrottle::new(ms(250));
        assert!(t.try_acquire(ms(0)));
        assert!(!t.try_acquire(ms(100)));
        assert!(!t.try_acquire(ms(249)));
        assert!(t.try_acquire(ms(250)));
        let mut zero = LeadingThrottle::new(Duration::ZERO);
        assert!(zero.try_acquire(ms(5)));
        assert!(zero.try_acquire(ms(5)));
    }
}
