#![forbid(unsafe_code)]

//! Timing and gesture settings.
//!
//! All durations are stored in milliseconds so the settings read naturally
//! as JSON:
//!
//! ```json
//! { "slideMs": 200, "navThrottleMs": 0 }
//! ```
//!
//! Missing keys keep their defaults.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Tunable timings of a form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormSettings {
    /// Length of the slide that centers a field.
    pub slide_ms: u64,
    /// Vertical drag, in pixels, that counts as a swipe.
    pub touch_threshold_px: f32,
    /// Wheel ticks closer than this collapse into one navigation.
    pub wheel_debounce_ms: u64,
    /// Minimum spacing of accepted navigation requests.
    pub nav_throttle_ms: u64,
    /// Delay before a manual scroll re-activates the centered field.
    pub recenter_throttle_ms: u64,
    /// Delay between mounting and activating the first field.
    pub mount_delay_ms: u64,
    /// Delay between a resize and re-centering the active field.
    pub resize_delay_ms: u64,
    /// Pause after a field becomes completed, before moving on.
    pub completion_pause_ms: u64,
    /// Delay between a slide settling and focus moving.
    pub focus_delay_ms: u64,
}

impl Default for FormSettings {
    fn default() -> Self {
        Self {
            slide_ms: 300,
            touch_threshold_px: 80.0,
            wheel_debounce_ms: 3,
            nav_throttle_ms: 250,
            recenter_throttle_ms: 250,
            mount_delay_ms: 30,
            resize_delay_ms: 20,
            completion_pause_ms: 500,
            focus_delay_ms: 10,
        }
    }
}

impl FormSettings {
    /// Parse settings from JSON, defaulting missing keys.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Settings with every delay and throttle at zero. Handy for hosts that
    /// drive the form step by step.
    pub fn immediate() -> Self {
        Self {
            slide_ms: 0,
            wheel_debounce_ms: 0,
            nav_throttle_ms: 0,
            recenter_throttle_ms: 0,
            mount_delay_ms: 0,
            resize_delay_ms: 0,
            completion_pause_ms: 0,
            focus_delay_ms: 0,
            ..Self::default()
        }
    }

    pub fn slide(&self) -> Duration {
        Duration::from_millis(self.slide_ms)
    }

    pub fn wheel_debounce(&self) -> Duration {
        Duration::from_millis(self.wheel_debounce_ms)
    }

    pub fn nav_throttle(&self) -> Duration {
        Duration::from_millis(self.nav_throttle_ms)
    }

    pub fn recenter_throttle(&self) -> Duration {
        Duration::from_millis(self.recenter_throttle_ms)
    }

    pub fn mount_delay(&self) -> Duration {
        Duration::from_millis(self.mount_delay_ms)
    }

    pub fn resize_delay(&self) -> Duration {
        Duration::from_millis(self.resize_delay_ms)
    }

    pub fn completion_pause(&self) -> Duration {
        Duration::from_millis(self.completion_pause_ms)
    }

    pub fn focus_delay(&self) -> Duration {
        Duration::from_millis(self.focus_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_widget_timings() {
        let s = FormSettings::default();
        assert_eq!(s.slide(), Duration::from_millis(300));
        assert_eq!(s.wheel_debounce(), Duration::from_millis(3));
        assert_eq!(s.completion_pause(), Duration::from_millis(500));
        assert_eq!(s.touch_threshold_px, 80.0);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let s = FormSettings::from_json(r#"{"slideMs": 120, "navThrottleMs": 0}"#)
            .expect("valid settings");
        assert_eq!(s.slide_ms, 120);
        assert_eq!(s.nav_throttle(), Duration::ZERO);
        assert_eq!(s.mount_delay_ms, 30);
    }

    #[test]
    fn unknown_shape_is_an_error() {
        assert!(FormSettings::from_json(r#"{"slideMs": "fast"}"#).is_err());
    }

    #[test]
    fn immediate_zeroes_timings_only() {
        let s = FormSettings::immediate();
        assert_eq!(s.focus_delay(), Duration::ZERO);
        assert_eq!(s.touch_threshold_px, 80.0);
    }
}
