//! Integration tests for the tween primitives.

use iform_core::animation::*;
use proptest::prelude::*;
use std::time::Duration;

#[test]
fn many_small_ticks_complete_tween() {
    let mut t = Tween::new(0.0, 100.0, Duration::from_millis(300));
    for _ in 0..300 {
        t.tick(Duration::from_millis(1));
    }
    assert!(t.is_complete(), "300x1ms should complete a 300ms tween");
    assert_eq!(t.position(), 100.0);
}

proptest! {
    #[test]
    fn tween_position_stays_between_endpoints(
        from in -500.0f32..500.0,
        to in -500.0f32..500.0,
        steps in proptest::collection::vec(0u64..120, 1..20),
    ) {
        let mut t = Tween::new(from, to, Duration::from_millis(300));
        let (lo, hi) = if from <= to { (from, to) } else { (to, from) };
        for step in steps {
            t.tick(Duration::from_millis(step));
            let p = t.position();
            prop_assert!(p >= lo - 1e-3 && p <= hi + 1e-3, "{p} outside [{lo}, {hi}]");
        }
    }

    #[test]
    fn easing_is_monotonic(a in 0.0f32..=1.0, b in 0.0f32..=1.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(ease_in_out(lo) <= ease_in_out(hi) + 1e-6);
    }
}
