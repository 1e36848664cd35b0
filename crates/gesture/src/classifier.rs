//! Wheel-event classification.
//!
//! Trackpads and mice both arrive as plain wheel events, so the only signal
//! is the shape of the stream: rotation size, sign changes between events,
//! notch alignment and spacing. The classifier looks at the current event and
//! the one before it and nothing else.

use serde::{Deserialize, Serialize};

use crate::config::GestureConfig;
use crate::models::{GestureEvent, GestureKind};

/// Rolling memory of the previous event.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ClassifierState {
    pub last_rotation: f64,
    pub last_event_time_ms: i64,
    pub same_direction_count: u32,
    pub alternating_count: u32,
    /// 0 when no pinch session is active.
    pub pinch_session_expiry_ms: i64,
}

impl ClassifierState {
    pub fn pinch_session_active(&self, now_ms: i64) -> bool {
        self.pinch_session_expiry_ms != 0 && now_ms < self.pinch_session_expiry_ms
    }
}

/// -1, 0 or 1. Unlike `f64::signum`, zero has its own sign.
fn sign(value: f64) -> i8 {
    if value > 0.0 {
        1
    } else if value < 0.0 {
        -1
    } else {
        0
    }
}

/// Classify one event. Returns the gesture and the state to use for the next event.
pub fn classify(
    event: &GestureEvent,
    state: ClassifierState,
    config: &GestureConfig,
) -> (GestureKind, ClassifierState) {
    let rotation = event.precise_rotation;
    if !rotation.is_finite() || (rotation == 0.0 && event.notches == 0) {
        return (GestureKind::NoOp, state);
    }

    let now = event.timestamp_ms;
    let dt = now.saturating_sub(state.last_event_time_ms);
    let mut next = state;

    if dt < 0 || dt > config.reset_window_ms {
        next.same_direction_count = 0;
        next.alternating_count = 0;
        next.pinch_session_expiry_ms = 0;
    }

    let same_sign = sign(rotation) == sign(next.last_rotation);
    let significant = rotation.abs() > config.direction_epsilon;
    let quick = (0..config.quick_window_ms).contains(&dt);

    // Sustained same-direction motion is a scroll and always beats pinch.
    let mut directional = false;
    if significant {
        if same_sign {
            if quick {
                next.same_direction_count += 1;
                next.alternating_count = 0;
                directional = next.same_direction_count >= config.directional_activation_count;
            }
        } else {
            next.same_direction_count = 0;
        }
    }

    let mut pinch = false;
    if !directional {
        let alternating = !same_sign && next.last_rotation.abs() > 0.0;
        let small = rotation.abs() <= config.pinch_rotation_threshold;
        let in_window = (0..=config.pinch_time_window_ms).contains(&dt);
        if alternating && small && in_window {
            next.alternating_count += 1;
            next.same_direction_count = 0;
            if next.alternating_count >= config.pinch_activation_count {
                pinch = true;
                next.pinch_session_expiry_ms = now.saturating_add(config.pinch_session_timeout_ms);
            }
        }
    }

    if !pinch && next.pinch_session_active(now) {
        pinch = true;
    }

    next.last_rotation = rotation;
    next.last_event_time_ms = now;

    let notches = event.notches as f64;
    let looks_like_trackpad = (rotation - notches).abs() > config.notch_match_tolerance
        || rotation.abs() < config.trackpad_magnitude_floor
        || (dt > 0 && dt < config.rapid_stream_ms);
    let hardware_wheel = !looks_like_trackpad && event.notches.abs() >= 1;

    let kind = if hardware_wheel {
        GestureKind::ZoomHardwareWheel(notches * config.hardware_wheel_step)
    } else if event.control_down || pinch {
        GestureKind::ZoomPinch(rotation * config.pinch_step_unit * config.pinch_steps_per_event)
    } else {
        let px = rotation * config.pan_sensitivity_px_per_unit;
        if event.horizontal_hint == Some(true) || event.shift_down {
            GestureKind::PanHorizontal(px)
        } else {
            GestureKind::PanVertical(px)
        }
    };

    tracing::debug!(
        rotation,
        notches = event.notches,
        dt,
        directional,
        pinch,
        hardware_wheel,
        kind = kind.label(),
        "classified wheel event"
    );

    (kind, next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ScreenPoint;

    /// Run a sequence through the classifier starting from a fresh state.
    fn run(events: &[GestureEvent]) -> (Vec<GestureKind>, ClassifierState) {
        let config = GestureConfig::default();
        let mut state = ClassifierState::default();
        let mut kinds = Vec::new();
        for e in events {
            let (kind, next) = classify(e, state, &config);
            kinds.push(kind);
            state = next;
        }
        (kinds, state)
    }

    /// Trackpad events at `t = base + offsets`, far from the zero origin.
    fn trackpad_seq(rotations: &[f64], offsets: &[i64]) -> Vec<GestureEvent> {
        let base = 10_000;
        rotations
            .iter()
            .zip(offsets)
            .map(|(&r, &t)| GestureEvent::trackpad(r, base + t))
            .collect()
    }

    #[test]
    fn test_zero_event_is_noop_and_keeps_state() {
        let config = GestureConfig::default();
        let state = ClassifierState {
            last_rotation: 0.3,
            last_event_time_ms: 50,
            same_direction_count: 1,
            ..ClassifierState::default()
        };
        let (kind, next) = classify(&GestureEvent::trackpad(0.0, 60), state, &config);
        assert_eq!(kind, GestureKind::NoOp);
        assert_eq!(next, state);
    }

    #[test]
    fn test_non_finite_rotation_is_noop() {
        let config = GestureConfig::default();
        let state = ClassifierState::default();
        for r in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let mut e = GestureEvent::wheel(1, 500);
            e.precise_rotation = r;
            let (kind, next) = classify(&e, state, &config);
            assert_eq!(kind, GestureKind::NoOp);
            assert_eq!(next, state);
        }
    }

    #[test]
    fn test_same_direction_pair_is_vertical_pan() {
        let (kinds, _) = run(&trackpad_seq(&[0.1, 0.1], &[0, 40]));
        assert!(matches!(kinds[1], GestureKind::PanVertical(px) if (px - 3.5).abs() < 1e-9));
    }

    #[test]
    fn test_directional_run_never_becomes_pinch() {
        // A small same-sign stream inside the pinch window: every event pans.
        let rotations = [0.05, 0.05, 0.05, 0.05, 0.05];
        let offsets = [0, 20, 40, 60, 80];
        let (kinds, state) = run(&trackpad_seq(&rotations, &offsets));
        assert!(kinds.iter().all(|k| k.is_pan()), "{kinds:?}");
        assert_eq!(state.alternating_count, 0);
        assert!(state.same_direction_count >= 2);
    }

    #[test]
    fn test_directional_confirmation_zeroes_alternating() {
        let config = GestureConfig::default();
        let state = ClassifierState {
            last_rotation: 0.05,
            last_event_time_ms: 1000,
            same_direction_count: 1,
            alternating_count: 3,
            pinch_session_expiry_ms: 0,
        };
        let (kind, next) = classify(&GestureEvent::trackpad(0.05, 1020), state, &config);
        assert!(kind.is_pan());
        assert_eq!(next.same_direction_count, 2);
        assert_eq!(next.alternating_count, 0);
    }

    #[test]
    fn test_pinch_activation_and_session_hold() {
        let (kinds, state) = run(&trackpad_seq(&[0.05, -0.05], &[0, 30]));
        assert!(kinds[0].is_pan());
        assert!(matches!(kinds[1], GestureKind::ZoomPinch(d) if (d + 0.03).abs() < 1e-9));
        assert_eq!(state.pinch_session_expiry_ms, 10_000 + 30 + 180);

        // Too slow to alternate (dt = 120 > 60), but still inside the session.
        let config = GestureConfig::default();
        let (kind, _) = classify(&GestureEvent::trackpad(0.05, 10_150), state, &config);
        assert!(matches!(kind, GestureKind::ZoomPinch(_)));
        let (kind, _) = classify(&GestureEvent::trackpad(-0.05, 10_150), state, &config);
        assert!(matches!(kind, GestureKind::ZoomPinch(_)));
    }

    #[test]
    fn test_pinch_from_origin_timestamps() {
        // Same shape as above but at t = [0, 30] from a fresh state.
        let (kinds, state) = run(&[
            GestureEvent::trackpad(0.05, 0),
            GestureEvent::trackpad(-0.05, 30),
        ]);
        assert!(matches!(kinds[1], GestureKind::ZoomPinch(_)));
        assert_eq!(state.pinch_session_expiry_ms, 210);
        let config = GestureConfig::default();
        let (kind, _) = classify(&GestureEvent::trackpad(-0.05, 150), state, &config);
        assert!(matches!(kind, GestureKind::ZoomPinch(_)));
    }

    #[test]
    fn test_quick_same_sign_run_inside_session_stays_pinch() {
        let (_, state) = run(&trackpad_seq(&[0.05, -0.05], &[0, 30]));
        let config = GestureConfig::default();

        // Two quick events with the previous sign confirm a directional run,
        // but the open session still wins.
        let (kind, state) = classify(&GestureEvent::trackpad(-0.05, 10_040), state, &config);
        assert!(matches!(kind, GestureKind::ZoomPinch(_)), "{kind:?}");
        let (kind, state) = classify(&GestureEvent::trackpad(-0.05, 10_050), state, &config);
        assert_eq!(state.same_direction_count, 2);
        assert!(matches!(kind, GestureKind::ZoomPinch(_)), "{kind:?}");
    }

    #[test]
    fn test_extreme_timestamps_do_not_overflow() {
        let config = GestureConfig::default();

        let state = ClassifierState {
            last_rotation: 0.05,
            last_event_time_ms: 5_000,
            ..ClassifierState::default()
        };
        let (kind, next) = classify(&GestureEvent::trackpad(0.05, i64::MIN), state, &config);
        // No session is open, even though i64::MIN is below the empty expiry.
        assert!(kind.is_pan(), "{kind:?}");
        assert_eq!(next.last_event_time_ms, i64::MIN);

        let state = ClassifierState {
            last_rotation: 0.05,
            last_event_time_ms: i64::MAX - 30,
            ..ClassifierState::default()
        };
        let (kind, next) = classify(&GestureEvent::trackpad(-0.05, i64::MAX - 10), state, &config);
        assert!(matches!(kind, GestureKind::ZoomPinch(_)), "{kind:?}");
        assert_eq!(next.pinch_session_expiry_ms, i64::MAX);

        let state = ClassifierState {
            last_event_time_ms: i64::MIN,
            ..ClassifierState::default()
        };
        let (kind, next) = classify(&GestureEvent::trackpad(0.1, i64::MAX), state, &config);
        assert!(kind.is_pan());
        assert_eq!(next.same_direction_count, 0);
    }

    #[test]
    fn test_session_expires() {
        let (_, state) = run(&trackpad_seq(&[0.05, -0.05], &[0, 30]));
        let config = GestureConfig::default();
        // 10_030 + 180 = 10_210; at 10_215 the session is over and dt is 185.
        let (kind, _) = classify(&GestureEvent::trackpad(-0.05, 10_215), state, &config);
        assert!(kind.is_pan(), "{kind:?}");
    }

    #[test]
    fn test_large_alternating_rotation_is_not_pinch() {
        let (kinds, state) = run(&trackpad_seq(&[0.5, -0.5], &[0, 30]));
        assert!(kinds[1].is_pan());
        assert_eq!(state.alternating_count, 0);
        assert_eq!(state.pinch_session_expiry_ms, 0);
    }

    #[test]
    fn test_slow_alternation_is_not_pinch() {
        let (kinds, _) = run(&trackpad_seq(&[0.05, -0.05], &[0, 61]));
        assert!(kinds[1].is_pan());
    }

    #[test]
    fn test_hardware_wheel_after_quiet_period() {
        let config = GestureConfig::default();
        let state = ClassifierState {
            last_event_time_ms: 1000,
            ..ClassifierState::default()
        };
        let (kind, _) = classify(&GestureEvent::wheel(1, 1150), state, &config);
        assert!(matches!(kind, GestureKind::ZoomHardwareWheel(d) if (d - 1.2).abs() < 1e-9));
    }

    #[test]
    fn test_rapid_notch_stream_looks_like_trackpad() {
        let config = GestureConfig::default();
        let state = ClassifierState {
            last_rotation: 1.0,
            last_event_time_ms: 1000,
            ..ClassifierState::default()
        };
        let (kind, _) = classify(&GestureEvent::wheel(1, 1010), state, &config);
        assert!(!matches!(kind, GestureKind::ZoomHardwareWheel(_)), "{kind:?}");
    }

    #[test]
    fn test_fractional_rotation_with_notch_is_trackpad() {
        let config = GestureConfig::default();
        let mut e = GestureEvent::wheel(1, 5000);
        e.precise_rotation = 1.3;
        let (kind, _) = classify(&e, ClassifierState::default(), &config);
        assert!(kind.is_pan());
    }

    #[test]
    fn test_control_turns_trackpad_scroll_into_zoom() {
        let config = GestureConfig::default();
        let e = GestureEvent::trackpad(0.5, 5000).with_control();
        let (kind, _) = classify(&e, ClassifierState::default(), &config);
        assert!(matches!(kind, GestureKind::ZoomPinch(d) if (d - 0.3).abs() < 1e-9));
    }

    #[test]
    fn test_control_with_hardware_wheel_keeps_wheel_step() {
        let config = GestureConfig::default();
        let e = GestureEvent::wheel(-1, 5000).with_control();
        let (kind, _) = classify(&e, ClassifierState::default(), &config);
        assert!(matches!(kind, GestureKind::ZoomHardwareWheel(d) if (d + 1.2).abs() < 1e-9));
    }

    #[test]
    fn test_shift_pans_horizontally() {
        let config = GestureConfig::default();
        let e = GestureEvent::trackpad(0.2, 5000).with_shift();
        let (kind, _) = classify(&e, ClassifierState::default(), &config);
        assert!(matches!(kind, GestureKind::PanHorizontal(px) if (px - 7.0).abs() < 1e-9));
    }

    #[test]
    fn test_horizontal_hint_pans_horizontally() {
        let config = GestureConfig::default();
        let e = GestureEvent::trackpad(-0.2, 5000)
            .with_horizontal_hint(true)
            .at(ScreenPoint::new(5.0, 5.0));
        let (kind, _) = classify(&e, ClassifierState::default(), &config);
        assert!(matches!(kind, GestureKind::PanHorizontal(px) if (px + 7.0).abs() < 1e-9));

        let e = GestureEvent::trackpad(-0.2, 5000).with_horizontal_hint(false);
        let (kind, _) = classify(&e, ClassifierState::default(), &config);
        assert!(matches!(kind, GestureKind::PanVertical(_)));
    }

    #[test]
    fn test_reset_window_forgets_pinch_session() {
        let (_, state) = run(&trackpad_seq(&[0.05, -0.05], &[0, 30]));
        assert!(state.pinch_session_expiry_ms > 0);
        let config = GestureConfig::default();
        let (kind, next) = classify(&GestureEvent::trackpad(-0.05, 10_231), state, &config);
        assert!(kind.is_pan());
        assert_eq!(next.pinch_session_expiry_ms, 0);
        assert_eq!(next.alternating_count, 0);
    }

    #[test]
    fn test_reset_window_forgets_directional_run() {
        let (_, state) = run(&trackpad_seq(&[0.1, 0.1, 0.1], &[0, 20, 40]));
        assert!(state.same_direction_count >= 2);
        let config = GestureConfig::default();
        let (_, next) = classify(&GestureEvent::trackpad(0.1, 10_241), state, &config);
        assert_eq!(next.same_direction_count, 0);
    }

    #[test]
    fn test_out_of_order_timestamp_resets() {
        let (_, state) = run(&trackpad_seq(&[0.05, -0.05], &[0, 30]));
        let config = GestureConfig::default();
        let (kind, next) = classify(&GestureEvent::trackpad(0.05, 9_000), state, &config);
        assert!(kind.is_pan());
        assert_eq!(next.pinch_session_expiry_ms, 0);
        assert_eq!(next.last_event_time_ms, 9_000);
    }

    #[test]
    fn test_sign_mismatch_resets_directional_count() {
        let (_, state) = run(&trackpad_seq(&[0.3, 0.3, -0.3], &[0, 20, 40]));
        assert_eq!(state.same_direction_count, 0);
    }

    #[test]
    fn test_state_records_last_event() {
        let (_, state) = run(&trackpad_seq(&[0.07], &[0]));
        assert!((state.last_rotation - 0.07).abs() < 1e-12);
        assert_eq!(state.last_event_time_ms, 10_000);
    }

    #[test]
    fn test_sign_helper() {
        assert_eq!(sign(0.0), 0);
        assert_eq!(sign(-0.0), 0);
        assert_eq!(sign(0.2), 1);
        assert_eq!(sign(-3.0), -1);
    }
}
