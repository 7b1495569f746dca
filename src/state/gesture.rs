//! Gesture Classifier - Tap vs swipe disambiguation for the top card
//!
//! Turns one pointer gesture (start, drag samples, release) into exactly one
//! [`Decision`]. Policy at release, evaluated in order:
//!
//! 1. `|offset| > commit_threshold` → commit in the direction of the offset
//! 2. `duration < tap_max_duration && distance < tap_max_distance` → flip
//! 3. otherwise → no-op (the card springs back)
//!
//! Only the offset at release counts. A drag that peaks past the threshold and
//! comes back below it does not commit.
//!
//! # Example
//!
//! ```ignore
//! use std::time::{Duration, Instant};
//! use flashdeck::state::gesture::GestureClassifier;
//! use flashdeck::{Decision, GestureThresholds, Point};
//!
//! let mut classifier = GestureClassifier::new(GestureThresholds::default());
//! let t0 = Instant::now();
//!
//! classifier.on_gesture_start(Point::new(10.0, 10.0), t0);
//! let decision = classifier.on_gesture_end(Point::new(11.0, 10.0), t0 + Duration::from_millis(50), 1.0);
//! assert_eq!(decision, Decision::Flip);
//! ```

use std::time::{Duration, Instant};

use log::{debug, trace};

use crate::config::GestureThresholds;
use crate::types::{Decision, Point, SwipeDirection};

// =============================================================================
// INTERACTION STATE
// =============================================================================

/// Where and when the in-progress gesture began.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureStart {
    pub point: Point,
    pub time: Instant,
}

/// Transient state of the top card.
///
/// Recreated from `Default` whenever a different card becomes top.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InteractionState {
    /// Back face showing.
    pub is_flipped: bool,
    /// Signed horizontal displacement (positive = right).
    pub drag_offset: f32,
    /// Present only while a gesture is in progress.
    pub gesture_start: Option<GestureStart>,
}

impl InteractionState {
    /// Check if a gesture is in progress
    pub fn is_dragging(&self) -> bool {
        self.gesture_start.is_some()
    }
}

// =============================================================================
// DECISION POLICY
// =============================================================================

/// Classify a released gesture.
///
/// `duration` is `None` when no start was recorded; such a release can still
/// commit but is never a tap.
pub fn classify(
    horizontal_offset: f32,
    duration: Option<Duration>,
    distance: f32,
    thresholds: &GestureThresholds,
) -> Decision {
    if horizontal_offset.abs() > thresholds.commit_threshold {
        return Decision::commit(SwipeDirection::from_offset(horizontal_offset));
    }

    match duration {
        Some(duration)
            if duration < thresholds.tap_max_duration() && distance < thresholds.tap_max_distance =>
        {
            Decision::Flip
        }
        _ => Decision::NoOp,
    }
}

// =============================================================================
// CLASSIFIER
// =============================================================================

/// Live classifier for one card.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureClassifier {
    thresholds: GestureThresholds,
    state: InteractionState,
}

impl GestureClassifier {
    /// Classifier with fresh interaction state.
    pub fn new(thresholds: GestureThresholds) -> Self {
        Self::with_state(thresholds, InteractionState::default())
    }

    /// Classifier resuming from existing interaction state.
    pub fn with_state(thresholds: GestureThresholds, state: InteractionState) -> Self {
        Self { thresholds, state }
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn into_state(self) -> InteractionState {
        self.state
    }

    pub fn is_flipped(&self) -> bool {
        self.state.is_flipped
    }

    /// Record the gesture origin. Overwrites a stale unfinished gesture.
    pub fn on_gesture_start(&mut self, point: Point, time: Instant) {
        if self.state.gesture_start.is_some() {
            trace!("Gesture start without matching end, discarding stale origin");
        }
        self.state.gesture_start = Some(GestureStart { point, time });
        trace!("Gesture started at ({}, {})", point.x, point.y);
    }

    /// Live drag sample. Updates the offset that drives feedback.
    pub fn on_drag(&mut self, horizontal_offset: f32) {
        self.state.drag_offset = horizontal_offset;
    }

    /// Classify the release and update state.
    ///
    /// Flip toggles the face. Flip and no-op return the card to neutral
    /// offset; a commit keeps the release offset the card leaves from.
    /// The gesture origin is cleared on every branch.
    pub fn on_gesture_end(&mut self, point: Point, time: Instant, horizontal_offset: f32) -> Decision {
        let start = self.state.gesture_start.take();

        let (duration, distance) = match start {
            Some(start) => (
                Some(time.saturating_duration_since(start.time)),
                point.distance_to(start.point),
            ),
            None => (None, f32::INFINITY),
        };

        let decision = classify(horizontal_offset, duration, distance, &self.thresholds);

        match decision {
            Decision::Flip => {
                self.state.is_flipped = !self.state.is_flipped;
                self.state.drag_offset = 0.0;
            }
            Decision::NoOp => {
                self.state.drag_offset = 0.0;
            }
            Decision::CommitLeft | Decision::CommitRight => {
                self.state.drag_offset = horizontal_offset;
            }
        }

        debug!(
            "Gesture released: offset={} duration={:?} distance={} -> {:?}",
            horizontal_offset, duration, distance, decision
        );
        decision
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (GestureClassifier, Instant) {
        (GestureClassifier::new(GestureThresholds::default()), Instant::now())
    }

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn origin() -> Point {
        Point::new(100.0, 100.0)
    }

    #[test]
    fn test_commit_right_and_left() {
        let (mut c, t0) = setup();

        c.on_gesture_start(origin(), t0);
        assert_eq!(c.on_gesture_end(Point::new(350.0, 100.0), t0 + ms(400), 250.0), Decision::CommitRight);

        c.on_gesture_start(origin(), t0);
        assert_eq!(c.on_gesture_end(Point::new(-150.0, 100.0), t0 + ms(400), -250.0), Decision::CommitLeft);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let (mut c, t0) = setup();

        c.on_gesture_start(origin(), t0);
        assert_eq!(c.on_gesture_end(Point::new(300.0, 100.0), t0 + ms(400), 200.0), Decision::NoOp);

        c.on_gesture_start(origin(), t0);
        assert_eq!(c.on_gesture_end(Point::new(-100.0, 100.0), t0 + ms(400), -200.0), Decision::NoOp);
    }

    #[test]
    fn test_commit_beats_tap() {
        // Fast and short in point terms, but offset past threshold
        let (mut c, t0) = setup();
        c.on_gesture_start(origin(), t0);
        let decision = c.on_gesture_end(origin(), t0 + ms(10), 201.0);
        assert_eq!(decision, Decision::CommitRight);
        assert!(!c.is_flipped());
    }

    #[test]
    fn test_tap_flips_and_double_tap_restores() {
        let (mut c, t0) = setup();

        c.on_gesture_start(origin(), t0);
        assert_eq!(c.on_gesture_end(Point::new(102.0, 100.0), t0 + ms(50), 2.0), Decision::Flip);
        assert!(c.is_flipped());

        c.on_gesture_start(origin(), t0 + ms(500));
        assert_eq!(c.on_gesture_end(Point::new(102.0, 100.0), t0 + ms(550), 2.0), Decision::Flip);
        assert!(!c.is_flipped());
    }

    #[test]
    fn test_instant_unmoved_tap() {
        let (mut c, t0) = setup();
        c.on_gesture_start(origin(), t0);
        assert_eq!(c.on_gesture_end(origin(), t0, 0.0), Decision::Flip);
    }

    #[test]
    fn test_tap_bounds_are_exclusive() {
        let (mut c, t0) = setup();

        c.on_gesture_start(origin(), t0);
        assert_eq!(c.on_gesture_end(origin(), t0 + ms(200), 0.0), Decision::NoOp);

        c.on_gesture_start(origin(), t0);
        assert_eq!(c.on_gesture_end(Point::new(103.0, 104.0), t0 + ms(10), 3.0), Decision::NoOp);
        assert!(!c.is_flipped());
    }

    #[test]
    fn test_slow_drag_released_is_noop() {
        let (mut c, t0) = setup();

        c.on_gesture_start(origin(), t0);
        c.on_drag(120.0);
        assert_eq!(c.state().drag_offset, 120.0);

        let decision = c.on_gesture_end(Point::new(220.0, 100.0), t0 + ms(600), 120.0);
        assert_eq!(decision, Decision::NoOp);
        assert_eq!(c.state().drag_offset, 0.0);
        assert!(c.state().gesture_start.is_none());
        assert!(!c.is_flipped());
    }

    #[test]
    fn test_release_offset_not_peak_decides() {
        let (mut c, t0) = setup();

        c.on_gesture_start(origin(), t0);
        c.on_drag(250.0);
        c.on_drag(400.0);
        c.on_drag(150.0);
        assert_eq!(c.on_gesture_end(Point::new(250.0, 100.0), t0 + ms(700), 150.0), Decision::NoOp);

        c.on_gesture_start(origin(), t0);
        c.on_drag(400.0);
        c.on_drag(250.0);
        assert_eq!(c.on_gesture_end(Point::new(350.0, 100.0), t0 + ms(700), 250.0), Decision::CommitRight);
    }

    #[test]
    fn test_start_clears_on_every_branch() {
        let (mut c, t0) = setup();

        for offset in [0.0, 120.0, 300.0] {
            c.on_gesture_start(origin(), t0);
            assert!(c.state().is_dragging());
            c.on_gesture_end(origin(), t0 + ms(20), offset);
            assert!(!c.state().is_dragging());
        }
    }

    #[test]
    fn test_restart_overwrites_stale_origin() {
        let (mut c, t0) = setup();

        c.on_gesture_start(Point::new(0.0, 0.0), t0);
        c.on_gesture_start(origin(), t0 + ms(1000));

        // Measured against the second start: 40ms, 1px
        let decision = c.on_gesture_end(Point::new(101.0, 100.0), t0 + ms(1040), 1.0);
        assert_eq!(decision, Decision::Flip);
    }

    #[test]
    fn test_end_without_start() {
        let (mut c, t0) = setup();

        assert_eq!(c.on_gesture_end(origin(), t0, 0.0), Decision::NoOp);
        assert!(!c.is_flipped());
        assert_eq!(c.on_gesture_end(origin(), t0, -300.0), Decision::CommitLeft);
    }

    #[test]
    fn test_classify_pure() {
        let thresholds = GestureThresholds::default();
        assert_eq!(classify(-201.0, Some(ms(0)), 0.0, &thresholds), Decision::CommitLeft);
        assert_eq!(classify(0.0, Some(ms(199)), 4.9, &thresholds), Decision::Flip);
        assert_eq!(classify(0.0, None, 0.0, &thresholds), Decision::NoOp);
    }
}
