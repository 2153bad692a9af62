//! Wheel and touch gesture accumulation.
//!
//! Trackpads emit a stream of small, noisy wheel deltas; touch screens emit
//! a drag that only means something once the finger lifts. Both are reduced
//! to at most one [`Direction`] per resolved gesture.
//!
//! ## Wheel
//!
//! A wheel event is claimed only when it is horizontally dominant
//! (`|dx| >= |dy|` and `dx != 0`); anything else is left to the page so
//! vertical scrolling keeps working over the carousel. Claimed deltas are
//! summed until the total reaches the threshold, which emits one signal and
//! zeroes the total. Every claimed event re-arms a debounce deadline; if it
//! passes with no further claimed event, the sub-threshold residue is
//! discarded.
//!
//! ## Touch
//!
//! Start and latest positions are recorded; at gesture end the displacement
//! is a swipe only if it is horizontally dominant and longer than the swipe
//! threshold. Swiping right (positive `dx`) reveals the previous card.

use super::{Direction, Millis};

/// A 2D input delta.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Delta {
    pub dx: f64,
    pub dy: f64,
}

impl Delta {
    pub fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    fn is_horizontal(&self) -> bool {
        self.dx != 0.0 && self.dy.abs() <= self.dx.abs()
    }
}

/// A touch position in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Result of feeding one wheel event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelOutcome {
    /// Not ours: default scrolling proceeds.
    Ignored,
    /// Claimed (default scrolling suppressed), possibly completing a step.
    Claimed(Option<Direction>),
}

impl WheelOutcome {
    /// Whether the caller should suppress the browser's default scrolling.
    pub fn is_claimed(&self) -> bool {
        matches!(self, WheelOutcome::Claimed(_))
    }

    pub fn signal(&self) -> Option<Direction> {
        match self {
            WheelOutcome::Claimed(signal) => *signal,
            WheelOutcome::Ignored => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GestureAccumulator {
    threshold: f64,
    debounce: Millis,
    swipe_threshold: f64,
    total: f64,
    debounce_deadline: Option<Millis>,
    touch_start: Option<Point>,
    touch_move: Option<Point>,
}

impl GestureAccumulator {
    pub fn new(threshold: f64, debounce: Millis, swipe_threshold: f64) -> Self {
        Self {
            threshold,
            debounce,
            swipe_threshold,
            total: 0.0,
            debounce_deadline: None,
            touch_start: None,
            touch_move: None,
        }
    }

    /// Running horizontal total of the current wheel gesture.
    pub fn accumulated(&self) -> f64 {
        self.total
    }

    /// Pending debounce deadline, if a partial wheel gesture is open.
    pub fn debounce_deadline(&self) -> Option<Millis> {
        self.debounce_deadline
    }

    pub fn touch_points(&self) -> (Option<Point>, Option<Point>) {
        (self.touch_start, self.touch_move)
    }

    /// Feed one wheel event received at `now`.
    pub fn on_wheel(&mut self, delta: Delta, now: Millis) -> WheelOutcome {
        // A deadline that passed before this event fired first.
        self.poll(now);

        if !delta.is_horizontal() {
            return WheelOutcome::Ignored;
        }

        self.total += delta.dx;
        if self.total.abs() >= self.threshold {
            let direction = if self.total > 0.0 {
                Direction::Next
            } else {
                Direction::Prev
            };
            self.total = 0.0;
            self.debounce_deadline = None;
            return WheelOutcome::Claimed(Some(direction));
        }

        self.debounce_deadline = Some(now + self.debounce);
        WheelOutcome::Claimed(None)
    }

    /// Fire the debounce timer if its deadline has passed.
    ///
    /// Returns `true` when a partial gesture was discarded.
    pub fn poll(&mut self, now: Millis) -> bool {
        match self.debounce_deadline {
            Some(deadline) if now >= deadline => {
                self.total = 0.0;
                self.debounce_deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn touch_start(&mut self, at: Point) {
        self.touch_start = Some(at);
        self.touch_move = None;
    }

    pub fn touch_move(&mut self, at: Point) {
        if self.touch_start.is_some() {
            self.touch_move = Some(at);
        }
    }

    /// Resolve the touch gesture. Touch points are cleared either way.
    pub fn touch_end(&mut self) -> Option<Direction> {
        let start = self.touch_start.take()?;
        let end = self.touch_move.take()?;

        let dx = end.x - start.x;
        let dy = end.y - start.y;
        if dx.abs() > self.swipe_threshold && dx.abs() > dy.abs() {
            Some(if dx > 0.0 {
                Direction::Prev
            } else {
                Direction::Next
            })
        } else {
            None
        }
    }

    /// Drop all pending state, including the debounce timer.
    pub fn reset(&mut self) {
        self.total = 0.0;
        self.debounce_deadline = None;
        self.touch_start = None;
        self.touch_move = None;
    }
}
