//! The carousel controller.
//!
//! [`Carousel`] owns every piece of carousel state: the index, the
//! navigation lock, the gesture accumulator and the open detail overlay.
//! Nothing else mutates them.
//!
//! ## States
//!
//! ```text
//!            next / prev / go_to
//!   Idle  ──────────────────────►  Transitioning
//!     ▲                                  │
//!     └────────── transition elapsed ────┘
//! ```
//!
//! Entering `Transitioning` moves the index immediately, so the next render
//! already shows the target; the lock only blocks further steps.
//!
//! ## Layout
//!
//! Each card's signed offset from the current index drives its placement on
//! a circle seen from the front:
//!
//! ```text
//! angle = offset × angle_step
//! x     = sin(angle) × radius
//! depth = cos(angle) × radius − |offset| × depth_falloff
//! ```
//!
//! Cards beyond `visible_range` are not rendered; cards beyond
//! `interactive_range` are rendered but inert.

use super::{
    CarouselParams, Delta, Direction, GestureAccumulator, GuardEvent, IndexCycler, Millis, Point,
    TransitionGuard, WheelOutcome,
};
use serde::Serialize;
use tracing::debug;

/// Snapshot of the controller's mutable state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CarouselState {
    pub current_index: usize,
    pub is_transitioning: bool,
    pub scroll_accumulator: f64,
    pub touch_start: Option<Point>,
    pub touch_move: Option<Point>,
}

/// Derived visual parameters for one rendered card.
#[derive(Debug, Clone, PartialEq)]
pub struct CardLayout {
    pub index: usize,
    pub offset: isize,
    pub angle_deg: f64,
    pub x: f64,
    /// `cos(angle) × radius − |offset| × depth_falloff`.
    pub depth: f64,
    /// Radius the depth was measured against; the centered card sits at
    /// `depth == radius`.
    pub radius: f64,
    pub opacity: f64,
    pub scale: f64,
    pub z_index: i32,
    pub interactive: bool,
}

impl CardLayout {
    /// Inline CSS placing the card. The centered card has no translation.
    pub fn style(&self) -> String {
        format!(
            "transform: translateX({x:.1}px) translateZ({z:.1}px) rotateY({rot:.1}deg) scale({scale:.3}); \
             opacity: {opacity:.3}; z-index: {z_index}; pointer-events: {events};",
            x = self.x,
            z = self.depth - self.radius,
            rot = -self.angle_deg,
            scale = self.scale,
            opacity = self.opacity,
            z_index = self.z_index,
            events = if self.interactive { "auto" } else { "none" },
        )
    }
}

#[derive(Debug, Clone)]
pub struct Carousel<T> {
    items: Vec<T>,
    cycler: IndexCycler,
    guard: TransitionGuard,
    gestures: GestureAccumulator,
    params: CarouselParams,
    viewport_width: f64,
    detail: Option<usize>,
}

impl<T> Carousel<T> {
    pub fn new(items: Vec<T>, params: CarouselParams) -> Self {
        Self {
            cycler: IndexCycler::new(items.len()),
            guard: TransitionGuard::new(params.transition),
            gestures: GestureAccumulator::new(
                params.wheel_threshold,
                params.wheel_debounce,
                params.swipe_threshold,
            ),
            viewport_width: f64::INFINITY,
            detail: None,
            items,
            params,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.cycler.index()
    }

    pub fn is_transitioning(&self) -> bool {
        self.guard.is_transitioning()
    }

    pub fn params(&self) -> &CarouselParams {
        &self.params
    }

    pub fn state(&self) -> CarouselState {
        let (touch_start, touch_move) = self.gestures.touch_points();
        CarouselState {
            current_index: self.cycler.index(),
            is_transitioning: self.guard.is_transitioning(),
            scroll_accumulator: self.gestures.accumulated(),
            touch_start,
            touch_move,
        }
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    pub fn next(&mut self, now: Millis) -> bool {
        self.navigate(Direction::Next, now)
    }

    pub fn prev(&mut self, now: Millis) -> bool {
        self.navigate(Direction::Prev, now)
    }

    /// Step once in `direction`. Returns `false` when the step was rejected
    /// (empty list or a transition still in flight).
    pub fn navigate(&mut self, direction: Direction, now: Millis) -> bool {
        if self.items.is_empty() || !self.guard.try_begin(now) {
            return false;
        }
        match direction {
            Direction::Next => self.cycler.next(),
            Direction::Prev => self.cycler.prev(),
        }
        debug!(
            ?direction,
            index = self.cycler.index(),
            now,
            "carousel step committed"
        );
        true
    }

    /// Jump to `index`, which must be below [`len`](Self::len).
    ///
    /// Jumping to the current card is not a transition and returns `false`.
    pub fn go_to(&mut self, index: usize, now: Millis) -> bool {
        if self.items.is_empty() || index == self.cycler.index() {
            return false;
        }
        if !self.guard.try_begin(now) {
            return false;
        }
        self.cycler.go_to(index);
        debug!(index, now, "carousel jump committed");
        true
    }

    /// Advance timers to `now`: the wheel debounce and the transition lock.
    pub fn tick(&mut self, now: Millis) {
        self.gestures.poll(now);
        self.guard.tick(now);
    }

    // ------------------------------------------------------------------
    // Input
    // ------------------------------------------------------------------

    /// Feed a wheel event; a completed gesture navigates. An empty carousel
    /// leaves every event to the page.
    pub fn on_wheel(&mut self, delta: Delta, now: Millis) -> WheelOutcome {
        if self.items.is_empty() {
            return WheelOutcome::Ignored;
        }
        let outcome = self.gestures.on_wheel(delta, now);
        if let Some(direction) = outcome.signal() {
            self.navigate(direction, now);
        }
        outcome
    }

    pub fn touch_start(&mut self, at: Point) {
        self.gestures.touch_start(at);
    }

    pub fn touch_move(&mut self, at: Point) {
        self.gestures.touch_move(at);
    }

    /// Resolve the touch gesture; a swipe navigates.
    pub fn touch_end(&mut self, now: Millis) -> Option<Direction> {
        let signal = self.gestures.touch_end();
        if let Some(direction) = signal {
            self.navigate(direction, now);
        }
        signal
    }

    pub fn set_viewport_width(&mut self, width: f64) {
        self.viewport_width = width;
    }

    // ------------------------------------------------------------------
    // Layout
    // ------------------------------------------------------------------

    pub fn offset_of(&self, index: usize) -> isize {
        self.cycler.relative_offset(index)
    }

    /// Layout for the card at `index`, or `None` if it is not rendered.
    pub fn card(&self, index: usize) -> Option<CardLayout> {
        if index >= self.items.len() {
            return None;
        }
        let offset = self.offset_of(index);
        let distance = offset.unsigned_abs() as u32;
        if distance > self.params.visible_range {
            return None;
        }

        let geometry = self.params.geometry_for(self.viewport_width);
        let angle_deg = offset as f64 * geometry.angle_step_deg;
        let angle = angle_deg.to_radians();
        Some(CardLayout {
            index,
            offset,
            angle_deg,
            x: angle.sin() * geometry.radius,
            depth: angle.cos() * geometry.radius - distance as f64 * geometry.depth_falloff,
            radius: geometry.radius,
            opacity: self.params.opacity_at(distance),
            scale: self.params.scale_at(distance),
            z_index: (self.params.visible_range - distance) as i32 + 1,
            interactive: distance <= self.params.interactive_range,
        })
    }

    /// Layouts of all rendered cards, in list order.
    pub fn cards(&self) -> Vec<CardLayout> {
        (0..self.items.len()).filter_map(|i| self.card(i)).collect()
    }

    // ------------------------------------------------------------------
    // Detail overlay
    // ------------------------------------------------------------------

    /// Activate the card at `index`. Only interactive cards open the detail
    /// overlay; the opened item is returned.
    pub fn activate(&mut self, index: usize) -> Option<&T> {
        if !self.card(index)?.interactive {
            return None;
        }
        self.open_detail(index)
    }

    pub fn open_detail(&mut self, index: usize) -> Option<&T> {
        let item = self.items.get(index)?;
        self.detail = Some(index);
        Some(item)
    }

    /// Close the overlay. The index is left untouched.
    pub fn close_detail(&mut self) {
        self.detail = None;
    }

    pub fn detail(&self) -> Option<&T> {
        self.detail.and_then(|i| self.items.get(i))
    }

    /// Drop pending timers and partial gestures before the surface goes away.
    pub fn teardown(&mut self) {
        self.gestures.reset();
        self.guard.on(GuardEvent::Teardown);
        self.detail = None;
    }
}
