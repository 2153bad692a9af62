//! Project carousel navigation core.
//!
//! The carousel is a single-owner state machine driven by discrete input
//! events. Time is never read from a clock: every method that can arm or
//! expire a timer takes `now` in milliseconds, so the same code runs under a
//! mock clock in tests and renders the initial layout at build time.
//!
//! The module is split into:
//! - **Gesture**: wheel/touch deltas → discrete [`Direction`] signals
//! - **Cycler**: circular index arithmetic and shortest signed offsets
//! - **Guard**: the Idle/Transitioning lock serializing navigation
//! - **Controller**: [`Carousel`], composing the above with per-card layout
//! - **Parameters**: [`CarouselParams`], tuning resolved from `config.toml`

mod controller;
mod cycler;
mod gesture;
mod guard;
mod params;

pub use controller::{Carousel, CardLayout, CarouselState};
pub use cycler::IndexCycler;
pub use gesture::{Delta, GestureAccumulator, Point, WheelOutcome};
pub use guard::{GuardEvent, Phase, TransitionGuard};
pub use params::{CarouselParams, Geometry};

/// Milliseconds on the event loop's clock.
pub type Millis = u64;

/// A discrete navigation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Advance to the following card.
    Next,
    /// Retreat to the preceding card.
    Prev,
}
