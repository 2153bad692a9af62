//! Carousel behavior driven through the public API under a mock clock.
//!
//! Each test feeds the same input sequence a visitor would produce and
//! checks the resulting index, lock state, and card layout.

use simple_folio::carousel::{
    Carousel, CarouselParams, Delta, Direction, IndexCycler, Point, WheelOutcome,
};

fn projects(n: usize) -> Carousel<String> {
    Carousel::new(
        (0..n).map(|i| format!("project {i}")).collect(),
        CarouselParams::default(),
    )
}

#[test]
fn burst_of_next_clicks_moves_once_per_transition() {
    let mut c = projects(5);
    assert!(c.next(0));
    assert!(!c.next(10));
    assert!(!c.next(20));
    assert_eq!(c.current_index(), 1);
    assert!(c.is_transitioning());

    c.tick(700);
    assert!(!c.is_transitioning());
    assert!(c.next(700));
    assert_eq!(c.current_index(), 2);
}

#[test]
fn wrapping_in_both_directions() {
    let mut c = projects(3);
    let mut now = 0;
    for expected in [1, 2, 0] {
        assert!(c.next(now));
        assert_eq!(c.current_index(), expected);
        now += 700;
        c.tick(now);
    }
    assert!(c.prev(now));
    assert_eq!(c.current_index(), 2);
}

#[test]
fn left_swipe_advances_and_clears_touch_state() {
    let mut c = projects(5);
    c.touch_start(Point::new(100.0, 100.0));
    c.touch_move(Point::new(30.0, 105.0));
    assert_eq!(c.touch_end(0), Some(Direction::Next));
    assert_eq!(c.current_index(), 1);
    assert_eq!(c.state().touch_start, None);
}

#[test]
fn right_swipe_goes_back() {
    let mut c = projects(5);
    c.touch_start(Point::new(30.0, 100.0));
    c.touch_move(Point::new(100.0, 90.0));
    assert_eq!(c.touch_end(0), Some(Direction::Prev));
    assert_eq!(c.current_index(), 4);
}

#[test]
fn short_or_vertical_swipe_is_a_tap() {
    let mut c = projects(5);
    c.touch_start(Point::new(100.0, 100.0));
    c.touch_move(Point::new(80.0, 100.0));
    assert_eq!(c.touch_end(0), None);

    c.touch_start(Point::new(100.0, 100.0));
    c.touch_move(Point::new(30.0, 300.0));
    assert_eq!(c.touch_end(0), None);
    assert_eq!(c.current_index(), 0);
}

#[test]
fn vertical_wheel_scrolls_the_page() {
    let mut c = projects(5);
    let outcome = c.on_wheel(Delta::new(5.0, 40.0), 0);
    assert_eq!(outcome, WheelOutcome::Ignored);
    assert_eq!(c.state().scroll_accumulator, 0.0);
}

#[test]
fn wheel_exactly_at_threshold_emits_one_signal() {
    let mut c = projects(5);
    assert_eq!(
        c.on_wheel(Delta::new(60.0, 0.0), 0),
        WheelOutcome::Claimed(Some(Direction::Next))
    );
    assert_eq!(c.current_index(), 1);
    assert_eq!(c.state().scroll_accumulator, 0.0);
}

#[test]
fn negative_wheel_total_goes_back() {
    let mut c = projects(5);
    c.on_wheel(Delta::new(-35.0, 0.0), 0);
    assert_eq!(
        c.on_wheel(Delta::new(-35.0, 5.0), 20),
        WheelOutcome::Claimed(Some(Direction::Prev))
    );
    assert_eq!(c.current_index(), 4);
}

#[test]
fn wheel_residue_is_discarded_after_a_pause() {
    let mut c = projects(5);
    c.on_wheel(Delta::new(40.0, 0.0), 0);
    // Second half arrives after the debounce window closed.
    let outcome = c.on_wheel(Delta::new(40.0, 0.0), 200);
    assert_eq!(outcome, WheelOutcome::Claimed(None));
    assert_eq!(c.current_index(), 0);
    assert_eq!(c.state().scroll_accumulator, 40.0);
}

#[test]
fn wheel_during_transition_is_claimed_but_dropped() {
    let mut c = projects(5);
    assert!(c.next(0));
    let outcome = c.on_wheel(Delta::new(80.0, 0.0), 100);
    assert!(outcome.is_claimed());
    assert_eq!(c.current_index(), 1);
}

#[test]
fn empty_carousel_ignores_everything() {
    let mut c = projects(0);
    assert!(!c.next(0));
    assert!(!c.prev(0));
    assert_eq!(c.on_wheel(Delta::new(100.0, 0.0), 0), WheelOutcome::Ignored);
    c.touch_start(Point::new(100.0, 0.0));
    c.touch_move(Point::new(0.0, 0.0));
    c.touch_end(0);
    assert_eq!(c.current_index(), 0);
    assert!(!c.is_transitioning());
    assert!(c.activate(0).is_none());
}

#[test]
fn single_project_still_locks_on_next() {
    let mut c = projects(1);
    assert!(c.next(0));
    assert_eq!(c.current_index(), 0);
    assert!(!c.next(100));
}

#[test]
fn only_near_cards_open_the_detail() {
    let mut c = projects(7);
    assert_eq!(c.activate(0).map(String::as_str), Some("project 0"));
    c.close_detail();
    assert_eq!(c.activate(1).map(String::as_str), Some("project 1"));
    c.close_detail();
    assert_eq!(c.activate(6).map(String::as_str), Some("project 6"));
    c.close_detail();
    // Visible but not interactive.
    assert!(c.card(2).is_some());
    assert!(c.activate(2).is_none());
    // Not rendered at all.
    assert!(c.card(3).is_none());
    assert!(c.activate(3).is_none());
    assert_eq!(c.current_index(), 0);
}

#[test]
fn closing_the_detail_keeps_the_index() {
    let mut c = projects(5);
    c.next(0);
    c.tick(700);
    assert!(c.activate(1).is_some());
    c.close_detail();
    assert_eq!(c.detail(), None);
    assert_eq!(c.current_index(), 1);
}

#[test]
fn layout_follows_the_current_card() {
    let mut c = projects(5);
    c.next(0);
    let center = c.card(1).unwrap();
    assert_eq!(center.offset, 0);
    assert_eq!(center.opacity, 1.0);
    assert!(center.interactive);

    let behind = c.card(0).unwrap();
    assert_eq!(behind.offset, -1);
    assert!(behind.x < 0.0);
    assert!(behind.z_index < center.z_index);
}

#[test]
fn offsets_take_the_short_way_round() {
    let cycler = IndexCycler::new(5);
    assert_eq!(cycler.relative_offset(4), -1);
    assert_eq!(cycler.relative_offset(1), 1);
    let even = IndexCycler::new(4);
    assert_eq!(even.relative_offset(2), 2);
}

#[test]
fn teardown_drops_pending_state() {
    let mut c = projects(5);
    c.on_wheel(Delta::new(30.0, 0.0), 0);
    c.next(0);
    c.activate(1);
    c.teardown();
    let state = c.state();
    assert!(!state.is_transitioning);
    assert_eq!(state.scroll_accumulator, 0.0);
    assert_eq!(c.detail(), None);
}
