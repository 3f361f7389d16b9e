use std::sync::{Arc, Mutex};

use approx::assert_relative_eq;
use candle_view::ChartError;
use candle_view::api::{ChartEngine, ChartEngineConfig};
use candle_view::core::{CandlePoint, PixelPoint, Series, Viewport};
use candle_view::interaction::{GestureEvent, GestureState};
use candle_view::render::NullRenderer;

fn build_engine(len: usize) -> ChartEngine<NullRenderer> {
    let candles = (0..len)
        .map(|i| {
            let base = 100.0 + (i % 7) as f64;
            let timestamp = i as i64 * 86_400_000;
            CandlePoint::ohlcv(timestamp, base, base + 3.0, base - 3.0, base + 1.0, 10.0)
                .expect("valid candle")
        })
        .collect();
    let series = Series::new(candles).expect("valid series");
    let config = ChartEngineConfig::new(Viewport::new(948, 524));
    ChartEngine::new(NullRenderer::default(), series, config).expect("engine init")
}

fn focal(x: f64) -> PixelPoint {
    PixelPoint::new(x, 200.0)
}

#[test]
fn scroll_tick_zooms_out_around_pointer_and_clamps_offset() {
    let mut engine = build_engine(200);
    let zoomed = engine.scroll(120.0, 450.0).expect("scroll");

    let state = engine.viewport_state();
    assert_relative_eq!(zoomed.expect("zoom changed"), 9.0);
    assert_relative_eq!(state.candle_width(), 9.0);
    // 1100 * 0.9 - (100 - 90) * 9 * 0.5 = 945, then clamped to 9 * (200 - 100).
    assert_relative_eq!(state.start_offset(), 900.0);
    assert!(state.is_within_bounds());
    assert_eq!(engine.gesture_state(), GestureState::Idle);
}

#[test]
fn negative_scroll_delta_zooms_in() {
    let mut engine = build_engine(200);
    engine.scroll(-40.0, 450.0).expect("scroll");
    assert_relative_eq!(engine.viewport_state().candle_width(), 11.0, epsilon = 1e-9);
}

#[test]
fn zero_scroll_delta_is_ignored() {
    let mut engine = build_engine(200);
    let before = engine.viewport_state();
    assert_eq!(engine.scroll(0.0, 450.0).expect("scroll"), None);
    assert_eq!(engine.viewport_state(), before);
}

#[test]
fn dragging_right_reveals_older_candles() {
    let mut engine = build_engine(200);
    engine
        .handle_gesture(GestureEvent::start(focal(400.0)))
        .expect("start");
    let zoomed = engine
        .handle_gesture(GestureEvent::update(1.0, focal(500.0)))
        .expect("update");

    assert_eq!(zoomed, None);
    assert_relative_eq!(engine.viewport_state().start_offset(), 1_000.0);
    assert_eq!(engine.viewport_state().visible_range().start, 100);
}

#[test]
fn dragging_left_at_newest_edge_stays_clamped() {
    let mut engine = build_engine(200);
    engine
        .handle_gesture(GestureEvent::start(focal(400.0)))
        .expect("start");
    engine
        .handle_gesture(GestureEvent::update(1.0, focal(100.0)))
        .expect("update");

    assert_relative_eq!(engine.viewport_state().start_offset(), 1_100.0);
}

#[test]
fn updates_are_cumulative_from_gesture_start() {
    let mut engine = build_engine(200);
    engine
        .handle_gesture(GestureEvent::start(focal(400.0)))
        .expect("start");
    engine
        .handle_gesture(GestureEvent::update(1.0, focal(450.0)))
        .expect("update");
    engine
        .handle_gesture(GestureEvent::update(1.0, focal(480.0)))
        .expect("update");

    assert_relative_eq!(engine.viewport_state().start_offset(), 1_020.0);
    assert!(matches!(engine.gesture_state(), GestureState::Tracking(_)));

    engine
        .handle_gesture(GestureEvent::end(focal(480.0)))
        .expect("end");
    assert_eq!(engine.gesture_state(), GestureState::Idle);
}

#[test]
fn pinch_is_clamped_to_zoom_limits() {
    let mut engine = build_engine(200);
    engine
        .handle_gesture(GestureEvent::start(focal(450.0)))
        .expect("start");
    engine
        .handle_gesture(GestureEvent::update(50.0, focal(450.0)))
        .expect("update");
    assert_relative_eq!(engine.viewport_state().candle_width(), 900.0 / 14.0);
    assert!(engine.viewport_state().is_within_bounds());

    engine
        .handle_gesture(GestureEvent::update(0.01, focal(450.0)))
        .expect("update");
    assert_relative_eq!(engine.viewport_state().candle_width(), 4.5);
    assert_eq!(engine.viewport_state().start_offset(), 0.0);
}

#[test]
fn zoom_callback_fires_only_when_width_changes() {
    let mut engine = build_engine(200);
    let widths = Arc::new(Mutex::new(Vec::<f64>::new()));
    let sink = Arc::clone(&widths);
    engine.set_on_zoom(Some(Arc::new(move |width: f64| {
        sink.lock().expect("lock").push(width);
    })));

    engine
        .handle_gesture(GestureEvent::start(focal(450.0)))
        .expect("start");
    engine
        .handle_gesture(GestureEvent::update(1.0, focal(460.0)))
        .expect("pan only");
    engine
        .handle_gesture(GestureEvent::update(2.0, focal(460.0)))
        .expect("zoom");
    engine
        .handle_gesture(GestureEvent::update(2.0, focal(470.0)))
        .expect("same zoom");
    engine
        .handle_gesture(GestureEvent::end(focal(470.0)))
        .expect("end");

    let widths = widths.lock().expect("lock");
    assert_eq!(widths.len(), 1);
    assert_relative_eq!(widths[0], 20.0);
}

#[test]
fn update_while_idle_is_ignored() {
    let mut engine = build_engine(200);
    let before = engine.viewport_state();
    let zoomed = engine
        .handle_gesture(GestureEvent::update(2.0, focal(300.0)))
        .expect("ignored");

    assert_eq!(zoomed, None);
    assert_eq!(engine.viewport_state(), before);
}

#[test]
fn invalid_gesture_values_are_rejected_without_mutation() {
    let mut engine = build_engine(200);
    engine
        .handle_gesture(GestureEvent::start(focal(450.0)))
        .expect("start");
    let before = engine.viewport_state();

    for event in [
        GestureEvent::update(0.0, focal(450.0)),
        GestureEvent::update(f64::NAN, focal(450.0)),
        GestureEvent::update(1.0, focal(f64::INFINITY)),
    ] {
        let err = engine.handle_gesture(event).expect_err("invalid update");
        assert!(matches!(err, ChartError::InvalidData(_)));
    }
    assert_eq!(engine.viewport_state(), before);
    assert!(engine.scroll(f64::NAN, 450.0).is_err());
}
