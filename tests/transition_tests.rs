use std::time::Duration;

use approx::assert_relative_eq;
use candle_view::core::{
    CandlePoint, FrameParams, FrameTransition, PixelPoint, PlotLayout, Series, Viewport,
    ViewportBounds, ViewportState, lerp_frame,
};

fn base_params() -> FrameParams {
    let candles = (0..30)
        .map(|i| {
            let base = 100.0 + i as f64;
            CandlePoint::ohlcv(i, base, base + 1.0, base - 1.0, base, 1_000.0).expect("candle")
        })
        .collect();
    let series = Series::new(candles).expect("series");
    let layout = PlotLayout::new(Viewport::new(948, 524), 48.0, 24.0, 0.2).expect("layout");
    let bounds = ViewportBounds::new(layout.chart_width, series.len()).expect("bounds");
    let state = ViewportState::initialize(bounds, 20).expect("initialize");
    FrameParams::build(&series, state, layout, None).expect("frame params")
}

fn with_max_price(params: &FrameParams, max_price: f64) -> FrameParams {
    FrameParams {
        max_price,
        ..params.clone()
    }
}

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

#[test]
fn lerp_frame_blends_extrema_and_snaps_discrete_fields() {
    let prev = base_params();
    let next = FrameParams {
        max_price: prev.max_price + 100.0,
        min_price: prev.min_price - 20.0,
        pointer: Some(PixelPoint::new(10.0, 10.0)),
        ..prev.clone()
    };

    let mid = lerp_frame(&prev, &next, 0.25);
    assert_relative_eq!(mid.max_price, prev.max_price + 25.0);
    assert_relative_eq!(mid.min_price, prev.min_price - 5.0);
    assert_eq!(mid.pointer, next.pointer);
    assert_eq!(mid.candles, next.candles);

    assert_eq!(lerp_frame(&prev, &next, 1.0), next);
}

#[test]
fn infinite_volume_sentinels_snap_to_target() {
    let prev = FrameParams {
        max_volume: f64::NEG_INFINITY,
        min_volume: f64::INFINITY,
        ..base_params()
    };
    let next = base_params();

    let mid = lerp_frame(&prev, &next, 0.5);
    assert_eq!(mid.max_volume, next.max_volume);
    assert_eq!(mid.min_volume, next.min_volume);
}

#[test]
fn volume_sentinel_change_alone_does_not_animate() {
    let with_volume = base_params();
    let without_volume = FrameParams {
        max_volume: f64::NEG_INFINITY,
        min_volume: f64::INFINITY,
        ..with_volume.clone()
    };
    let mut transition = FrameTransition::new(ms(100));

    transition.retarget(without_volume, ms(0));
    transition.retarget(with_volume.clone(), ms(10));
    assert!(!transition.is_animating(ms(10)));
    assert_eq!(transition.sample(ms(10)), Some(with_volume));
}

#[test]
fn first_target_is_shown_without_animation() {
    let params = base_params();
    let mut transition = FrameTransition::default();
    assert!(transition.sample(ms(0)).is_none());

    transition.retarget(params.clone(), ms(0));
    assert_eq!(transition.sample(ms(0)), Some(params));
    assert!(!transition.is_animating(ms(100)));
}

#[test]
fn new_extrema_blend_linearly_over_duration() {
    let a = base_params();
    let b = with_max_price(&a, a.max_price + 100.0);
    let mut transition = FrameTransition::new(ms(100));

    transition.retarget(a.clone(), ms(0));
    transition.retarget(b.clone(), ms(10));
    assert!(transition.is_animating(ms(10)));

    let halfway = transition.sample(ms(60)).expect("sample");
    assert_relative_eq!(halfway.max_price, a.max_price + 50.0, epsilon = 1e-9);
    assert_relative_eq!(halfway.min_price, a.min_price);

    let done = transition.sample(ms(110)).expect("sample");
    assert_eq!(done, b);
    assert!(!transition.is_animating(ms(110)));
}

#[test]
fn retarget_mid_flight_restarts_from_on_screen_values() {
    let a = base_params();
    let b = with_max_price(&a, a.max_price + 100.0);
    let c = with_max_price(&a, a.max_price - 50.0);
    let mut transition = FrameTransition::new(ms(100));

    transition.retarget(a.clone(), ms(0));
    transition.retarget(b, ms(0));
    transition.retarget(c.clone(), ms(50));

    // Restarted at a + 50 and heading to a - 50.
    let start = transition.sample(ms(50)).expect("sample");
    assert_relative_eq!(start.max_price, a.max_price + 50.0, epsilon = 1e-9);
    let halfway = transition.sample(ms(100)).expect("sample");
    assert_relative_eq!(halfway.max_price, a.max_price, epsilon = 1e-9);
    assert_eq!(transition.sample(ms(150)), Some(c));
}

#[test]
fn same_extrema_target_does_not_restart_blend() {
    let a = base_params();
    let b = with_max_price(&a, a.max_price + 100.0);
    let b_with_pointer = FrameParams {
        pointer: Some(PixelPoint::new(40.0, 40.0)),
        ..b.clone()
    };
    let mut transition = FrameTransition::new(ms(100));

    transition.retarget(a.clone(), ms(0));
    transition.retarget(b, ms(0));
    transition.retarget(b_with_pointer, ms(50));

    let sample = transition.sample(ms(75)).expect("sample");
    assert_relative_eq!(sample.max_price, a.max_price + 75.0, epsilon = 1e-9);
    assert_eq!(sample.pointer, Some(PixelPoint::new(40.0, 40.0)));
}

#[test]
fn zero_duration_snaps_immediately() {
    let a = base_params();
    let b = with_max_price(&a, a.max_price + 100.0);
    let mut transition = FrameTransition::new(Duration::ZERO);

    transition.retarget(a, ms(0));
    transition.retarget(b.clone(), ms(5));
    assert_eq!(transition.sample(ms(5)), Some(b));
}
