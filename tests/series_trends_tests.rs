use approx::assert_relative_eq;
use candle_view::ChartError;
use candle_view::core::{CandlePoint, Series, Trends};
use candle_view::extensions::simple_moving_average;
use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use smallvec::smallvec;

fn closes(values: &[f64]) -> Vec<CandlePoint> {
    values
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            CandlePoint::new(i as i64, Some(close), None, None, Some(close), Some(1.0))
                .expect("candle")
        })
        .collect()
}

#[test]
fn decimal_input_converts_to_candle() {
    let time = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).single().expect("time");
    let candle = CandlePoint::from_decimal(
        time,
        Some(Decimal::new(10_125, 2)),
        Some(Decimal::new(10_300, 2)),
        None,
        Some(Decimal::new(10_250, 2)),
        None,
    )
    .expect("decimal candle");

    assert_eq!(candle.timestamp, time.timestamp_millis());
    assert_relative_eq!(candle.open.expect("open"), 101.25);
    assert_relative_eq!(candle.high.expect("high"), 103.0);
    assert_eq!(candle.low, None);
    assert_eq!(candle.is_bullish(), Some(true));
}

#[test]
fn non_finite_values_are_rejected() {
    let err = CandlePoint::new(0, Some(f64::NAN), None, None, Some(1.0), None)
        .expect_err("nan open");
    assert!(matches!(err, ChartError::InvalidData(_)));

    let with_bad_trend = CandlePoint::ohlcv(0, 1.0, 2.0, 0.5, 1.5, 3.0)
        .expect("candle")
        .with_trends([Some(f64::INFINITY)]);
    let mut candles = closes(&[1.0, 2.0]);
    candles.push(with_bad_trend);
    assert!(matches!(Series::new(candles), Err(ChartError::InvalidData(_))));
}

#[test]
fn moving_average_skips_first_period_and_rolls() {
    let candles = closes(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    let average = simple_moving_average(&candles, 3).expect("sma");

    assert_eq!(&average[..3], &[None, None, None]);
    assert_relative_eq!(average[3].expect("sma 3"), 3.0);
    assert_relative_eq!(average[4].expect("sma 4"), 4.0);
    assert_relative_eq!(average[5].expect("sma 5"), 5.0);
}

#[test]
fn moving_average_needs_two_full_periods() {
    let candles = closes(&[1.0, 2.0, 3.0, 4.0, 5.0]);
    let average = simple_moving_average(&candles, 3).expect("sma");
    assert!(average.iter().all(Option::is_none));
}

#[test]
fn apply_moving_averages_fills_one_slot_per_period() {
    let values: Vec<f64> = (0..20).map(f64::from).collect();
    let mut series = Series::new(closes(&values)).expect("series");
    series.apply_moving_averages(&[2, 5]).expect("apply");

    let last = series.get(19).expect("last candle");
    assert_eq!(last.trends.len(), 2);
    assert_relative_eq!(last.trend(0).expect("ma 2"), 18.5);
    assert_relative_eq!(last.trend(1).expect("ma 5"), 17.0);
    assert_eq!(series.get(3).expect("early candle").trend(1), None);

    series.apply_moving_averages(&[]).expect("clear");
    assert!(series.candles().iter().all(|candle| candle.trends.is_empty()));
}

#[test]
fn replace_trends_requires_one_row_per_candle() {
    let mut series = Series::new(closes(&[1.0, 2.0, 3.0])).expect("series");
    let rows: Vec<Trends> = vec![smallvec![Some(1.0)], smallvec![None], smallvec![Some(3.0)]];
    series.replace_trends(rows).expect("replace");
    assert_eq!(series.get(1).expect("candle").trend(0), None);
    assert_eq!(series.get(2).expect("candle").trend(0), Some(3.0));

    let err = series
        .replace_trends(vec![smallvec![Some(1.0)]])
        .expect_err("length mismatch");
    assert!(matches!(err, ChartError::InvalidData(_)));

    series.clear_trends();
    assert!(series.get(0).expect("candle").trends.is_empty());
}

#[test]
fn deserialized_series_is_validated() {
    let too_short = r#"[{"timestamp":0,"open":1.0,"close":2.0}]"#;
    assert!(serde_json::from_str::<Series>(too_short).is_err());

    let series = Series::new(closes(&[1.0, 2.0, 3.0])).expect("series");
    let json = serde_json::to_string(&series).expect("serialize");
    assert!(json.starts_with('['));
    let restored: Series = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(restored, series);
}
