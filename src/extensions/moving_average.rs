use crate::core::CandlePoint;
use crate::error::{ChartError, ChartResult};

/// Rolling simple moving average of `close`, one slot per candle.
///
/// The first `period` slots stay `None`, and so does every slot whose
/// entering or leaving close is absent. Series shorter than two full periods
/// produce no values at all.
pub fn simple_moving_average(
    candles: &[CandlePoint],
    period: usize,
) -> ChartResult<Vec<Option<f64>>> {
    if period == 0 {
        return Err(ChartError::InvalidData(
            "moving average period must be > 0".to_owned(),
        ));
    }

    let mut out = vec![None; candles.len()];
    if candles.len() < period * 2 {
        return Ok(out);
    }

    let (seed_sum, seed_count) = candles[..period]
        .iter()
        .filter_map(|candle| candle.close)
        .fold((0.0, 0usize), |(sum, count), close| (sum + close, count + 1));
    if seed_count == 0 {
        return Ok(out);
    }

    let window = period as f64;
    let mut average = seed_sum / seed_count as f64;
    for i in period..candles.len() {
        if let (Some(entering), Some(leaving)) = (candles[i].close, candles[i - period].close) {
            average += (entering - leaving) / window;
            out[i] = Some(average);
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::simple_moving_average;
    use crate::core::CandlePoint;

    fn closes(values: &[Option<f64>]) -> Vec<CandlePoint> {
        values
            .iter()
            .enumerate()
            .map(|(i, close)| {
                CandlePoint::new(i as i64, *close, None, None, *close, None).expect("candle")
            })
            .collect()
    }

    #[test]
    fn zero_period_is_rejected() {
        let candles = closes(&[Some(1.0), Some(2.0), Some(3.0)]);
        let err = simple_moving_average(&candles, 0).expect_err("period 0 must fail");
        assert!(format!("{err}").contains("period"));
    }

    #[test]
    fn short_series_yields_only_gaps() {
        let candles = closes(&[Some(1.0), Some(2.0), Some(3.0)]);
        let ma = simple_moving_average(&candles, 2).expect("ma");
        assert_eq!(ma, vec![None, None, None]);
    }

    #[test]
    fn rolling_window_includes_current_close() {
        let candles = closes(&[Some(1.0), Some(2.0), Some(3.0), Some(4.0), Some(5.0)]);
        let ma = simple_moving_average(&candles, 2).expect("ma");
        assert_eq!(ma[..2], [None, None]);
        assert!((ma[2].expect("slot 2") - 2.5).abs() <= 1e-12);
        assert!((ma[3].expect("slot 3") - 3.5).abs() <= 1e-12);
        assert!((ma[4].expect("slot 4") - 4.5).abs() <= 1e-12);
    }

    #[test]
    fn missing_close_leaves_a_gap() {
        let candles = closes(&[Some(1.0), Some(2.0), None, Some(4.0), Some(5.0)]);
        let ma = simple_moving_average(&candles, 2).expect("ma");
        assert_eq!(ma[2], None);
        assert_eq!(ma[4], None);
        assert!(ma[3].is_some());
    }
}
