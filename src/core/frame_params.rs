use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{
    CandlePoint, CoordinateMapper, PixelPoint, PlotLayout, Series, Trends, ViewportState,
    VisibleRange,
};
use crate::error::{ChartError, ChartResult};

/// Everything needed to draw and hit-test one frame.
///
/// `candles` holds the visible slice plus, when available, the next candle so
/// a partially scrolled-in candle is drawn at the right edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameParams {
    pub candles: Vec<CandlePoint>,
    pub range: VisibleRange,
    pub layout: PlotLayout,
    pub candle_width: f64,
    pub start_offset: f64,
    pub x_shift: f64,
    pub max_price: f64,
    pub min_price: f64,
    pub max_volume: f64,
    pub min_volume: f64,
    pub pointer: Option<PixelPoint>,
    pub leading_trends: Option<Trends>,
    pub trailing_trends: Option<Trends>,
}

impl FrameParams {
    pub fn build(
        series: &Series,
        viewport: ViewportState,
        layout: PlotLayout,
        pointer: Option<PixelPoint>,
    ) -> ChartResult<Self> {
        let bounds_len = viewport.bounds().series_len();
        if bounds_len != series.len() {
            return Err(ChartError::InvalidData(format!(
                "viewport covers {bounds_len} candles but series has {}",
                series.len()
            )));
        }

        let range = viewport.visible_range();
        let candles = series.candles()[range.start..range.render_end()].to_vec();

        let candle_width = viewport.candle_width();
        let start_offset = viewport.start_offset();
        let fraction = start_offset - range.start as f64 * candle_width;
        let x_shift = candle_width / 2.0 - fraction;

        let (max_price, min_price) = price_extrema(&candles).ok_or_else(|| {
            ChartError::InvalidData(format!(
                "visible candles {}..{} have no open/close/high/low values",
                range.start,
                range.render_end()
            ))
        })?;
        let (max_volume, min_volume) = volume_extrema(&candles);

        let leading_trends = range
            .start
            .checked_sub(1)
            .and_then(|i| series.get(i))
            .map(|candle| candle.trends.clone());
        let trailing_trends = if range.has_lookahead {
            series.get(range.end + 1).map(|candle| candle.trends.clone())
        } else {
            None
        };

        trace!(
            start = range.start,
            end = range.end,
            lookahead = range.has_lookahead,
            x_shift,
            max_price,
            min_price,
            "build frame params"
        );

        Ok(Self {
            candles,
            range,
            layout,
            candle_width,
            start_offset,
            x_shift,
            max_price,
            min_price,
            max_volume,
            min_volume,
            pointer,
            leading_trends,
            trailing_trends,
        })
    }

    #[must_use]
    pub fn mapper(&self) -> CoordinateMapper {
        CoordinateMapper {
            layout: self.layout,
            candle_width: self.candle_width,
            x_shift: self.x_shift,
            max_price: self.max_price,
            min_price: self.min_price,
            max_volume: self.max_volume,
            min_volume: self.min_volume,
            visible_len: self.candles.len(),
        }
    }

    /// Candle under the pointer, if any, with its index in `candles`.
    #[must_use]
    pub fn pointed_candle(&self) -> Option<(usize, &CandlePoint)> {
        let pointer = self.pointer?;
        let index = self.mapper().candle_at(pointer.x)?;
        self.candles.get(index).map(|candle| (index, candle))
    }
}

/// `(max, min)` of derived highs/lows, `None` when no candle has a price.
#[must_use]
pub fn price_extrema(candles: &[CandlePoint]) -> Option<(f64, f64)> {
    let max = candles
        .iter()
        .filter_map(CandlePoint::derived_high)
        .map(OrderedFloat)
        .max()?;
    let min = candles
        .iter()
        .filter_map(CandlePoint::derived_low)
        .map(OrderedFloat)
        .min()?;
    Some((max.0, min.0))
}

/// `(max, min)` of present volumes. With no volumes at all the result is the
/// `(-inf, +inf)` identity pair.
#[must_use]
pub fn volume_extrema(candles: &[CandlePoint]) -> (f64, f64) {
    candles
        .iter()
        .filter_map(|candle| candle.volume)
        .fold((f64::NEG_INFINITY, f64::INFINITY), |(max, min), volume| {
            (max.max(volume), min.min(volume))
        })
}

#[cfg(test)]
mod tests {
    use super::{price_extrema, volume_extrema};
    use crate::core::CandlePoint;

    #[test]
    fn open_close_stand_in_for_missing_wick() {
        let candle = CandlePoint::new(0, Some(10.0), None, None, Some(12.0), None).expect("candle");
        assert_eq!(price_extrema(&[candle]), Some((12.0, 10.0)));
    }

    #[test]
    fn single_sided_candle_uses_present_value() {
        let candle = CandlePoint::new(0, None, None, None, Some(7.5), None).expect("candle");
        assert_eq!(price_extrema(&[candle]), Some((7.5, 7.5)));
    }

    #[test]
    fn priceless_slice_has_no_extrema() {
        let candle = CandlePoint::new(0, None, None, None, None, Some(3.0)).expect("candle");
        assert_eq!(price_extrema(&[candle]), None);
    }

    #[test]
    fn missing_volumes_keep_identity_sentinels() {
        let candle = CandlePoint::new(0, Some(1.0), None, None, Some(2.0), None).expect("candle");
        assert_eq!(volume_extrema(&[candle]), (f64::NEG_INFINITY, f64::INFINITY));
    }
}
