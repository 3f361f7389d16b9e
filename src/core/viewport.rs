use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::candle::MIN_SERIES_LEN;
use crate::error::{ChartError, ChartResult};

/// Zooming in stops once this many candles (or the whole series) fill the
/// chart width.
pub const MIN_ZOOMED_IN_CANDLES: usize = 14;

/// Candle width at which the entire series fits on screen.
#[must_use]
pub fn min_candle_width(chart_width: f64, series_len: usize) -> f64 {
    chart_width / series_len as f64
}

/// Candle width at which [`MIN_ZOOMED_IN_CANDLES`] candles fill the chart.
#[must_use]
pub fn max_candle_width(chart_width: f64, series_len: usize) -> f64 {
    chart_width / MIN_ZOOMED_IN_CANDLES.min(series_len) as f64
}

/// Offset at which the newest candle touches the right edge.
#[must_use]
pub fn max_start_offset(chart_width: f64, candle_width: f64, series_len: usize) -> f64 {
    let visible_count = chart_width / candle_width;
    (candle_width * (series_len as f64 - visible_count)).max(0.0)
}

/// Zoom/scroll limits for one chart width.
///
/// Serialize-only: instances come from [`ViewportBounds::new`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewportBounds {
    chart_width: f64,
    series_len: usize,
}

impl ViewportBounds {
    pub fn new(chart_width: f64, series_len: usize) -> ChartResult<Self> {
        if !chart_width.is_finite() || chart_width <= 0.0 {
            return Err(ChartError::InvalidData(format!(
                "chart width must be finite and > 0, got {chart_width}"
            )));
        }
        if series_len < MIN_SERIES_LEN {
            return Err(ChartError::SeriesTooShort { len: series_len });
        }
        Ok(Self {
            chart_width,
            series_len,
        })
    }

    #[must_use]
    pub fn chart_width(self) -> f64 {
        self.chart_width
    }

    #[must_use]
    pub fn series_len(self) -> usize {
        self.series_len
    }

    #[must_use]
    pub fn min_candle_width(self) -> f64 {
        min_candle_width(self.chart_width, self.series_len)
    }

    #[must_use]
    pub fn max_candle_width(self) -> f64 {
        max_candle_width(self.chart_width, self.series_len)
    }

    #[must_use]
    pub fn max_start_offset(self, candle_width: f64) -> f64 {
        max_start_offset(self.chart_width, candle_width, self.series_len)
    }

    #[must_use]
    pub fn clamp_candle_width(self, candle_width: f64) -> f64 {
        candle_width.clamp(self.min_candle_width(), self.max_candle_width())
    }

    #[must_use]
    pub fn clamp_start_offset(self, start_offset: f64, candle_width: f64) -> f64 {
        start_offset.clamp(0.0, self.max_start_offset(candle_width))
    }
}

/// Candle index window covered by a viewport.
///
/// `end` is exclusive. When `end` is short of the series length, the candle
/// at `end` is still drawn so it can slide in while scrolling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibleRange {
    pub start: usize,
    pub end: usize,
    pub has_lookahead: bool,
}

impl VisibleRange {
    /// Exclusive end including the lookahead candle.
    #[must_use]
    pub fn render_end(self) -> usize {
        if self.has_lookahead {
            self.end + 1
        } else {
            self.end
        }
    }
}

/// Horizontal scale and scroll position.
///
/// `start_offset` is measured along the fully laid out strip where candle `i`
/// begins at `i * candle_width`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewportState {
    candle_width: f64,
    start_offset: f64,
    bounds: ViewportBounds,
}

impl ViewportState {
    /// First layout: shows the newest `initial_visible_count` candles
    /// (or the whole series when shorter), right-aligned.
    pub fn initialize(bounds: ViewportBounds, initial_visible_count: usize) -> ChartResult<Self> {
        if initial_visible_count < MIN_SERIES_LEN {
            return Err(ChartError::InvalidVisibleCandleCount {
                count: initial_visible_count,
            });
        }

        let count = bounds.series_len().min(initial_visible_count);
        let candle_width = bounds.clamp_candle_width(bounds.chart_width() / count as f64);
        let start_offset = bounds.clamp_start_offset(
            (bounds.series_len() - count) as f64 * candle_width,
            candle_width,
        );
        debug!(
            chart_width = bounds.chart_width(),
            candle_width, start_offset, "initialize viewport"
        );

        Ok(Self {
            candle_width,
            start_offset,
            bounds,
        })
    }

    /// Re-clamps the current zoom and scroll into new bounds.
    ///
    /// Returns `true` when the chart width changed.
    pub fn resize(&mut self, bounds: ViewportBounds) -> bool {
        if bounds == self.bounds {
            return false;
        }

        self.bounds = bounds;
        self.candle_width = bounds.clamp_candle_width(self.candle_width);
        self.start_offset = bounds.clamp_start_offset(self.start_offset, self.candle_width);
        debug!(
            chart_width = bounds.chart_width(),
            candle_width = self.candle_width,
            start_offset = self.start_offset,
            "resize viewport"
        );
        true
    }

    #[must_use]
    pub fn candle_width(self) -> f64 {
        self.candle_width
    }

    #[must_use]
    pub fn start_offset(self) -> f64 {
        self.start_offset
    }

    #[must_use]
    pub fn bounds(self) -> ViewportBounds {
        self.bounds
    }

    #[must_use]
    pub fn chart_width(self) -> f64 {
        self.bounds.chart_width()
    }

    /// Applies a new zoom/scroll pair, clamping both into bounds.
    pub(crate) fn commit(&mut self, candle_width: f64, start_offset: f64) {
        self.candle_width = self.bounds.clamp_candle_width(candle_width);
        self.start_offset = self
            .bounds
            .clamp_start_offset(start_offset, self.candle_width);
    }

    #[must_use]
    pub fn is_within_bounds(self) -> bool {
        let bounds = self.bounds;
        self.candle_width >= bounds.min_candle_width()
            && self.candle_width <= bounds.max_candle_width()
            && self.start_offset >= 0.0
            && self.start_offset <= bounds.max_start_offset(self.candle_width)
    }

    #[must_use]
    pub fn visible_range(self) -> VisibleRange {
        let len = self.bounds.series_len();
        let start = ((self.start_offset / self.candle_width).floor() as usize).min(len - 1);
        let count = (self.chart_width() / self.candle_width).ceil() as usize;
        let end = start.saturating_add(count).min(len);
        VisibleRange {
            start,
            end,
            has_lookahead: end < len,
        }
    }
}
