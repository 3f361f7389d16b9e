use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};

/// Gap kept between the price band and the tallest volume bar.
pub const VOLUME_TOP_GAP_PX: f64 = 12.0;
/// Height of the bar drawn for the smallest visible volume.
pub const VOLUME_MIN_BAR_PX: f64 = 2.0;

/// Pixel bands of one chart frame.
///
/// The plot spans `chart_width x chart_height`; the price label column sits to
/// its right and the time label row below it. Inside the plot the price band
/// is on top and the volume band below.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotLayout {
    pub width: f64,
    pub height: f64,
    pub chart_width: f64,
    pub chart_height: f64,
    pub price_height: f64,
    pub volume_height: f64,
}

impl PlotLayout {
    pub fn new(
        viewport: Viewport,
        price_label_width: f64,
        time_label_height: f64,
        volume_height_factor: f64,
    ) -> ChartResult<Self> {
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }

        let width = f64::from(viewport.width);
        let height = f64::from(viewport.height);
        let chart_width = width - price_label_width;
        let chart_height = height - time_label_height;
        if chart_width <= 0.0 || chart_height <= 0.0 {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }

        let volume_height = chart_height * volume_height_factor;
        Ok(Self {
            width,
            height,
            chart_width,
            chart_height,
            price_height: chart_height - volume_height,
            volume_height,
        })
    }
}

/// Data-to-pixel mapping for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordinateMapper {
    pub layout: PlotLayout,
    pub candle_width: f64,
    pub x_shift: f64,
    pub max_price: f64,
    pub min_price: f64,
    pub max_volume: f64,
    pub min_volume: f64,
    pub visible_len: usize,
}

impl CoordinateMapper {
    /// Higher prices map to smaller `y`. A flat price range maps to the
    /// middle of the price band.
    #[must_use]
    pub fn price_to_y(&self, price: f64) -> f64 {
        let span = self.max_price - self.min_price;
        if span == 0.0 || !span.is_finite() {
            return self.layout.price_height / 2.0;
        }
        self.layout.price_height * (self.max_price - price) / span
    }

    /// Inverse of [`CoordinateMapper::price_to_y`].
    ///
    /// Returns `None` for a flat price range, where every price shares one `y`.
    #[must_use]
    pub fn y_to_price(&self, y: f64) -> Option<f64> {
        let span = self.max_price - self.min_price;
        if span == 0.0 || !span.is_finite() || self.layout.price_height <= 0.0 {
            return None;
        }
        Some(self.max_price - y / self.layout.price_height * span)
    }

    /// Top of the volume bar for `volume`.
    ///
    /// A flat (or empty) volume range draws every bar to the middle of the
    /// volume band.
    #[must_use]
    pub fn volume_to_y(&self, volume: f64) -> f64 {
        let layout = self.layout;
        let span = self.max_volume - self.min_volume;
        if span <= 0.0 || !span.is_finite() {
            return layout.price_height + layout.volume_height / 2.0;
        }

        let px_per_unit = (layout.volume_height - VOLUME_MIN_BAR_PX - VOLUME_TOP_GAP_PX) / span;
        let bar = (volume - self.min_volume) * px_per_unit;
        layout.price_height + layout.volume_height - VOLUME_MIN_BAR_PX - bar
    }

    /// Center `x` of the `index`-th visible candle.
    #[must_use]
    pub fn index_to_center_x(&self, index: usize) -> f64 {
        index as f64 * self.candle_width + self.x_shift
    }

    /// Visible candle index whose horizontal span contains `x`.
    ///
    /// May be negative or past the visible slice; see
    /// [`CoordinateMapper::candle_at`] for a bounds-checked lookup.
    #[must_use]
    pub fn x_to_index(&self, x: f64) -> i64 {
        ((x - self.x_shift + self.candle_width / 2.0) / self.candle_width).floor() as i64
    }

    #[must_use]
    pub fn candle_at(&self, x: f64) -> Option<usize> {
        if !x.is_finite() || x < 0.0 || x > self.layout.chart_width {
            return None;
        }
        usize::try_from(self.x_to_index(x))
            .ok()
            .filter(|&index| index < self.visible_len)
    }
}
