use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::primitives::{datetime_to_unix_millis, optional_decimal_to_f64};
use crate::error::{ChartError, ChartResult};
use crate::extensions::moving_average::simple_moving_average;

/// Per-candle overlay values (one slot per trend line, `None` = gap).
pub type Trends = SmallVec<[Option<f64>; 4]>;

/// Minimum number of candles a chart series must hold.
pub const MIN_SERIES_LEN: usize = 3;

/// One OHLCV sample. Every price field is optional; an absent `high`/`low`
/// renders without a wick and an absent `volume` renders without a bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandlePoint {
    pub timestamp: i64,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
    pub volume: Option<f64>,
    #[serde(default)]
    pub trends: Trends,
}

impl CandlePoint {
    /// Builds a candle, rejecting present values that are not finite.
    pub fn new(
        timestamp: i64,
        open: Option<f64>,
        high: Option<f64>,
        low: Option<f64>,
        close: Option<f64>,
        volume: Option<f64>,
    ) -> ChartResult<Self> {
        for (field, value) in [
            ("open", open),
            ("high", high),
            ("low", low),
            ("close", close),
            ("volume", volume),
        ] {
            if value.is_some_and(|v| !v.is_finite()) {
                return Err(ChartError::InvalidData(format!(
                    "candle `{field}` must be finite when present"
                )));
            }
        }

        Ok(Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
            trends: Trends::new(),
        })
    }

    /// Convenience constructor for a fully populated candle.
    pub fn ohlcv(
        timestamp: i64,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> ChartResult<Self> {
        Self::new(
            timestamp,
            Some(open),
            Some(high),
            Some(low),
            Some(close),
            Some(volume),
        )
    }

    /// Converts strongly-typed temporal/decimal input into a candle.
    pub fn from_decimal(
        time: DateTime<Utc>,
        open: Option<Decimal>,
        high: Option<Decimal>,
        low: Option<Decimal>,
        close: Option<Decimal>,
        volume: Option<Decimal>,
    ) -> ChartResult<Self> {
        Self::new(
            datetime_to_unix_millis(time),
            optional_decimal_to_f64(open, "open")?,
            optional_decimal_to_f64(high, "high")?,
            optional_decimal_to_f64(low, "low")?,
            optional_decimal_to_f64(close, "close")?,
            optional_decimal_to_f64(volume, "volume")?,
        )
    }

    #[must_use]
    pub fn with_trends(mut self, trends: impl IntoIterator<Item = Option<f64>>) -> Self {
        self.trends = trends.into_iter().collect();
        self
    }

    /// Highest plotted price: `high`, else the larger of `open`/`close`,
    /// else whichever of the two is present.
    #[must_use]
    pub fn derived_high(&self) -> Option<f64> {
        self.high.or(match (self.open, self.close) {
            (Some(open), Some(close)) => Some(open.max(close)),
            (open, close) => open.or(close),
        })
    }

    /// Lowest plotted price, mirroring [`CandlePoint::derived_high`].
    #[must_use]
    pub fn derived_low(&self) -> Option<f64> {
        self.low.or(match (self.open, self.close) {
            (Some(open), Some(close)) => Some(open.min(close)),
            (open, close) => open.or(close),
        })
    }

    /// `Some(true)` when close >= open; `None` when either side is absent.
    #[must_use]
    pub fn is_bullish(&self) -> Option<bool> {
        match (self.open, self.close) {
            (Some(open), Some(close)) => Some(close >= open),
            _ => None,
        }
    }

    #[must_use]
    pub fn trend(&self, slot: usize) -> Option<f64> {
        self.trends.get(slot).copied().flatten()
    }
}

/// Ordered candle sequence backing a chart. Its length is fixed at
/// construction; only per-candle trends can change afterwards.
///
/// Deserializes from a plain candle array through [`Series::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CandlePoint>", into = "Vec<CandlePoint>")]
pub struct Series {
    candles: Vec<CandlePoint>,
}

impl TryFrom<Vec<CandlePoint>> for Series {
    type Error = ChartError;

    fn try_from(candles: Vec<CandlePoint>) -> ChartResult<Self> {
        Self::new(candles)
    }
}

impl From<Series> for Vec<CandlePoint> {
    fn from(series: Series) -> Self {
        series.candles
    }
}

impl Series {
    pub fn new(candles: Vec<CandlePoint>) -> ChartResult<Self> {
        if candles.len() < MIN_SERIES_LEN {
            return Err(ChartError::SeriesTooShort { len: candles.len() });
        }
        for candle in &candles {
            validate_trends(&candle.trends)?;
        }
        Ok(Self { candles })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.candles.len()
    }

    /// Always `false`; kept for API symmetry with slices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    #[must_use]
    pub fn candles(&self) -> &[CandlePoint] {
        &self.candles
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&CandlePoint> {
        self.candles.get(index)
    }

    /// Replaces every candle's trend vector at once.
    pub fn replace_trends(&mut self, trends: Vec<Trends>) -> ChartResult<()> {
        if trends.len() != self.candles.len() {
            return Err(ChartError::InvalidData(format!(
                "trend rows ({}) must match series length ({})",
                trends.len(),
                self.candles.len()
            )));
        }
        for row in &trends {
            validate_trends(row)?;
        }
        for (candle, row) in self.candles.iter_mut().zip(trends) {
            candle.trends = row;
        }
        Ok(())
    }

    pub fn clear_trends(&mut self) {
        for candle in &mut self.candles {
            candle.trends.clear();
        }
    }

    /// Recomputes trends as one simple moving average of `close` per period,
    /// in the given order. An empty `periods` clears all trends.
    pub fn apply_moving_averages(&mut self, periods: &[usize]) -> ChartResult<()> {
        let columns = periods
            .iter()
            .map(|&period| simple_moving_average(&self.candles, period))
            .collect::<ChartResult<Vec<_>>>()?;

        let rows = (0..self.candles.len())
            .map(|i| columns.iter().map(|column| column[i]).collect())
            .collect();
        self.replace_trends(rows)
    }
}

fn validate_trends(trends: &Trends) -> ChartResult<()> {
    if trends.iter().flatten().any(|value| !value.is_finite()) {
        return Err(ChartError::InvalidData(
            "trend values must be finite when present".to_owned(),
        ));
    }
    Ok(())
}
