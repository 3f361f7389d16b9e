use serde::{Deserialize, Serialize};

use crate::core::{CandlePoint, PixelPoint, PlotLayout, Viewport, VisibleRange};
use crate::error::ChartResult;
use crate::interaction::GestureState;
use crate::render::Renderer;

use super::ChartEngine;

/// Serializable deterministic state snapshot used by regression tests and
/// debugging tooling.
///
/// Volume extrema are `None` when the visible slice carries no volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSnapshot {
    pub viewport: Viewport,
    pub layout: PlotLayout,
    pub series_len: usize,
    pub candle_width: f64,
    pub start_offset: f64,
    pub visible_range: VisibleRange,
    pub x_shift: f64,
    pub max_price: f64,
    pub min_price: f64,
    pub max_volume: Option<f64>,
    pub min_volume: Option<f64>,
    pub gesture_state: GestureState,
    pub pointer: Option<PixelPoint>,
    pub selected_index: Option<usize>,
    pub selected_candle: Option<CandlePoint>,
}

impl<R: Renderer> ChartEngine<R> {
    /// Captures the unblended state the next render targets.
    pub fn snapshot(&self) -> ChartResult<ChartSnapshot> {
        let params = self.frame_params()?;
        let selected = params
            .pointed_candle()
            .map(|(index, candle)| (params.range.start + index, candle.clone()));
        let finite = |value: f64| value.is_finite().then_some(value);

        Ok(ChartSnapshot {
            viewport: self.viewport,
            layout: self.layout,
            series_len: self.series.len(),
            candle_width: params.candle_width,
            start_offset: params.start_offset,
            visible_range: params.range,
            x_shift: params.x_shift,
            max_price: params.max_price,
            min_price: params.min_price,
            max_volume: finite(params.max_volume),
            min_volume: finite(params.min_volume),
            gesture_state: self.gestures.state(),
            pointer: self.pointer,
            selected_index: selected.as_ref().map(|(index, _)| *index),
            selected_candle: selected.map(|(_, candle)| candle),
        })
    }
}
