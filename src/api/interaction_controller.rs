use tracing::trace;

use crate::core::{CandlePoint, PixelPoint};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{GestureEvent, GestureState};
use crate::render::Renderer;

use super::ChartEngine;

impl<R: Renderer> ChartEngine<R> {
    #[must_use]
    pub fn gesture_state(&self) -> GestureState {
        self.gestures.state()
    }

    /// Feeds one pan/zoom event into the viewport.
    ///
    /// Returns the new candle width when the zoom level changed; the zoom
    /// callback has already been notified in that case.
    pub fn handle_gesture(&mut self, event: GestureEvent) -> ChartResult<Option<f64>> {
        let zoomed = self.gestures.handle(event, &mut self.viewport_state)?;
        self.notify_zoom(zoomed);
        Ok(zoomed)
    }

    /// One wheel/trackpad tick at `pointer_x`. Positive `delta_y` zooms out.
    pub fn scroll(&mut self, delta_y: f64, pointer_x: f64) -> ChartResult<Option<f64>> {
        let zoomed = self
            .gestures
            .scroll(&mut self.viewport_state, delta_y, pointer_x)?;
        self.notify_zoom(zoomed);
        Ok(zoomed)
    }

    /// Resolves the candle under a tap and notifies the tap callback.
    ///
    /// Taps outside the plotted candles return `Ok(None)`.
    pub fn tap(&mut self, position: PixelPoint) -> ChartResult<Option<CandlePoint>> {
        validate_pointer(position)?;
        let Some(index) = self.series_index_at(position.x)? else {
            trace!(x = position.x, "tap outside candles");
            return Ok(None);
        };
        let Some(candle) = self.series.get(index).cloned() else {
            return Ok(None);
        };
        trace!(index, timestamp = candle.timestamp, "tap");
        if let Some(on_tap) = &self.on_tap {
            on_tap(&candle);
        }
        Ok(Some(candle))
    }

    /// Hover or long-press position; the candle under it is highlighted and
    /// its overlay is drawn on the next render.
    pub fn pointer_move(&mut self, position: PixelPoint) -> ChartResult<()> {
        validate_pointer(position)?;
        self.pointer = Some(position);
        Ok(())
    }

    /// Hover exit or long-press release.
    pub fn pointer_leave(&mut self) {
        self.pointer = None;
    }

    #[must_use]
    pub fn pointer(&self) -> Option<PixelPoint> {
        self.pointer
    }

    /// Series index and candle under the current pointer.
    pub fn selected_candle(&self) -> ChartResult<Option<(usize, &CandlePoint)>> {
        let Some(pointer) = self.pointer else {
            return Ok(None);
        };
        Ok(self
            .series_index_at(pointer.x)?
            .and_then(|index| self.series.get(index).map(|candle| (index, candle))))
    }

    fn series_index_at(&self, x: f64) -> ChartResult<Option<usize>> {
        let params = self.frame_params()?;
        Ok(params
            .mapper()
            .candle_at(x)
            .map(|index| params.range.start + index))
    }

    fn notify_zoom(&self, zoomed: Option<f64>) {
        if let (Some(candle_width), Some(on_zoom)) = (zoomed, &self.on_zoom) {
            on_zoom(candle_width);
        }
    }
}

fn validate_pointer(position: PixelPoint) -> ChartResult<()> {
    if !position.is_finite() {
        return Err(ChartError::InvalidData(
            "pointer position must be finite".to_owned(),
        ));
    }
    Ok(())
}
