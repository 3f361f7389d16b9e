use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{PixelPoint, ViewportBounds, ViewportState};
use crate::error::{ChartError, ChartResult};

/// Zoom factor applied by one scroll "tick" away from the user.
pub const SCROLL_ZOOM_OUT_SCALE: f64 = 0.9;
/// Zoom factor applied by one scroll "tick" toward the user.
pub const SCROLL_ZOOM_IN_SCALE: f64 = 1.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GesturePhase {
    Start,
    Update,
    End,
}

/// Toolkit-agnostic scale/pan gesture event.
///
/// `scale` is cumulative since the gesture started (`1.0` = no zoom) and
/// `focal_point` is the current pointer/touch centroid in local pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GestureEvent {
    pub phase: GesturePhase,
    pub scale: f64,
    pub focal_point: PixelPoint,
}

impl GestureEvent {
    #[must_use]
    pub fn start(focal_point: PixelPoint) -> Self {
        Self {
            phase: GesturePhase::Start,
            scale: 1.0,
            focal_point,
        }
    }

    #[must_use]
    pub fn update(scale: f64, focal_point: PixelPoint) -> Self {
        Self {
            phase: GesturePhase::Update,
            scale,
            focal_point,
        }
    }

    #[must_use]
    pub fn end(focal_point: PixelPoint) -> Self {
        Self {
            phase: GesturePhase::End,
            scale: 1.0,
            focal_point,
        }
    }
}

/// Viewport captured when a gesture starts. Every update is resolved against
/// it rather than against the previous update.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GestureSnapshot {
    pub candle_width: f64,
    pub start_offset: f64,
    pub focal_x: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum GestureState {
    #[default]
    Idle,
    Tracking(GestureSnapshot),
}

/// Drives [`ViewportState`] from pan/zoom gestures and scroll ticks.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GestureController {
    state: GestureState,
}

impl GestureController {
    #[must_use]
    pub fn state(self) -> GestureState {
        self.state
    }

    #[must_use]
    pub fn is_tracking(self) -> bool {
        matches!(self.state, GestureState::Tracking(_))
    }

    /// Dispatches one event. Returns the new candle width when the event
    /// changed the zoom level.
    pub fn handle(
        &mut self,
        event: GestureEvent,
        viewport: &mut ViewportState,
    ) -> ChartResult<Option<f64>> {
        match event.phase {
            GesturePhase::Start => {
                self.start(*viewport, event.focal_point.x)?;
                Ok(None)
            }
            GesturePhase::Update => self.update(viewport, event.scale, event.focal_point.x),
            GesturePhase::End => {
                self.end();
                Ok(None)
            }
        }
    }

    pub fn start(&mut self, viewport: ViewportState, focal_x: f64) -> ChartResult<()> {
        if !focal_x.is_finite() {
            return Err(ChartError::InvalidData(
                "gesture focal point must be finite".to_owned(),
            ));
        }
        self.state = GestureState::Tracking(GestureSnapshot {
            candle_width: viewport.candle_width(),
            start_offset: viewport.start_offset(),
            focal_x,
        });
        trace!(focal_x, "gesture start");
        Ok(())
    }

    pub fn update(
        &mut self,
        viewport: &mut ViewportState,
        scale: f64,
        focal_x: f64,
    ) -> ChartResult<Option<f64>> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(ChartError::InvalidData(
                "gesture scale must be finite and > 0".to_owned(),
            ));
        }
        if !focal_x.is_finite() {
            return Err(ChartError::InvalidData(
                "gesture focal point must be finite".to_owned(),
            ));
        }
        let GestureState::Tracking(snapshot) = self.state else {
            trace!(scale, focal_x, "ignoring gesture update while idle");
            return Ok(None);
        };

        let previous_width = viewport.candle_width();
        let (candle_width, start_offset) =
            resolve_scale_update(snapshot, viewport.bounds(), scale, focal_x);
        viewport.commit(candle_width, start_offset);
        trace!(
            scale,
            focal_x,
            candle_width = viewport.candle_width(),
            start_offset = viewport.start_offset(),
            "gesture update"
        );

        Ok((viewport.candle_width() != previous_width).then_some(viewport.candle_width()))
    }

    pub fn end(&mut self) {
        if self.is_tracking() {
            trace!("gesture end");
        }
        self.state = GestureState::Idle;
    }

    /// One scroll-wheel/trackpad tick: a complete gesture zooming by a fixed
    /// step around `pointer_x`. Positive `delta_y` zooms out.
    pub fn scroll(
        &mut self,
        viewport: &mut ViewportState,
        delta_y: f64,
        pointer_x: f64,
    ) -> ChartResult<Option<f64>> {
        let Some(scale) = resolve_scroll_scale(delta_y)? else {
            return Ok(None);
        };
        self.start(*viewport, pointer_x)?;
        let zoomed = self.update(viewport, scale, pointer_x);
        self.end();
        zoomed
    }
}

/// Maps a scroll delta to the tick scale; `None` for a zero delta.
pub fn resolve_scroll_scale(delta_y: f64) -> ChartResult<Option<f64>> {
    if !delta_y.is_finite() {
        return Err(ChartError::InvalidData(
            "scroll delta must be finite".to_owned(),
        ));
    }
    Ok(if delta_y > 0.0 {
        Some(SCROLL_ZOOM_OUT_SCALE)
    } else if delta_y < 0.0 {
        Some(SCROLL_ZOOM_IN_SCALE)
    } else {
        None
    })
}

/// Resolves `(candle_width, start_offset)` for a cumulative `scale` and the
/// current focal point, keeping the candle under the focal point in place.
#[must_use]
pub fn resolve_scale_update(
    snapshot: GestureSnapshot,
    bounds: ViewportBounds,
    scale: f64,
    focal_x: f64,
) -> (f64, f64) {
    let chart_width = bounds.chart_width();
    let candle_width = bounds.clamp_candle_width(snapshot.candle_width * scale);
    let applied_scale = candle_width / snapshot.candle_width;

    let mut start_offset = snapshot.start_offset * applied_scale;
    // Dragging right (focal point moving right) reveals older candles.
    start_offset += snapshot.focal_x - focal_x;

    let previous_count = chart_width / snapshot.candle_width;
    let current_count = chart_width / candle_width;
    let zoom_adjustment = (current_count - previous_count) * candle_width;
    start_offset -= zoom_adjustment * (focal_x / chart_width);

    (
        candle_width,
        bounds.clamp_start_offset(start_offset, candle_width),
    )
}
