use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, trace};

use crate::core::{
    CandlePoint, CoordinateMapper, FrameParams, FrameTransition, PixelPoint, PlotLayout, Series,
    Trends, Viewport, ViewportBounds, ViewportState,
};
use crate::error::{ChartError, ChartResult};
use crate::interaction::GestureController;
use crate::render::Renderer;

use super::frame_builder::CandleFrameBuilder;
use super::label_format::{
    LabelFormatters, OverlayInfoFn, PriceLabelFormatterFn, TimeLabelFormatterFn,
};
use super::validation::{validate_engine_config, validate_style};
use super::{ChartEngineConfig, ChartStyle};

/// Invoked with the candle under a tap.
pub type TapCallbackFn = Arc<dyn Fn(&CandlePoint) + Send + Sync + 'static>;
/// Invoked with the new candle width whenever a gesture changes the zoom.
pub type ZoomCallbackFn = Arc<dyn Fn(f64) + Send + Sync + 'static>;

/// Main orchestration facade consumed by host applications.
///
/// `ChartEngine` owns the series and viewport state, routes gestures into the
/// viewport, and hands each rendered frame to the renderer.
pub struct ChartEngine<R: Renderer> {
    pub(super) renderer: R,
    pub(super) series: Series,
    pub(super) viewport: Viewport,
    pub(super) style: ChartStyle,
    pub(super) layout: PlotLayout,
    pub(super) viewport_state: ViewportState,
    pub(super) gestures: GestureController,
    pub(super) pointer: Option<PixelPoint>,
    pub(super) transition: FrameTransition,
    pub(super) formatters: LabelFormatters,
    pub(super) on_tap: Option<TapCallbackFn>,
    pub(super) on_zoom: Option<ZoomCallbackFn>,
}

impl<R: Renderer> ChartEngine<R> {
    pub fn new(renderer: R, series: Series, config: ChartEngineConfig) -> ChartResult<Self> {
        validate_engine_config(&config)?;
        let layout = resolve_layout(config.viewport, &config.style)?;
        let bounds = ViewportBounds::new(layout.chart_width, series.len())?;
        let viewport_state =
            ViewportState::initialize(bounds, config.initial_visible_candle_count)?;
        debug!(
            series_len = series.len(),
            chart_width = layout.chart_width,
            candle_width = viewport_state.candle_width(),
            start_offset = viewport_state.start_offset(),
            "chart engine initialized"
        );

        Ok(Self {
            renderer,
            series,
            viewport: config.viewport,
            style: config.style,
            layout,
            viewport_state,
            gestures: GestureController::default(),
            pointer: None,
            transition: FrameTransition::new(Duration::from_millis(
                config.transition_duration_ms,
            )),
            formatters: LabelFormatters::default(),
            on_tap: None,
            on_zoom: None,
        })
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Applies a new widget size, re-clamping the current zoom and scroll.
    ///
    /// Returns `true` when the viewport state moved.
    pub fn set_viewport(&mut self, viewport: Viewport) -> ChartResult<bool> {
        let layout = resolve_layout(viewport, &self.style)?;
        let changed = self.relayout(layout)?;
        self.viewport = viewport;
        Ok(changed)
    }

    #[must_use]
    pub fn style(&self) -> &ChartStyle {
        &self.style
    }

    pub fn set_style(&mut self, style: ChartStyle) -> ChartResult<()> {
        validate_style(&style)?;
        let layout = resolve_layout(self.viewport, &style)?;
        self.relayout(layout)?;
        self.style = style;
        Ok(())
    }

    #[must_use]
    pub fn layout(&self) -> PlotLayout {
        self.layout
    }

    #[must_use]
    pub fn viewport_state(&self) -> ViewportState {
        self.viewport_state
    }

    #[must_use]
    pub fn series(&self) -> &Series {
        &self.series
    }

    pub fn replace_trends(&mut self, trends: Vec<Trends>) -> ChartResult<()> {
        self.series.replace_trends(trends)
    }

    pub fn apply_moving_averages(&mut self, periods: &[usize]) -> ChartResult<()> {
        self.series.apply_moving_averages(periods)?;
        debug!(?periods, "applied moving averages");
        Ok(())
    }

    pub fn clear_trends(&mut self) {
        self.series.clear_trends();
    }

    #[must_use]
    pub fn formatters(&self) -> &LabelFormatters {
        &self.formatters
    }

    pub fn set_time_label_formatter(&mut self, formatter: Option<TimeLabelFormatterFn>) {
        self.formatters.time = formatter;
    }

    pub fn set_price_label_formatter(&mut self, formatter: Option<PriceLabelFormatterFn>) {
        self.formatters.price = formatter;
    }

    pub fn set_overlay_info_provider(&mut self, provider: Option<OverlayInfoFn>) {
        self.formatters.overlay = provider;
    }

    pub fn set_on_tap(&mut self, callback: Option<TapCallbackFn>) {
        self.on_tap = callback;
    }

    pub fn set_on_zoom(&mut self, callback: Option<ZoomCallbackFn>) {
        self.on_zoom = callback;
    }

    /// Frame parameters for the current viewport, without any blending.
    pub fn frame_params(&self) -> ChartResult<FrameParams> {
        FrameParams::build(&self.series, self.viewport_state, self.layout, self.pointer)
    }

    pub fn mapper(&self) -> ChartResult<CoordinateMapper> {
        Ok(self.frame_params()?.mapper())
    }

    /// Builds the frame for `now` and hands it to the renderer.
    ///
    /// `now` comes from the host's frame clock; extrema changes blend over the
    /// configured transition duration.
    pub fn render(&mut self, now: Duration) -> ChartResult<()> {
        let target = self.frame_params()?;
        self.transition.retarget(target, now);
        let params = self.transition.sample(now).ok_or_else(|| {
            ChartError::InvalidData("frame transition has no target".to_owned())
        })?;

        let frame = CandleFrameBuilder {
            style: &self.style,
            formatters: &self.formatters,
        }
        .build(self.viewport, &params);
        trace!(
            start = params.range.start,
            end = params.range.end,
            max_price = params.max_price,
            min_price = params.min_price,
            lines = frame.line_count(),
            "render frame"
        );
        self.renderer.render(&frame)
    }

    /// `true` while the last rendered extrema are still blending at `now`.
    #[must_use]
    pub fn is_animating(&self, now: Duration) -> bool {
        self.transition.is_animating(now)
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    fn relayout(&mut self, layout: PlotLayout) -> ChartResult<bool> {
        let bounds = ViewportBounds::new(layout.chart_width, self.series.len())?;
        let changed = self.viewport_state.resize(bounds);
        self.layout = layout;
        if changed {
            debug!(
                chart_width = layout.chart_width,
                candle_width = self.viewport_state.candle_width(),
                start_offset = self.viewport_state.start_offset(),
                "viewport re-clamped"
            );
        }
        Ok(changed)
    }
}

fn resolve_layout(viewport: Viewport, style: &ChartStyle) -> ChartResult<PlotLayout> {
    PlotLayout::new(
        viewport,
        style.price_label_width,
        style.time_label_height,
        style.volume_height_factor,
    )
}
