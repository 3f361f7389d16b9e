use crate::core::{CandlePoint, CoordinateMapper, FrameParams, Viewport};
use crate::render::{
    Color, LayerKind, LinePrimitive, RectPrimitive, RenderFrame, TextHAlign, TextPrimitive,
};

use super::ChartStyle;
use super::label_format::LabelFormatters;
use super::layout_helpers::{
    OVERLAY_CORNER_RADIUS_PX, OVERLAY_PADDING_PX, OVERLAY_ROW_SPACING, PRICE_LABEL_GAP_PX,
    TIME_LABEL_SPACING_PX, estimate_label_text_width_px, resolve_overlay_origin,
};

/// Price grid lines at these fractions of the visible price range.
const PRICE_GRID_FRACTIONS: [f64; 5] = [0.0, 0.25, 0.5, 0.75, 1.0];
const PRICE_GRID_STROKE_PX: f64 = 0.5;

/// Turns sampled [`FrameParams`] into draw primitives.
pub(super) struct CandleFrameBuilder<'a> {
    pub(super) style: &'a ChartStyle,
    pub(super) formatters: &'a LabelFormatters,
}

impl CandleFrameBuilder<'_> {
    pub(super) fn build(&self, viewport: Viewport, params: &FrameParams) -> RenderFrame {
        let layout = params.layout;
        let clip = RectPrimitive::new(
            0.0,
            0.0,
            layout.chart_width,
            layout.chart_height,
            Color::rgba(0.0, 0.0, 0.0, 0.0),
        );
        let mut frame = RenderFrame::new(viewport, clip);
        let mapper = params.mapper();

        self.push_price_grid(&mut frame, &mapper, params);
        for (index, candle) in params.candles.iter().enumerate() {
            self.push_candle(&mut frame, &mapper, index, candle);
            self.push_trend_segments(&mut frame, &mapper, params, index);
        }
        self.push_time_labels(&mut frame, &mapper, params);
        if let Some((index, candle)) = params.pointed_candle() {
            self.push_selection(&mut frame, &mapper, index);
            self.push_overlay(&mut frame, params, candle);
        }
        frame
    }

    fn push_price_grid(
        &self,
        frame: &mut RenderFrame,
        mapper: &CoordinateMapper,
        params: &FrameParams,
    ) {
        let style = self.style;
        let font = style.label_font_size_px;
        for fraction in PRICE_GRID_FRACTIONS {
            let price = params.min_price + (params.max_price - params.min_price) * fraction;
            let y = mapper.price_to_y(price);
            frame.push_line(
                LayerKind::Grid,
                LinePrimitive::new(
                    0.0,
                    y,
                    params.layout.chart_width,
                    y,
                    PRICE_GRID_STROKE_PX,
                    style.price_grid_line_color,
                ),
            );
            let label = self.formatters.price_label(price);
            if label.is_empty() {
                continue;
            }
            frame.push_text(
                LayerKind::Axis,
                TextPrimitive::new(
                    label,
                    params.layout.chart_width + PRICE_LABEL_GAP_PX,
                    y - font / 2.0,
                    font,
                    style.price_label_color,
                    TextHAlign::Left,
                ),
            );
        }
    }

    fn push_candle(
        &self,
        frame: &mut RenderFrame,
        mapper: &CoordinateMapper,
        index: usize,
        candle: &CandlePoint,
    ) {
        let style = self.style;
        let x = mapper.index_to_center_x(index);
        let body_width = (mapper.candle_width * 0.8).max(0.8);
        let wick_width = (mapper.candle_width * 0.2).max(0.2);

        if let (Some(open), Some(close)) = (candle.open, candle.close) {
            let color = if open > close {
                style.price_loss_color
            } else {
                style.price_gain_color
            };
            frame.push_line(
                LayerKind::Candles,
                LinePrimitive::new(
                    x,
                    mapper.price_to_y(open),
                    x,
                    mapper.price_to_y(close),
                    body_width,
                    color,
                ),
            );
            if let (Some(high), Some(low)) = (candle.high, candle.low) {
                frame.push_line(
                    LayerKind::Candles,
                    LinePrimitive::new(
                        x,
                        mapper.price_to_y(high),
                        x,
                        mapper.price_to_y(low),
                        wick_width,
                        color,
                    ),
                );
            }
        }

        if let Some(volume) = candle.volume {
            frame.push_line(
                LayerKind::Volume,
                LinePrimitive::new(
                    x,
                    mapper.layout.chart_height,
                    x,
                    mapper.volume_to_y(volume),
                    body_width,
                    style.volume_color,
                ),
            );
        }
    }

    fn push_trend_segments(
        &self,
        frame: &mut RenderFrame,
        mapper: &CoordinateMapper,
        params: &FrameParams,
        index: usize,
    ) {
        let candle = &params.candles[index];
        let x = mapper.index_to_center_x(index);
        let previous_x = x - mapper.candle_width;
        let next_x = x + mapper.candle_width;
        let is_last = index + 1 == params.candles.len();

        for slot in 0..candle.trends.len() {
            let Some(value) = candle.trend(slot) else {
                continue;
            };
            let trend_style = self.style.trend_line_style(slot);
            let segment = |x1: f64, v1: f64, x2: f64, v2: f64| {
                LinePrimitive::new(
                    x1,
                    mapper.price_to_y(v1),
                    x2,
                    mapper.price_to_y(v2),
                    trend_style.stroke_width,
                    trend_style.color,
                )
                .with_cap(trend_style.cap)
            };

            // The first candle connects to the last off-screen value.
            let previous = match index.checked_sub(1) {
                Some(prev) => params.candles[prev].trend(slot),
                None => params
                    .leading_trends
                    .as_ref()
                    .and_then(|trends| trends.get(slot).copied().flatten()),
            };
            if let Some(previous) = previous {
                frame.push_line(LayerKind::Trends, segment(previous_x, previous, x, value));
            }

            if is_last {
                let trailing = params
                    .trailing_trends
                    .as_ref()
                    .and_then(|trends| trends.get(slot).copied().flatten());
                if let Some(next) = trailing {
                    frame.push_line(LayerKind::Trends, segment(x, value, next_x, next));
                }
            }
        }
    }

    fn push_time_labels(
        &self,
        frame: &mut RenderFrame,
        mapper: &CoordinateMapper,
        params: &FrameParams,
    ) {
        let style = self.style;
        let layout = params.layout;
        let label_count = (layout.chart_width / TIME_LABEL_SPACING_PX).floor() as usize;
        let gap = 1.0 / (label_count + 1) as f64;
        let font = style.label_font_size_px;
        let y = layout.chart_height + (style.time_label_height - font).max(0.0);

        for slot in 1..=label_count {
            let x = slot as f64 * gap * layout.chart_width;
            let Some(index) = mapper.candle_at(x) else {
                continue;
            };
            let label = self
                .formatters
                .time_label(params.candles[index].timestamp, params.candles.len());
            if label.is_empty() {
                continue;
            }
            frame.push_text(
                LayerKind::Axis,
                TextPrimitive::new(label, x, y, font, style.time_label_color, TextHAlign::Center),
            );
        }
    }

    fn push_selection(&self, frame: &mut RenderFrame, mapper: &CoordinateMapper, index: usize) {
        let x = mapper.index_to_center_x(index);
        frame.push_line(
            LayerKind::Selection,
            LinePrimitive::new(
                x,
                0.0,
                x,
                mapper.layout.chart_height,
                (mapper.candle_width * 0.88).max(1.0),
                self.style.selection_highlight_color,
            ),
        );
    }

    fn push_overlay(&self, frame: &mut RenderFrame, params: &FrameParams, candle: &CandlePoint) {
        let Some(pointer) = params.pointer else {
            return;
        };
        let info = self.formatters.overlay_info(candle);
        if info.is_empty() {
            return;
        }

        let style = self.style;
        let font = style.overlay_font_size_px;
        let label_width = widest_text(info.keys(), font);
        let value_width = widest_text(info.values(), font);
        let row_height = font * OVERLAY_ROW_SPACING;
        let panel_width = label_width + value_width + OVERLAY_PADDING_PX * 3.0;
        let panel_height = row_height * info.len() as f64 + OVERLAY_PADDING_PX * 2.0;

        let (left, top) = resolve_overlay_origin(
            pointer.x,
            pointer.y,
            panel_width,
            panel_height,
            params.layout.width,
        );
        frame.push_rect(
            LayerKind::Overlay,
            RectPrimitive::new(
                left,
                top,
                panel_width,
                panel_height,
                style.overlay_background_color,
            )
            .with_corner_radius(OVERLAY_CORNER_RADIUS_PX),
        );

        for (row, (label, value)) in info.iter().enumerate() {
            let y = top + OVERLAY_PADDING_PX + row as f64 * row_height;
            if !label.is_empty() {
                frame.push_text(
                    LayerKind::Overlay,
                    TextPrimitive::new(
                        label.as_str(),
                        left + OVERLAY_PADDING_PX,
                        y,
                        font,
                        style.overlay_text_color,
                        TextHAlign::Left,
                    ),
                );
            }
            if !value.is_empty() {
                frame.push_text(
                    LayerKind::Overlay,
                    TextPrimitive::new(
                        value.as_str(),
                        left + panel_width - OVERLAY_PADDING_PX,
                        y,
                        font,
                        style.overlay_text_color,
                        TextHAlign::Right,
                    ),
                );
            }
        }
    }
}

fn widest_text<'s>(texts: impl Iterator<Item = &'s String>, font_size_px: f64) -> f64 {
    texts
        .map(|text| estimate_label_text_width_px(text, font_size_px))
        .fold(0.0, f64::max)
}
