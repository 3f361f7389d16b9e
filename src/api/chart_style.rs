use serde::{Deserialize, Serialize};

use crate::render::{Color, LineCap};

/// Stroke used for one trend-line slot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendLineStyle {
    pub color: Color,
    pub stroke_width: f64,
    pub cap: LineCap,
}

impl Default for TrendLineStyle {
    fn default() -> Self {
        Self {
            color: Color::from_argb(0xFF2196F3),
            stroke_width: 2.0,
            cap: LineCap::Round,
        }
    }
}

/// Visual configuration consumed read-only by layout and frame building.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartStyle {
    /// Fraction of the plot height given to volume bars.
    pub volume_height_factor: f64,
    /// Width of the price label column right of the plot.
    pub price_label_width: f64,
    /// Height of the time label row below the plot.
    pub time_label_height: f64,
    pub label_font_size_px: f64,
    pub time_label_color: Color,
    pub price_label_color: Color,
    pub overlay_font_size_px: f64,
    pub overlay_text_color: Color,
    pub price_gain_color: Color,
    pub price_loss_color: Color,
    pub volume_color: Color,
    /// One entry per trend slot; slots past the end use `TrendLineStyle::default()`.
    pub trend_line_styles: Vec<TrendLineStyle>,
    pub price_grid_line_color: Color,
    pub selection_highlight_color: Color,
    pub overlay_background_color: Color,
}

impl Default for ChartStyle {
    fn default() -> Self {
        let grey = Color::from_argb(0xFF9E9E9E);
        Self {
            volume_height_factor: 0.2,
            price_label_width: 48.0,
            time_label_height: 24.0,
            label_font_size_px: 12.0,
            time_label_color: grey,
            price_label_color: grey,
            overlay_font_size_px: 12.0,
            overlay_text_color: Color::rgb(1.0, 1.0, 1.0),
            price_gain_color: Color::from_argb(0xFF4CAF50),
            price_loss_color: Color::from_argb(0xFFF44336),
            volume_color: grey,
            trend_line_styles: Vec::new(),
            price_grid_line_color: grey,
            selection_highlight_color: Color::from_argb(0x33757575),
            overlay_background_color: Color::from_argb(0xEE757575),
        }
    }
}

impl ChartStyle {
    #[must_use]
    pub fn trend_line_style(&self, slot: usize) -> TrendLineStyle {
        self.trend_line_styles
            .get(slot)
            .copied()
            .unwrap_or_default()
    }

    #[must_use]
    pub fn with_trend_line_styles(mut self, styles: Vec<TrendLineStyle>) -> Self {
        self.trend_line_styles = styles;
        self
    }

    #[must_use]
    pub fn with_volume_height_factor(mut self, factor: f64) -> Self {
        self.volume_height_factor = factor;
        self
    }

    #[must_use]
    pub fn with_label_sizes(mut self, price_label_width: f64, time_label_height: f64) -> Self {
        self.price_label_width = price_label_width;
        self.time_label_height = time_label_height;
        self
    }
}
