use crate::core::MIN_SERIES_LEN;
use crate::error::{ChartError, ChartResult};

use super::{ChartEngineConfig, ChartStyle};

pub(super) fn validate_style(style: &ChartStyle) -> ChartResult<()> {
    if !style.volume_height_factor.is_finite() || !(0.0..1.0).contains(&style.volume_height_factor)
    {
        return Err(ChartError::InvalidStyle(
            "volume height factor must be finite and in [0, 1)".to_owned(),
        ));
    }

    for (name, value) in [
        ("price label width", style.price_label_width),
        ("time label height", style.time_label_height),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(ChartError::InvalidStyle(format!(
                "{name} must be finite and >= 0"
            )));
        }
    }

    for (name, value) in [
        ("label font size", style.label_font_size_px),
        ("overlay font size", style.overlay_font_size_px),
    ] {
        if !value.is_finite() || value <= 0.0 {
            return Err(ChartError::InvalidStyle(format!(
                "{name} must be finite and > 0"
            )));
        }
    }

    for color in [
        style.time_label_color,
        style.price_label_color,
        style.overlay_text_color,
        style.price_gain_color,
        style.price_loss_color,
        style.volume_color,
        style.price_grid_line_color,
        style.selection_highlight_color,
        style.overlay_background_color,
    ] {
        color
            .validate()
            .map_err(|err| ChartError::InvalidStyle(err.to_string()))?;
    }

    for (slot, trend) in style.trend_line_styles.iter().enumerate() {
        if !trend.stroke_width.is_finite() || trend.stroke_width <= 0.0 {
            return Err(ChartError::InvalidStyle(format!(
                "trend line {slot} stroke width must be finite and > 0"
            )));
        }
        trend
            .color
            .validate()
            .map_err(|err| ChartError::InvalidStyle(format!("trend line {slot}: {err}")))?;
    }

    Ok(())
}

pub(super) fn validate_engine_config(config: &ChartEngineConfig) -> ChartResult<()> {
    if !config.viewport.is_valid() {
        return Err(ChartError::InvalidViewport {
            width: config.viewport.width,
            height: config.viewport.height,
        });
    }
    if config.initial_visible_candle_count < MIN_SERIES_LEN {
        return Err(ChartError::InvalidVisibleCandleCount {
            count: config.initial_visible_candle_count,
        });
    }
    validate_style(&config.style)
}
