use serde::{Deserialize, Serialize};

use crate::core::{DEFAULT_TRANSITION_DURATION, Viewport};

use super::ChartStyle;

/// Public engine bootstrap configuration.
///
/// Serializable so hosts can keep chart setup alongside their own settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartEngineConfig {
    pub viewport: Viewport,
    /// Candles shown right-aligned on first layout.
    #[serde(default = "default_initial_visible_candle_count")]
    pub initial_visible_candle_count: usize,
    #[serde(default)]
    pub style: ChartStyle,
    /// Length of the price/volume axis blend between frames.
    #[serde(default = "default_transition_duration_ms")]
    pub transition_duration_ms: u64,
}

impl ChartEngineConfig {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            initial_visible_candle_count: default_initial_visible_candle_count(),
            style: ChartStyle::default(),
            transition_duration_ms: default_transition_duration_ms(),
        }
    }

    #[must_use]
    pub fn with_initial_visible_candle_count(mut self, count: usize) -> Self {
        self.initial_visible_candle_count = count;
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: ChartStyle) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn with_transition_duration_ms(mut self, duration_ms: u64) -> Self {
        self.transition_duration_ms = duration_ms;
        self
    }
}

fn default_initial_visible_candle_count() -> usize {
    90
}

fn default_transition_duration_ms() -> u64 {
    DEFAULT_TRANSITION_DURATION.as_millis() as u64
}
