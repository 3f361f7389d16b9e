pub mod candle;
pub mod frame_params;
pub mod mapper;
pub mod primitives;
pub mod transition;
pub mod types;
pub mod viewport;

pub use candle::{CandlePoint, MIN_SERIES_LEN, Series, Trends};
pub use frame_params::{FrameParams, price_extrema, volume_extrema};
pub use mapper::{CoordinateMapper, PlotLayout, VOLUME_MIN_BAR_PX, VOLUME_TOP_GAP_PX};
pub use transition::{DEFAULT_TRANSITION_DURATION, FrameExtrema, FrameTransition, lerp_frame};
pub use types::{PixelPoint, Viewport};
pub use viewport::{
    MIN_ZOOMED_IN_CANDLES, ViewportBounds, ViewportState, VisibleRange, max_candle_width,
    max_start_offset, min_candle_width,
};
