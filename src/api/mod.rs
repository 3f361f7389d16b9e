mod chart_style;
mod engine;
mod engine_config;
mod engine_snapshot;
mod frame_builder;
mod interaction_controller;
mod json_contract;
mod label_format;
mod layout_helpers;
mod validation;

pub use chart_style::{ChartStyle, TrendLineStyle};
pub use engine::{ChartEngine, TapCallbackFn, ZoomCallbackFn};
pub use engine_config::ChartEngineConfig;
pub use engine_snapshot::ChartSnapshot;
pub use json_contract::{CHART_SNAPSHOT_JSON_SCHEMA_V1, ChartSnapshotJsonContractV1};
pub use label_format::{
    LabelFormatters, MONTH_LABEL_THRESHOLD, OverlayInfoFn, PriceLabelFormatterFn,
    TimeLabelFormatterFn, default_overlay_info, default_price_label, default_time_label,
    format_abbreviated, format_percent,
};
