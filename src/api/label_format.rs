use std::sync::Arc;

use indexmap::IndexMap;

use crate::core::CandlePoint;
use crate::core::primitives::unix_millis_to_datetime;

/// `(timestamp_ms, visible_candle_count) -> label`.
pub type TimeLabelFormatterFn = Arc<dyn Fn(i64, usize) -> String + Send + Sync + 'static>;
pub type PriceLabelFormatterFn = Arc<dyn Fn(f64) -> String + Send + Sync + 'static>;
/// Ordered `label -> value` rows shown in the selection overlay.
pub type OverlayInfoFn =
    Arc<dyn Fn(&CandlePoint) -> IndexMap<String, String> + Send + Sync + 'static>;

/// Above this many visible candles time labels switch from `MM-DD` to `YYYY-MM`.
pub const MONTH_LABEL_THRESHOLD: usize = 20;

const ABBREVIATION_SUFFIXES: [&str; 5] = ["K", "M", "B", "T", "Q"];
const PLACEHOLDER: &str = "-";

/// `YYYY-MM` when more than [`MONTH_LABEL_THRESHOLD`] candles are visible,
/// `MM-DD` otherwise. Timestamps are rendered in UTC.
#[must_use]
pub fn default_time_label(timestamp_ms: i64, visible_count: usize) -> String {
    let Some(time) = unix_millis_to_datetime(timestamp_ms) else {
        return PLACEHOLDER.to_owned();
    };
    if visible_count > MONTH_LABEL_THRESHOLD {
        time.format("%Y-%m").to_string()
    } else {
        time.format("%m-%d").to_string()
    }
}

#[must_use]
pub fn default_price_label(price: f64) -> String {
    format!("{price:.2}")
}

/// Date plus OHLCV rows; absent values show as `-`.
#[must_use]
pub fn default_overlay_info(candle: &CandlePoint) -> IndexMap<String, String> {
    let fixed = |value: Option<f64>| {
        value.map_or_else(|| PLACEHOLDER.to_owned(), |v| format!("{v:.2}"))
    };
    let date = unix_millis_to_datetime(candle.timestamp).map_or_else(
        || PLACEHOLDER.to_owned(),
        |time| time.format("%b %-d, %Y").to_string(),
    );

    let mut info = IndexMap::with_capacity(6);
    info.insert("Date".to_owned(), date);
    info.insert("Open".to_owned(), fixed(candle.open));
    info.insert("High".to_owned(), fixed(candle.high));
    info.insert("Low".to_owned(), fixed(candle.low));
    info.insert("Close".to_owned(), fixed(candle.close));
    info.insert(
        "Volume".to_owned(),
        candle
            .volume
            .map_or_else(|| PLACEHOLDER.to_owned(), format_abbreviated),
    );
    info
}

/// Short form for large magnitudes: `1234567.0` -> `1.234M`.
///
/// Values below 1000 keep three decimals; values from 1e18 use exponent
/// notation with an explicit sign: `1e18` -> `1.000e+18`.
#[must_use]
pub fn format_abbreviated(value: f64) -> String {
    let magnitude = value.abs();
    if !value.is_finite() || magnitude < 1_000.0 {
        return format!("{value:.3}");
    }
    if magnitude >= 1e18 {
        return format!("{value:.3e}").replacen('e', "e+", 1);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    let groups = digit_groups(magnitude.round() as u64);
    let suffix = ABBREVIATION_SUFFIXES[groups.len() - 2];
    format!("{sign}{}.{}{suffix}", groups[0], groups[1])
}

/// Signed percentage: two decimals below 100, grouped integer from 100 up.
/// Non-finite values are printed as-is.
#[must_use]
pub fn format_percent(value: f64) -> String {
    let sign = if value >= 0.0 { "+" } else { "" };
    if !value.is_finite() || value < 100.0 {
        format!("{sign}{value:.2}%")
    } else {
        let grouped = digit_groups(value.round() as u64).join(",");
        format!("{sign}{grouped}%")
    }
}

// Thousands groups, most significant first: 1234567 -> ["1", "234", "567"].
fn digit_groups(value: u64) -> Vec<String> {
    let digits = value.to_string();
    let head = match digits.len() % 3 {
        0 => 3,
        rem => rem,
    };
    let mut groups = vec![digits[..head].to_owned()];
    let mut rest = &digits[head..];
    while !rest.is_empty() {
        let (group, tail) = rest.split_at(3);
        groups.push(group.to_owned());
        rest = tail;
    }
    groups
}

/// Formatter overrides installed by the host; `None` uses the defaults above.
#[derive(Clone, Default)]
pub struct LabelFormatters {
    pub time: Option<TimeLabelFormatterFn>,
    pub price: Option<PriceLabelFormatterFn>,
    pub overlay: Option<OverlayInfoFn>,
}

impl LabelFormatters {
    #[must_use]
    pub fn time_label(&self, timestamp_ms: i64, visible_count: usize) -> String {
        match &self.time {
            Some(formatter) => formatter(timestamp_ms, visible_count),
            None => default_time_label(timestamp_ms, visible_count),
        }
    }

    #[must_use]
    pub fn price_label(&self, price: f64) -> String {
        match &self.price {
            Some(formatter) => formatter(price),
            None => default_price_label(price),
        }
    }

    #[must_use]
    pub fn overlay_info(&self, candle: &CandlePoint) -> IndexMap<String, String> {
        match &self.overlay {
            Some(provider) => provider(candle),
            None => default_overlay_info(candle),
        }
    }
}

impl std::fmt::Debug for LabelFormatters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LabelFormatters")
            .field("time", &self.time.is_some())
            .field("price", &self.price.is_some())
            .field("overlay", &self.overlay.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::digit_groups;

    #[test]
    fn digit_groups_split_from_the_right() {
        assert_eq!(digit_groups(1_234_567), vec!["1", "234", "567"]);
        assert_eq!(digit_groups(123_456), vec!["123", "456"]);
        assert_eq!(digit_groups(12_000), vec!["12", "000"]);
    }
}
