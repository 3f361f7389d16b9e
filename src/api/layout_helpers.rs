/// Pixel gap between the pointer and the overlay panel.
pub(super) const OVERLAY_FINGER_MARGIN_PX: f64 = 32.0;
pub(super) const OVERLAY_PADDING_PX: f64 = 8.0;
pub(super) const OVERLAY_CORNER_RADIUS_PX: f64 = 8.0;
pub(super) const OVERLAY_ROW_SPACING: f64 = 1.5;
/// Horizontal distance between the plot's right edge and price labels.
pub(super) const PRICE_LABEL_GAP_PX: f64 = 4.0;
/// Roughly one time label per this many pixels of plot width.
pub(super) const TIME_LABEL_SPACING_PX: f64 = 90.0;

pub(super) fn estimate_label_text_width_px(text: &str, font_size_px: f64) -> f64 {
    // Deterministic glyph-width table; backends may measure differently.
    let units = text.chars().fold(0.0, |acc, ch| {
        acc + match ch {
            '0'..='9' => 0.62,
            '.' | ',' => 0.34,
            '-' | '+' | '%' => 0.42,
            ' ' => 0.33,
            _ => 0.58,
        }
    });
    (units * font_size_px).max(font_size_px)
}

/// Top-left corner of the overlay panel.
///
/// The panel opens on the side of the pointer with more room, keeps clear of
/// the finger, and stays inside `[0, bounds_width]` horizontally and below
/// `y = 0`.
pub(super) fn resolve_overlay_origin(
    pointer_x: f64,
    pointer_y: f64,
    panel_width: f64,
    panel_height: f64,
    bounds_width: f64,
) -> (f64, f64) {
    let x = if pointer_x <= bounds_width / 2.0 {
        pointer_x + OVERLAY_FINGER_MARGIN_PX
    } else {
        pointer_x - panel_width - OVERLAY_FINGER_MARGIN_PX
    };
    let x = x.min(bounds_width - panel_width).max(0.0);
    let y = (pointer_y - panel_height - OVERLAY_FINGER_MARGIN_PX).max(0.0);
    (x, y)
}

#[cfg(test)]
mod tests {
    use super::{OVERLAY_FINGER_MARGIN_PX, estimate_label_text_width_px, resolve_overlay_origin};

    #[test]
    fn overlay_opens_right_of_pointer_on_left_half() {
        let (x, y) = resolve_overlay_origin(100.0, 300.0, 120.0, 80.0, 900.0);
        assert_eq!(x, 100.0 + OVERLAY_FINGER_MARGIN_PX);
        assert_eq!(y, 300.0 - 80.0 - OVERLAY_FINGER_MARGIN_PX);
    }

    #[test]
    fn overlay_opens_left_of_pointer_on_right_half_and_clamps() {
        let (x, y) = resolve_overlay_origin(880.0, 10.0, 120.0, 80.0, 900.0);
        assert_eq!(x, 880.0 - 120.0 - OVERLAY_FINGER_MARGIN_PX);
        assert_eq!(y, 0.0);

        let (x, _) = resolve_overlay_origin(20.0, 10.0, 150.0, 80.0, 160.0);
        assert_eq!(x, 10.0);
    }

    #[test]
    fn text_width_never_drops_below_one_em() {
        assert_eq!(estimate_label_text_width_px(".", 12.0), 12.0);
        assert!(estimate_label_text_width_px("123456", 12.0) > 12.0);
    }
}
