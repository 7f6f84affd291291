use crate::render::TextHAlign;

/// Approximate rendered width of `text`; no font metrics are available.
pub(super) fn estimate_label_text_width_px(text: &str, font_size_px: f64) -> f64 {
    // Keep this estimate deterministic and backend-independent.
    let units = text.chars().fold(0.0, |acc, ch| {
        acc + match ch {
            '0'..='9' => 0.62,
            '.' | ',' => 0.34,
            '-' | '+' | '%' => 0.42,
            ' ' => 0.33,
            'i' | 'l' | 'j' | '\'' | '|' => 0.28,
            'm' | 'w' | 'M' | 'W' => 0.86,
            _ => 0.58,
        }
    });
    (units * font_size_px).max(font_size_px)
}

/// Horizontal extent `(left, right)` of a label anchored at `x`.
pub(super) fn label_extent(x: f64, width: f64, align: TextHAlign) -> (f64, f64) {
    match align {
        TextHAlign::Left => (x, x + width),
        TextHAlign::Center => (x - width * 0.5, x + width * 0.5),
        TextHAlign::Right => (x - width, x),
    }
}

/// Alignment for a label placed outward along `angle` (radians).
pub(super) fn align_for_angle(angle: f64) -> TextHAlign {
    let cos = angle.cos();
    if cos > 0.1 {
        TextHAlign::Left
    } else if cos < -0.1 {
        TextHAlign::Right
    } else {
        TextHAlign::Center
    }
}
