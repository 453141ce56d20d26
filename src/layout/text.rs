//! Fixed-width text estimation. Glyphs are never measured: every character
//! counts as `char_width` pixels.

pub const ELLIPSIS: &str = "…";

// Absorbs float noise when the available width is an exact multiple.
const FIT_EPSILON: f32 = 1e-3;

pub fn estimate_width(text: &str, char_width: f32) -> f32 {
    text.chars().count() as f32 * char_width
}

fn max_chars(available: f32, char_width: f32) -> usize {
    if available <= 0.0 {
        return 0;
    }
    (available / char_width + FIT_EPSILON).floor() as usize
}

/// Shortens `text` to fit `available` pixels by cutting out its middle.
///
/// The ellipsis takes one character slot. Kept characters are split between
/// both ends with the left side taking the odd one; when fewer than two would
/// survive only the ellipsis is returned.
pub fn truncate_middle(text: &str, available: f32, char_width: f32) -> String {
    if char_width <= 0.0 {
        return text.to_string();
    }
    let chars: Vec<char> = text.chars().collect();
    let limit = max_chars(available, char_width);
    if chars.len() <= limit {
        return text.to_string();
    }
    let keep = limit.saturating_sub(1);
    if keep < 2 {
        return ELLIPSIS.to_string();
    }
    let left = keep.div_ceil(2);
    let right = keep / 2;
    let mut out: String = chars[..left].iter().collect();
    out.push_str(ELLIPSIS);
    out.extend(&chars[chars.len() - right..]);
    out
}
