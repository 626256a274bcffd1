//! Wallpaper bitmap generation: solid fills and diagonal gradients.

use wpgen_types::bitmap::Bitmap;
use wpgen_types::color::{Color, lerp_color, parse_color};
use wpgen_types::error::{Result, WpGenError};

/// Side length of the bitmap rendered when a single color is tapped.
pub const SOLID_WALLPAPER_SIZE: u32 = 512;

/// A `size x size` bitmap filled with `color`.
pub fn solid(color: &str, size: u32) -> Result<Bitmap> {
    let parsed = parse_color(color)?;
    Bitmap::filled(size, size, parsed)
}

/// A `side x side` gradient running from the top-left corner to the
/// bottom-right corner through `colors` in order.
///
/// Stops are evenly spaced and clamped at both ends. Every entry must
/// parse; one bad entry rejects the whole request.
pub fn gradient<S: AsRef<str>>(colors: &[S], side: u32) -> Result<Bitmap> {
    let stops = colors
        .iter()
        .map(|c| parse_color(c.as_ref()))
        .collect::<Result<Vec<Color>>>()?;
    if stops.is_empty() {
        return Err(WpGenError::NoColors);
    }
    if side == 0 {
        return Err(WpGenError::InvalidSize(side));
    }

    // Every pixel on an anti-diagonal (constant x + y) projects to the same
    // point on the gradient axis, so shade each diagonal once.
    let span = 2.0 * side as f32;
    let diagonals: Vec<u32> = (0..2 * side - 1)
        .map(|k| sample(&stops, (k as f32 + 1.0) / span).argb())
        .collect();

    let side_us = side as usize;
    let mut pixels = Vec::with_capacity(side_us * side_us);
    for y in 0..side_us {
        pixels.extend_from_slice(&diagonals[y..y + side_us]);
    }
    Bitmap::from_pixels(side, side, pixels)
}

/// Color at position `t` along evenly spaced `stops` (non-empty).
fn sample(stops: &[Color], t: f32) -> Color {
    if stops.len() == 1 {
        return stops[0];
    }
    let last = stops.len() - 1;
    let pos = t.clamp(0.0, 1.0) * last as f32;
    let i = (pos.floor() as usize).min(last - 1);
    lerp_color(stops[i], stops[i + 1], pos - i as f32)
}

/// Gradient side length for a display: half its smaller dimension.
pub fn wallpaper_side(width: u32, height: u32) -> u32 {
    (width.min(height) / 2).max(1)
}

/// Preview square size inside a grid column, leaving a 5% frame on each side.
pub fn thumbnail_size(column_width: u32) -> u32 {
    let padding = (column_width as f32 * 0.05).round() as u32;
    column_width.saturating_sub(padding * 2).max(1)
}
